//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::{
    CityRepository, PickupPointRepository, ProductRepository, ProductTypeRepository,
    ReceptionRepository, ReceptionStatusRepository, RepositoryProvider,
};

use super::city_repository::SeaOrmCityRepository;
use super::pickup_point_repository::SeaOrmPickupPointRepository;
use super::product_repository::{SeaOrmProductRepository, SeaOrmProductTypeRepository};
use super::reception_repository::{SeaOrmReceptionRepository, SeaOrmReceptionStatusRepository};

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let pvz = repos.pickup_points().find_by_id(id).await?;
/// let active = repos.receptions().find_by_status(ReceptionStatusKind::InProgress, id).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    cities: SeaOrmCityRepository,
    pickup_points: SeaOrmPickupPointRepository,
    reception_statuses: SeaOrmReceptionStatusRepository,
    receptions: SeaOrmReceptionRepository,
    product_types: SeaOrmProductTypeRepository,
    products: SeaOrmProductRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            cities: SeaOrmCityRepository::new(db.clone()),
            pickup_points: SeaOrmPickupPointRepository::new(db.clone()),
            reception_statuses: SeaOrmReceptionStatusRepository::new(db.clone()),
            receptions: SeaOrmReceptionRepository::new(db.clone()),
            product_types: SeaOrmProductTypeRepository::new(db.clone()),
            products: SeaOrmProductRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn cities(&self) -> &dyn CityRepository {
        &self.cities
    }

    fn pickup_points(&self) -> &dyn PickupPointRepository {
        &self.pickup_points
    }

    fn reception_statuses(&self) -> &dyn ReceptionStatusRepository {
        &self.reception_statuses
    }

    fn receptions(&self) -> &dyn ReceptionRepository {
        &self.receptions
    }

    fn product_types(&self) -> &dyn ProductTypeRepository {
        &self.product_types
    }

    fn products(&self) -> &dyn ProductRepository {
        &self.products
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{InventoryLedger, OverviewAggregator, PickupPointDirectory, ReceptionLifecycle};
    use crate::domain::DomainError;
    use crate::infrastructure::database::repositories::test_db;
    use crate::shared::{DateRangeFilter, PaginationParams};
    use std::sync::Arc;
    use uuid::Uuid;

    #[tokio::test]
    async fn services_run_against_sqlite() {
        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(test_db::connect().await));
        let directory = PickupPointDirectory::new(repos.clone());
        let lifecycle = ReceptionLifecycle::new(repos.clone());
        let ledger = InventoryLedger::new(repos.clone());
        let overview = OverviewAggregator::new(repos);

        let pvz = directory.create(Uuid::new_v4(), "Москва", None).await.unwrap();
        lifecycle.open(pvz.id).await.unwrap();
        let err = lifecycle.open(pvz.id).await.unwrap_err();
        assert!(matches!(err, DomainError::ReceptionAlreadyInProgress(_)));

        ledger.add(pvz.id, "электроника").await.unwrap();
        let last = ledger.add(pvz.id, "одежда").await.unwrap();
        assert_eq!(ledger.remove_last(pvz.id).await.unwrap().id, last.id);
        lifecycle.close(pvz.id).await.unwrap();

        let list = overview
            .list(DateRangeFilter::default(), PaginationParams::default())
            .await
            .unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].receptions.len(), 1);
        assert_eq!(list[0].receptions[0].products.len(), 1);
        assert_eq!(
            list[0].receptions[0].products[0].product_type.as_deref(),
            Some("электроника")
        );
    }
}
