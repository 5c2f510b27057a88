//! SeaORM implementation of PickupPointRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Select,
};
use uuid::Uuid;

use super::city_repository;
use super::write_err;
use crate::domain::{PickupPoint, PickupPointListQuery, PickupPointRepository, StorageResult};
use crate::infrastructure::database::entities::{city, pickup_point, reception};

fn model_to_domain(m: pickup_point::Model, c: Option<city::Model>) -> PickupPoint {
    PickupPoint {
        id: m.id,
        registration_date: m.registration_date,
        city_id: m.city_id,
        city: c.map(city_repository::model_to_domain),
    }
}

fn newest_first(select: Select<pickup_point::Entity>) -> Select<pickup_point::Entity> {
    select
        .order_by_desc(pickup_point::Column::RegistrationDate)
        .order_by_desc(pickup_point::Column::Id)
}

pub struct SeaOrmPickupPointRepository {
    db: DatabaseConnection,
}

impl SeaOrmPickupPointRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PickupPointRepository for SeaOrmPickupPointRepository {
    async fn create(&self, pickup_point: PickupPoint) -> StorageResult<PickupPoint> {
        debug!("Creating pickup point: {}", pickup_point.id);
        let model = pickup_point::ActiveModel {
            id: Set(pickup_point.id),
            registration_date: Set(pickup_point.registration_date),
            city_id: Set(pickup_point.city_id),
        };

        pickup_point::Entity::insert(model)
            .exec_without_returning(&self.db)
            .await
            .map_err(write_err(format!("pickup_points.id = {}", pickup_point.id)))?;

        Ok(pickup_point)
    }

    async fn find_by_id(&self, id: Uuid) -> StorageResult<Option<PickupPoint>> {
        let found = pickup_point::Entity::find_by_id(id)
            .find_also_related(city::Entity)
            .one(&self.db)
            .await?;
        Ok(found.map(|(m, c)| model_to_domain(m, c)))
    }

    async fn list_by_date_and_city(
        &self,
        query: &PickupPointListQuery,
    ) -> StorageResult<Vec<PickupPoint>> {
        debug!(
            "Listing pickup points: offset={}, limit={}, dates={:?}",
            query.offset(),
            query.limit(),
            query.dates.bounds()
        );

        let mut select = newest_first(pickup_point::Entity::find());
        if let Some((start, end)) = query.dates.bounds() {
            select = select.filter(
                pickup_point::Column::Id.in_subquery(
                    Query::select()
                        .column(reception::Column::PickupPointId)
                        .from(reception::Entity)
                        .and_where(reception::Column::DateTime.between(start, end))
                        .to_owned(),
                ),
            );
        }

        let rows = select
            .find_also_related(city::Entity)
            .offset(query.offset())
            .limit(query.limit())
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(|(m, c)| model_to_domain(m, c)).collect())
    }

    async fn list_all(&self) -> StorageResult<Vec<PickupPoint>> {
        let rows = newest_first(pickup_point::Entity::find())
            .find_also_related(city::Entity)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(|(m, c)| model_to_domain(m, c)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{City, Reception, ReceptionRepository, ReceptionStatus, ReceptionStatusKind};
    use crate::infrastructure::database::repositories::reception_repository::SeaOrmReceptionRepository;
    use crate::infrastructure::database::repositories::test_db;
    use crate::shared::{DateRangeFilter, PaginationParams};
    use chrono::{DateTime, TimeZone, Utc};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, hour, 0, 0).unwrap()
    }

    fn moscow() -> City {
        City::new(1, "Москва")
    }

    #[tokio::test]
    async fn create_and_find_with_city() {
        let repo = SeaOrmPickupPointRepository::new(test_db::connect().await);
        let id = Uuid::new_v4();

        repo.create(PickupPoint::new(id, at(9), moscow())).await.unwrap();

        let found = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(found.registration_date, at(9));
        assert_eq!(found.city_name(), Some("Москва"));
        assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_id_is_reported() {
        let repo = SeaOrmPickupPointRepository::new(test_db::connect().await);
        let pvz = PickupPoint::new(Uuid::new_v4(), at(9), moscow());

        repo.create(pvz.clone()).await.unwrap();
        let err = repo.create(pvz).await.unwrap_err();
        assert!(err.is_duplicate());
    }

    #[tokio::test]
    async fn list_pages_newest_first_and_filters_by_reception_date() {
        let db = test_db::connect().await;
        let repo = SeaOrmPickupPointRepository::new(db.clone());
        let receptions = SeaOrmReceptionRepository::new(db);

        let mut ids = Vec::new();
        for hour in [6, 7, 8] {
            let id = Uuid::new_v4();
            repo.create(PickupPoint::new(id, at(hour), moscow())).await.unwrap();
            ids.push(id);
        }

        let page = repo
            .list_by_date_and_city(&PickupPointListQuery::new(
                PaginationParams::new(1, 2),
                DateRangeFilter::default(),
            ))
            .await
            .unwrap();
        let page_ids: Vec<Uuid> = page.iter().map(|p| p.id).collect();
        assert_eq!(page_ids, vec![ids[2], ids[1]]);
        assert!(page.iter().all(|p| p.city.is_some()));

        let status = ReceptionStatus {
            id: 1,
            kind: ReceptionStatusKind::InProgress,
        };
        receptions
            .create(Reception::open(ids[0], at(12), status))
            .await
            .unwrap();

        let filtered = repo
            .list_by_date_and_city(&PickupPointListQuery::new(
                PaginationParams::default(),
                DateRangeFilter::new(Some(at(12)), Some(at(13))),
            ))
            .await
            .unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, ids[0]);

        assert_eq!(repo.list_all().await.unwrap().len(), 3);
    }
}
