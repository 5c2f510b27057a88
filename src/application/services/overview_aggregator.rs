//! Overview aggregator: pickup point → receptions → products
//!
//! Three flat queries regardless of page size. Children are grouped into
//! `parent id → Vec<child>` maps once, then attached while walking the
//! pickup points in the order storage returned them.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::domain::{
    DomainError, DomainResult, PickupPoint, PickupPointListQuery, Product, Reception,
    RepositoryProvider,
};
use crate::shared::{DateRangeFilter, PaginationParams};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceptionOverview {
    pub reception: Reception,
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickupPointOverview {
    pub pickup_point: PickupPoint,
    pub receptions: Vec<ReceptionOverview>,
}

pub struct OverviewAggregator {
    repos: Arc<dyn RepositoryProvider>,
}

impl OverviewAggregator {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list(
        &self,
        filter: DateRangeFilter,
        pagination: PaginationParams,
    ) -> DomainResult<Vec<PickupPointOverview>> {
        pagination.validate()?;
        filter.validate()?;

        let query = PickupPointListQuery::new(pagination, filter);
        let pickup_points = self
            .repos
            .pickup_points()
            .list_by_date_and_city(&query)
            .await
            .map_err(DomainError::internal("list overview: pickup points"))?;
        if pickup_points.is_empty() {
            return Ok(Vec::new());
        }

        let pvz_ids: Vec<Uuid> = pickup_points.iter().map(|p| p.id).collect();
        let receptions = self
            .repos
            .receptions()
            .list_by_pickup_point_ids_with_status(&pvz_ids)
            .await
            .map_err(DomainError::internal("list overview: receptions"))?;

        let reception_ids: Vec<Uuid> = receptions.iter().map(|r| r.id).collect();
        let products = if reception_ids.is_empty() {
            Vec::new()
        } else {
            self.repos
                .products()
                .list_by_reception_ids_with_type(&reception_ids)
                .await
                .map_err(DomainError::internal("list overview: products"))?
        };

        debug!(
            pickup_points = pickup_points.len(),
            receptions = receptions.len(),
            products = products.len(),
            "Assembling overview"
        );

        Ok(assemble(pickup_points, receptions, products))
    }
}

fn assemble(
    pickup_points: Vec<PickupPoint>,
    receptions: Vec<Reception>,
    products: Vec<Product>,
) -> Vec<PickupPointOverview> {
    let mut products_by_reception: HashMap<Uuid, Vec<Product>> = HashMap::new();
    for product in products {
        products_by_reception
            .entry(product.reception_id)
            .or_default()
            .push(product);
    }

    let mut receptions_by_pvz: HashMap<Uuid, Vec<ReceptionOverview>> = HashMap::new();
    for reception in receptions {
        let products = products_by_reception
            .remove(&reception.id)
            .unwrap_or_default();
        receptions_by_pvz
            .entry(reception.pickup_point_id)
            .or_default()
            .push(ReceptionOverview {
                reception,
                products,
            });
    }

    pickup_points
        .into_iter()
        .map(|pickup_point| PickupPointOverview {
            receptions: receptions_by_pvz
                .remove(&pickup_point.id)
                .unwrap_or_default(),
            pickup_point,
        })
        .collect()
}
