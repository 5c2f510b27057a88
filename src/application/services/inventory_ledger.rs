//! Inventory ledger: append to / pop from the active reception

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::{
    DomainError, DomainResult, Product, Reception, ReceptionStatusKind, RepositoryProvider,
};
use crate::shared::{system_clock, SharedClock};

pub struct InventoryLedger {
    repos: Arc<dyn RepositoryProvider>,
    clock: SharedClock,
}

impl InventoryLedger {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self::with_clock(repos, system_clock())
    }

    pub fn with_clock(repos: Arc<dyn RepositoryProvider>, clock: SharedClock) -> Self {
        Self { repos, clock }
    }

    /// Log a product of the named type into the pickup point's active reception.
    pub async fn add(&self, pickup_point_id: Uuid, type_name: &str) -> DomainResult<Product> {
        let reception = self
            .active_reception(pickup_point_id, "add product: find active reception")
            .await?;

        let product_type = self
            .repos
            .product_types()
            .find_by_name(type_name)
            .await
            .map_err(DomainError::internal("add product: find product type"))?
            .ok_or_else(|| DomainError::UnknownProductType(type_name.to_string()))?;

        let product = Product::new(reception.id, self.clock.now(), &product_type);
        let mut created = self
            .repos
            .products()
            .create(product)
            .await
            .map_err(DomainError::internal("add product: insert"))?
            .ok_or(DomainError::NoActiveReception(pickup_point_id))?;
        created.product_type = Some(product_type.name);

        metrics::counter!("products_added_total").increment(1);
        info!(
            pvz_id = %pickup_point_id,
            reception_id = %reception.id,
            product_id = %created.id,
            "Product added"
        );

        Ok(created)
    }

    /// Delete the most recently added product of the active reception and
    /// return it.
    pub async fn remove_last(&self, pickup_point_id: Uuid) -> DomainResult<Product> {
        self.repos
            .pickup_points()
            .find_by_id(pickup_point_id)
            .await
            .map_err(DomainError::internal("remove product: find pickup point"))?
            .ok_or(DomainError::PickupPointNotFound(pickup_point_id))?;

        let reception = self
            .active_reception(pickup_point_id, "remove product: find active reception")
            .await?;

        let last = self
            .repos
            .products()
            .last_in_reception(reception.id)
            .await
            .map_err(DomainError::internal("remove product: find last product"))?
            .ok_or(DomainError::NoProductToRemove(pickup_point_id))?;

        let deleted = self
            .repos
            .products()
            .delete(last.id)
            .await
            .map_err(DomainError::internal("remove product: delete"))?;
        if !deleted {
            return Err(DomainError::NotFound {
                entity: "Product",
                field: "id",
                value: last.id.to_string(),
            });
        }

        metrics::counter!("products_removed_total").increment(1);
        info!(pvz_id = %pickup_point_id, product_id = %last.id, "Last product removed");

        Ok(last)
    }

    async fn active_reception(
        &self,
        pickup_point_id: Uuid,
        operation: &'static str,
    ) -> DomainResult<Reception> {
        self.repos
            .receptions()
            .find_by_status(ReceptionStatusKind::InProgress, pickup_point_id)
            .await
            .map_err(DomainError::internal(operation))?
            .ok_or(DomainError::NoActiveReception(pickup_point_id))
    }
}
