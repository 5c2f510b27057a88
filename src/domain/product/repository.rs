//! Product repository interfaces

use async_trait::async_trait;
use uuid::Uuid;

use super::model::{Product, ProductType};
use crate::shared::StorageResult;

#[async_trait]
pub trait ProductTypeRepository: Send + Sync {
    async fn find_by_name(&self, name: &str) -> StorageResult<Option<ProductType>>;
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a product into an in-progress reception.
    ///
    /// The status check and the insert are one atomic step; `None` when the
    /// reception is missing or no longer in progress.
    async fn create(&self, product: Product) -> StorageResult<Option<Product>>;

    /// Most recent product of the reception: `date_time` desc, then
    /// creation order desc
    async fn last_in_reception(&self, reception_id: Uuid) -> StorageResult<Option<Product>>;

    /// Returns `false` when no row was deleted
    async fn delete(&self, id: Uuid) -> StorageResult<bool>;

    /// Every product of the given receptions, type name attached
    async fn list_by_reception_ids_with_type(
        &self,
        reception_ids: &[Uuid],
    ) -> StorageResult<Vec<Product>>;
}
