//! Pickup point repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::{PickupPoint, PickupPointListQuery};
use crate::shared::StorageResult;

#[async_trait]
pub trait PickupPointRepository: Send + Sync {
    /// Insert a new pickup point. Fails with `StorageError::Duplicate`
    /// when the id is already taken.
    async fn create(&self, pickup_point: PickupPoint) -> StorageResult<PickupPoint>;

    /// Find by id, city attached
    async fn find_by_id(&self, id: Uuid) -> StorageResult<Option<PickupPoint>>;

    /// Page of pickup points with city attached, newest registration first.
    /// With both date bounds set, only points having at least one reception
    /// inside `[start, end]` are returned.
    async fn list_by_date_and_city(
        &self,
        query: &PickupPointListQuery,
    ) -> StorageResult<Vec<PickupPoint>>;

    /// Every pickup point with city attached, newest registration first
    async fn list_all(&self) -> StorageResult<Vec<PickupPoint>>;
}
