//! Reception repository interfaces

use async_trait::async_trait;
use uuid::Uuid;

use super::model::{Reception, ReceptionStatus, ReceptionStatusKind};
use crate::shared::StorageResult;

#[async_trait]
pub trait ReceptionStatusRepository: Send + Sync {
    async fn find_by_kind(&self, kind: ReceptionStatusKind)
        -> StorageResult<Option<ReceptionStatus>>;
}

#[async_trait]
pub trait ReceptionRepository: Send + Sync {
    /// Insert a reception. Fails with `StorageError::Duplicate` when the
    /// pickup point already has an in-progress reception.
    async fn create(&self, reception: Reception) -> StorageResult<Reception>;

    /// The pickup point's reception in the given status, status attached
    async fn find_by_status(
        &self,
        kind: ReceptionStatusKind,
        pickup_point_id: Uuid,
    ) -> StorageResult<Option<Reception>>;

    /// Move the reception from `from_status_id` to `to_status_id`.
    ///
    /// `None` when the reception does not exist or is no longer in
    /// `from_status_id`; of two racing transitions only one gets `Some`.
    async fn update_status(
        &self,
        id: Uuid,
        from_status_id: i32,
        to_status_id: i32,
    ) -> StorageResult<Option<Reception>>;

    /// Every reception of the given pickup points, status attached
    async fn list_by_pickup_point_ids_with_status(
        &self,
        pickup_point_ids: &[Uuid],
    ) -> StorageResult<Vec<Reception>>;
}
