//! City repository interface

use async_trait::async_trait;

use super::model::City;
use crate::shared::StorageResult;

#[async_trait]
pub trait CityRepository: Send + Sync {
    /// Exact, case-sensitive name match
    async fn find_by_name(&self, name: &str) -> StorageResult<Option<City>>;
    async fn find_by_id(&self, id: i32) -> StorageResult<Option<City>>;
}
