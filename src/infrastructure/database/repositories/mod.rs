//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod city_repository;
pub mod pickup_point_repository;
pub mod product_repository;
pub mod reception_repository;
pub mod repository_provider;

pub use repository_provider::SeaOrmRepositoryProvider;

use sea_orm::{DbErr, SqlErr};

use crate::shared::StorageError;

/// Map an insert/update failure, reporting unique violations as duplicates.
fn write_err(what: String) -> impl FnOnce(DbErr) -> StorageError {
    move |e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => StorageError::Duplicate(what),
        _ => StorageError::Database(e),
    }
}
