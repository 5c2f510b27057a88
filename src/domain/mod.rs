pub mod city;
pub mod pickup_point;
pub mod product;
pub mod reception;
pub mod repositories;

// Re-export commonly used types
pub use city::{City, CityRepository};
pub use pickup_point::{PickupPoint, PickupPointListQuery, PickupPointRepository};
pub use product::{Product, ProductRepository, ProductType, ProductTypeRepository};
pub use reception::{
    Reception, ReceptionRepository, ReceptionStatus, ReceptionStatusKind,
    ReceptionStatusRepository,
};
pub use repositories::RepositoryProvider;

pub use crate::shared::errors::{DomainError, ErrorKind, StorageError, StorageResult};

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
