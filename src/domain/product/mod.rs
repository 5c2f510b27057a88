//! Product aggregate
//!
//! Contains the Product entity, product type reference data and repository
//! interfaces.

pub mod model;
pub mod repository;

pub use model::{Product, ProductType};
pub use repository::{ProductRepository, ProductTypeRepository};
