//! City reference data
//!
//! Cities are seeded by migrations and only ever read by this service.

pub mod model;
pub mod repository;

pub use model::City;
pub use repository::CityRepository;
