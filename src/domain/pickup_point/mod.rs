//! Pickup point (PVZ) aggregate
//!
//! Contains the PickupPoint entity, its list query and repository interface.

pub mod model;
pub mod repository;

pub use model::{PickupPoint, PickupPointListQuery};
pub use repository::PickupPointRepository;
