//! Pickup point module: registration, lookup, overview and per-point actions

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
