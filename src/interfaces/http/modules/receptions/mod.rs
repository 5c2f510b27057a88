//! Reception module: opening an intake session

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
