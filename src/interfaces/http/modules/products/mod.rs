//! Product module: logging items into the active reception

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
