//! Reception aggregate
//!
//! Contains the Reception entity, its status reference data and repository
//! interfaces.

pub mod model;
pub mod repository;

pub use model::{Reception, ReceptionStatus, ReceptionStatusKind};
pub use repository::{ReceptionRepository, ReceptionStatusRepository};
