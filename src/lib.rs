//! # PVZ Service
//!
//! Reception lifecycle and inventory aggregation for pickup points (PVZ).
//!
//! ## Architecture
//!
//! - **domain**: entities and repository traits
//! - **application**: pickup point directory, reception lifecycle,
//!   inventory ledger and overview aggregator
//! - **infrastructure**: SeaORM storage with migrations, in-memory storage
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: errors, pagination, clock, shutdown coordination

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

// Re-export API router
pub use interfaces::http::create_api_router;
