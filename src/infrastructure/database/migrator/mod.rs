//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_cities;
mod m20250301_000002_create_pickup_points;
mod m20250301_000003_create_reception_statuses;
mod m20250301_000004_create_receptions;
mod m20250301_000005_create_product_types;
mod m20250301_000006_create_products;

pub use m20250301_000004_create_receptions::ONE_IN_PROGRESS_INDEX;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_cities::Migration),
            Box::new(m20250301_000002_create_pickup_points::Migration),
            Box::new(m20250301_000003_create_reception_statuses::Migration),
            Box::new(m20250301_000004_create_receptions::Migration),
            Box::new(m20250301_000005_create_product_types::Migration),
            Box::new(m20250301_000006_create_products::Migration),
        ]
    }
}
