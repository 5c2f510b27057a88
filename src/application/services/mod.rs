//! Application services

mod inventory_ledger;
mod overview_aggregator;
mod pickup_point_directory;
mod reception_lifecycle;

#[cfg(test)]
mod test_support;

pub use inventory_ledger::InventoryLedger;
pub use overview_aggregator::{OverviewAggregator, PickupPointOverview, ReceptionOverview};
pub use pickup_point_directory::PickupPointDirectory;
pub use reception_lifecycle::ReceptionLifecycle;
