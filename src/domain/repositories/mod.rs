//! Repository provider for the domain layer

use super::city::CityRepository;
use super::pickup_point::PickupPointRepository;
use super::product::{ProductRepository, ProductTypeRepository};
use super::reception::{ReceptionRepository, ReceptionStatusRepository};

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let pvz = repos.pickup_points().find_by_id(id).await?;
///     let active = repos.receptions().find_by_status(ReceptionStatusKind::InProgress, id).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn cities(&self) -> &dyn CityRepository;
    fn pickup_points(&self) -> &dyn PickupPointRepository;
    fn reception_statuses(&self) -> &dyn ReceptionStatusRepository;
    fn receptions(&self) -> &dyn ReceptionRepository;
    fn product_types(&self) -> &dyn ProductTypeRepository;
    fn products(&self) -> &dyn ProductRepository;
}
