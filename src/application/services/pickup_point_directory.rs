//! Pickup point directory: registration and lookup

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::domain::{DomainError, DomainResult, PickupPoint, RepositoryProvider};
use crate::shared::{system_clock, SharedClock};

pub struct PickupPointDirectory {
    repos: Arc<dyn RepositoryProvider>,
    clock: SharedClock,
}

impl PickupPointDirectory {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self::with_clock(repos, system_clock())
    }

    pub fn with_clock(repos: Arc<dyn RepositoryProvider>, clock: SharedClock) -> Self {
        Self { repos, clock }
    }

    /// Register a pickup point under a caller-supplied id.
    ///
    /// The city must already exist; `registration_date` defaults to now.
    pub async fn create(
        &self,
        id: Uuid,
        city_name: &str,
        registration_date: Option<DateTime<Utc>>,
    ) -> DomainResult<PickupPoint> {
        let city = self
            .repos
            .cities()
            .find_by_name(city_name)
            .await
            .map_err(DomainError::internal("create pickup point: find city"))?
            .ok_or_else(|| DomainError::CityNotFound(city_name.to_string()))?;

        let registration_date = registration_date.unwrap_or_else(|| self.clock.now());
        let pvz = PickupPoint::new(id, registration_date, city.clone());

        let created = self
            .repos
            .pickup_points()
            .create(pvz)
            .await
            .map_err(|e| {
                if e.is_duplicate() {
                    DomainError::DuplicatePickupPoint(id)
                } else {
                    DomainError::internal("create pickup point: insert")(e)
                }
            })?;

        metrics::counter!("pvz_created_total").increment(1);
        info!(pvz_id = %id, city = %city.name, "Pickup point registered");

        Ok(created.with_city(city))
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<PickupPoint> {
        self.repos
            .pickup_points()
            .find_by_id(id)
            .await
            .map_err(DomainError::internal("get pickup point"))?
            .ok_or(DomainError::NotFound {
                entity: "PickupPoint",
                field: "id",
                value: id.to_string(),
            })
    }

    /// Every pickup point, newest registration first
    pub async fn list_all(&self) -> DomainResult<Vec<PickupPoint>> {
        self.repos
            .pickup_points()
            .list_all()
            .await
            .map_err(DomainError::internal("list pickup points"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::{at, Fixture};
    use crate::domain::ErrorKind;

    fn directory(fx: &Fixture) -> PickupPointDirectory {
        PickupPointDirectory::with_clock(fx.repos.clone(), fx.clock())
    }

    #[tokio::test]
    async fn create_resolves_city() {
        let fx = Fixture::new();
        let id = Uuid::new_v4();

        let pvz = directory(&fx).create(id, "Казань", Some(at(9, 0))).await.unwrap();

        assert_eq!(pvz.id, id);
        assert_eq!(pvz.registration_date, at(9, 0));
        assert_eq!(pvz.city_name(), Some("Казань"));
    }

    #[tokio::test]
    async fn create_defaults_registration_date_to_now() {
        let fx = Fixture::new();
        let pvz = directory(&fx)
            .create(Uuid::new_v4(), "Москва", None)
            .await
            .unwrap();
        assert_eq!(pvz.registration_date, at(10, 0));
    }

    #[tokio::test]
    async fn unknown_city_is_rejected() {
        let fx = Fixture::new();
        let err = directory(&fx)
            .create(Uuid::new_v4(), "Новосибирск", None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::CityNotFound(ref name) if name == "Новосибирск"));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn duplicate_id_is_rejected() {
        let fx = Fixture::new();
        let dir = directory(&fx);
        let id = Uuid::new_v4();

        dir.create(id, "Москва", None).await.unwrap();
        let err = dir.create(id, "Казань", None).await.unwrap_err();

        assert!(matches!(err, DomainError::DuplicatePickupPoint(dup) if dup == id));
        // First registration is untouched
        assert_eq!(dir.get(id).await.unwrap().city_name(), Some("Москва"));
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let fx = Fixture::new();
        let err = directory(&fx).get(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "PickupPoint", .. }));
    }

    #[tokio::test]
    async fn list_all_is_newest_first() {
        let fx = Fixture::new();
        let older = fx.pickup_point(at(8, 0)).await;
        let newer = fx.pickup_point(at(9, 0)).await;

        let all = directory(&fx).list_all().await.unwrap();
        let ids: Vec<Uuid> = all.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![newer.id, older.id]);
        assert!(all.iter().all(|p| p.city.is_some()));
    }
}
