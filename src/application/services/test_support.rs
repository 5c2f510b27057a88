//! Fixtures shared by the service tests

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::domain::{PickupPoint, RepositoryProvider};
use crate::infrastructure::storage::InMemoryRepositoryProvider;
use crate::shared::{ManualClock, SharedClock};

pub struct Fixture {
    pub store: Arc<InMemoryRepositoryProvider>,
    pub repos: Arc<dyn RepositoryProvider>,
    pub clock: Arc<ManualClock>,
}

impl Fixture {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryRepositoryProvider::new());
        let clock = Arc::new(ManualClock::new(at(10, 0)));
        Self {
            repos: store.clone(),
            store,
            clock,
        }
    }

    pub fn clock(&self) -> SharedClock {
        self.clock.clone()
    }

    pub async fn pickup_point(&self, registration_date: DateTime<Utc>) -> PickupPoint {
        let city = self
            .repos
            .cities()
            .find_by_name("Москва")
            .await
            .unwrap()
            .unwrap();
        self.repos
            .pickup_points()
            .create(PickupPoint::new(Uuid::new_v4(), registration_date, city))
            .await
            .unwrap()
    }
}

/// 2025-03-01 at the given wall time, UTC
pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, hour, minute, 0).unwrap()
}
