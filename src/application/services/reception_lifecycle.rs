//! Reception lifecycle: one in-progress reception per pickup point
//!
//! `open` is a check-then-insert. The check gives the common-path error; the
//! storage constraint (partial unique index, or the in-memory active index)
//! settles concurrent opens, and its duplicate report is mapped to the same
//! `ReceptionAlreadyInProgress` error.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{
    DomainError, DomainResult, Reception, ReceptionStatus, ReceptionStatusKind,
    RepositoryProvider,
};
use crate::shared::{system_clock, SharedClock};

pub struct ReceptionLifecycle {
    repos: Arc<dyn RepositoryProvider>,
    clock: SharedClock,
}

impl ReceptionLifecycle {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self::with_clock(repos, system_clock())
    }

    pub fn with_clock(repos: Arc<dyn RepositoryProvider>, clock: SharedClock) -> Self {
        Self { repos, clock }
    }

    pub async fn open(&self, pickup_point_id: Uuid) -> DomainResult<Reception> {
        self.repos
            .pickup_points()
            .find_by_id(pickup_point_id)
            .await
            .map_err(DomainError::internal("open reception: find pickup point"))?
            .ok_or(DomainError::PickupPointNotFound(pickup_point_id))?;

        let active = self
            .repos
            .receptions()
            .find_by_status(ReceptionStatusKind::InProgress, pickup_point_id)
            .await
            .map_err(DomainError::internal("open reception: find active"))?;
        if active.is_some() {
            return Err(DomainError::ReceptionAlreadyInProgress(pickup_point_id));
        }

        let status = self
            .resolve_status(ReceptionStatusKind::InProgress, "open reception: resolve status")
            .await?;

        let reception = Reception::open(pickup_point_id, self.clock.now(), status);
        let created = self
            .repos
            .receptions()
            .create(reception)
            .await
            .map_err(|e| {
                if e.is_duplicate() {
                    warn!(pvz_id = %pickup_point_id, "Concurrent open lost to another reception");
                    DomainError::ReceptionAlreadyInProgress(pickup_point_id)
                } else {
                    DomainError::internal("open reception: insert")(e)
                }
            })?;

        metrics::counter!("receptions_created_total").increment(1);
        info!(pvz_id = %pickup_point_id, reception_id = %created.id, "Reception opened");

        Ok(created.with_status(status))
    }

    pub async fn close(&self, pickup_point_id: Uuid) -> DomainResult<Reception> {
        let active = self
            .repos
            .receptions()
            .find_by_status(ReceptionStatusKind::InProgress, pickup_point_id)
            .await
            .map_err(DomainError::internal("close reception: find active"))?
            .ok_or(DomainError::NoActiveReception(pickup_point_id))?;

        let closed = self
            .resolve_status(ReceptionStatusKind::Closed, "close reception: resolve status")
            .await?;

        let updated = self
            .repos
            .receptions()
            .update_status(active.id, active.status_id, closed.id)
            .await
            .map_err(DomainError::internal("close reception: update"))?
            .ok_or(DomainError::NoActiveReception(pickup_point_id))?;

        metrics::counter!("receptions_closed_total").increment(1);
        info!(pvz_id = %pickup_point_id, reception_id = %updated.id, "Reception closed");

        Ok(updated.with_status(closed))
    }

    async fn resolve_status(
        &self,
        kind: ReceptionStatusKind,
        operation: &'static str,
    ) -> DomainResult<ReceptionStatus> {
        self.repos
            .reception_statuses()
            .find_by_kind(kind)
            .await
            .map_err(DomainError::internal(operation))?
            .ok_or(DomainError::NotFound {
                entity: "ReceptionStatus",
                field: "name",
                value: kind.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::{at, Fixture};
    use crate::domain::{
        CityRepository, ErrorKind, PickupPointRepository, ProductRepository,
        ProductTypeRepository, ReceptionRepository, ReceptionStatusRepository, StorageResult,
    };
    use crate::infrastructure::storage::InMemoryRepositoryProvider;
    use async_trait::async_trait;
    use chrono::Duration;

    fn lifecycle(fx: &Fixture) -> Arc<ReceptionLifecycle> {
        Arc::new(ReceptionLifecycle::with_clock(fx.repos.clone(), fx.clock()))
    }

    async fn in_progress_count(fx: &Fixture, pvz: Uuid) -> usize {
        fx.repos
            .receptions()
            .list_by_pickup_point_ids_with_status(&[pvz])
            .await
            .unwrap()
            .iter()
            .filter(|r| r.is_in_progress())
            .count()
    }

    #[tokio::test]
    async fn open_stamps_current_time() {
        let fx = Fixture::new();
        let pvz = fx.pickup_point(at(8, 0)).await;

        let reception = lifecycle(&fx).open(pvz.id).await.unwrap();

        assert_eq!(reception.pickup_point_id, pvz.id);
        assert_eq!(reception.date_time, at(10, 0));
        assert_eq!(reception.status, Some(ReceptionStatusKind::InProgress));
    }

    #[tokio::test]
    async fn second_open_is_rejected() {
        let fx = Fixture::new();
        let pvz = fx.pickup_point(at(8, 0)).await;
        let svc = lifecycle(&fx);

        svc.open(pvz.id).await.unwrap();
        let err = svc.open(pvz.id).await.unwrap_err();

        assert!(matches!(err, DomainError::ReceptionAlreadyInProgress(id) if id == pvz.id));
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(in_progress_count(&fx, pvz.id).await, 1);
    }

    #[tokio::test]
    async fn open_close_open_yields_distinct_receptions() {
        let fx = Fixture::new();
        let pvz = fx.pickup_point(at(8, 0)).await;
        let svc = lifecycle(&fx);

        let first = svc.open(pvz.id).await.unwrap();
        let closed = svc.close(pvz.id).await.unwrap();
        fx.clock.advance(Duration::minutes(30));
        let second = svc.open(pvz.id).await.unwrap();

        assert_eq!(closed.id, first.id);
        assert_eq!(closed.status, Some(ReceptionStatusKind::Closed));
        assert_ne!(first.id, second.id);
        assert_eq!(second.date_time, at(10, 30));
    }

    #[tokio::test]
    async fn close_without_active_reception_fails() {
        let fx = Fixture::new();
        let pvz = fx.pickup_point(at(8, 0)).await;
        let svc = lifecycle(&fx);

        let err = svc.close(pvz.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NoActiveReception(_)));

        svc.open(pvz.id).await.unwrap();
        svc.close(pvz.id).await.unwrap();
        let err = svc.close(pvz.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NoActiveReception(_)));
    }

    #[tokio::test]
    async fn open_for_unknown_pickup_point_fails() {
        let fx = Fixture::new();
        let err = lifecycle(&fx).open(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DomainError::PickupPointNotFound(_)));
    }

    #[tokio::test]
    async fn at_most_one_in_progress_after_any_sequence() {
        let fx = Fixture::new();
        let pvz = fx.pickup_point(at(8, 0)).await;
        let svc = lifecycle(&fx);

        // o = open, c = close
        for step in "oocoocccoco".chars() {
            let _ = match step {
                'o' => svc.open(pvz.id).await,
                _ => svc.close(pvz.id).await,
            };
            fx.clock.advance(Duration::minutes(1));
            assert!(in_progress_count(&fx, pvz.id).await <= 1);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_opens_admit_exactly_one() {
        let fx = Fixture::new();
        let pvz = fx.pickup_point(at(8, 0)).await;
        let svc = lifecycle(&fx);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let svc = svc.clone();
                tokio::spawn(async move { svc.open(pvz.id).await })
            })
            .collect();

        let mut opened = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => opened += 1,
                Err(DomainError::ReceptionAlreadyInProgress(_)) => {}
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        assert_eq!(opened, 1);
        assert_eq!(in_progress_count(&fx, pvz.id).await, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_closes_admit_exactly_one() {
        let fx = Fixture::new();
        let pvz = fx.pickup_point(at(8, 0)).await;
        let svc = lifecycle(&fx);
        let reception = svc.open(pvz.id).await.unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let svc = svc.clone();
                tokio::spawn(async move { svc.close(pvz.id).await })
            })
            .collect();

        let mut closed = Vec::new();
        for handle in handles {
            match handle.await.unwrap() {
                Ok(r) => closed.push(r.id),
                Err(DomainError::NoActiveReception(_)) => {}
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        assert_eq!(closed, vec![reception.id]);
        assert_eq!(in_progress_count(&fx, pvz.id).await, 0);
    }

    /// Receptions store where another closer always commits first.
    struct RacingCloser {
        inner: Arc<InMemoryRepositoryProvider>,
    }

    #[async_trait]
    impl ReceptionRepository for RacingCloser {
        async fn create(&self, reception: Reception) -> StorageResult<Reception> {
            self.inner.receptions().create(reception).await
        }

        async fn find_by_status(
            &self,
            kind: ReceptionStatusKind,
            pickup_point_id: Uuid,
        ) -> StorageResult<Option<Reception>> {
            self.inner.receptions().find_by_status(kind, pickup_point_id).await
        }

        async fn update_status(
            &self,
            id: Uuid,
            from_status_id: i32,
            to_status_id: i32,
        ) -> StorageResult<Option<Reception>> {
            let receptions = self.inner.receptions();
            receptions.update_status(id, from_status_id, to_status_id).await?;
            receptions.update_status(id, from_status_id, to_status_id).await
        }

        async fn list_by_pickup_point_ids_with_status(
            &self,
            pickup_point_ids: &[Uuid],
        ) -> StorageResult<Vec<Reception>> {
            self.inner
                .receptions()
                .list_by_pickup_point_ids_with_status(pickup_point_ids)
                .await
        }
    }

    impl RepositoryProvider for RacingCloser {
        fn cities(&self) -> &dyn CityRepository {
            self.inner.cities()
        }
        fn pickup_points(&self) -> &dyn PickupPointRepository {
            self.inner.pickup_points()
        }
        fn reception_statuses(&self) -> &dyn ReceptionStatusRepository {
            self.inner.reception_statuses()
        }
        fn receptions(&self) -> &dyn ReceptionRepository {
            self
        }
        fn product_types(&self) -> &dyn ProductTypeRepository {
            self.inner.product_types()
        }
        fn products(&self) -> &dyn ProductRepository {
            self.inner.products()
        }
    }

    #[tokio::test]
    async fn lost_close_race_is_no_active_reception() {
        let fx = Fixture::new();
        let pvz = fx.pickup_point(at(8, 0)).await;
        lifecycle(&fx).open(pvz.id).await.unwrap();

        let racing: Arc<dyn RepositoryProvider> = Arc::new(RacingCloser {
            inner: fx.store.clone(),
        });
        let svc = ReceptionLifecycle::with_clock(racing, fx.clock());

        let err = svc.close(pvz.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NoActiveReception(id) if id == pvz.id));
        assert_eq!(in_progress_count(&fx, pvz.id).await, 0);
    }
}
