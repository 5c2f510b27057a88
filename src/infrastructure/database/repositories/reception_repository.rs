//! SeaORM implementations of ReceptionStatusRepository and ReceptionRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use super::write_err;
use crate::domain::{
    Reception, ReceptionRepository, ReceptionStatus, ReceptionStatusKind,
    ReceptionStatusRepository, StorageError, StorageResult,
};
use crate::infrastructure::database::entities::{reception, reception_status};

// ── Conversion helpers ──────────────────────────────────────────

fn status_kind(m: &reception_status::Model) -> StorageResult<ReceptionStatusKind> {
    ReceptionStatusKind::from_name(&m.name)
        .ok_or_else(|| StorageError::Corrupt(format!("unknown reception status '{}'", m.name)))
}

fn model_to_domain(
    m: reception::Model,
    status: Option<reception_status::Model>,
) -> StorageResult<Reception> {
    let status = match status {
        Some(s) => Some(status_kind(&s)?),
        None => None,
    };
    Ok(Reception {
        id: m.id,
        pickup_point_id: m.pickup_point_id,
        date_time: m.date_time,
        status_id: m.status_id,
        status,
    })
}

// ── SeaOrmReceptionStatusRepository ─────────────────────────────

pub struct SeaOrmReceptionStatusRepository {
    db: DatabaseConnection,
}

impl SeaOrmReceptionStatusRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReceptionStatusRepository for SeaOrmReceptionStatusRepository {
    async fn find_by_kind(
        &self,
        kind: ReceptionStatusKind,
    ) -> StorageResult<Option<ReceptionStatus>> {
        let model = reception_status::Entity::find()
            .filter(reception_status::Column::Name.eq(kind.as_str()))
            .one(&self.db)
            .await?;
        Ok(model.map(|m| ReceptionStatus { id: m.id, kind }))
    }
}

// ── SeaOrmReceptionRepository ───────────────────────────────────

pub struct SeaOrmReceptionRepository {
    db: DatabaseConnection,
}

impl SeaOrmReceptionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_with_status(&self, id: Uuid) -> StorageResult<Option<Reception>> {
        reception::Entity::find_by_id(id)
            .find_also_related(reception_status::Entity)
            .one(&self.db)
            .await?
            .map(|(m, s)| model_to_domain(m, s))
            .transpose()
    }
}

#[async_trait]
impl ReceptionRepository for SeaOrmReceptionRepository {
    async fn create(&self, reception: Reception) -> StorageResult<Reception> {
        debug!(
            "Creating reception {} for pickup point {}",
            reception.id, reception.pickup_point_id
        );
        let model = reception::ActiveModel {
            id: Set(reception.id),
            pickup_point_id: Set(reception.pickup_point_id),
            date_time: Set(reception.date_time),
            status_id: Set(reception.status_id),
        };

        reception::Entity::insert(model)
            .exec_without_returning(&self.db)
            .await
            .map_err(write_err(format!(
                "in-progress reception for pickup point {}",
                reception.pickup_point_id
            )))?;

        Ok(reception)
    }

    async fn find_by_status(
        &self,
        kind: ReceptionStatusKind,
        pickup_point_id: Uuid,
    ) -> StorageResult<Option<Reception>> {
        reception::Entity::find()
            .find_also_related(reception_status::Entity)
            .filter(reception::Column::PickupPointId.eq(pickup_point_id))
            .filter(reception_status::Column::Name.eq(kind.as_str()))
            .order_by_desc(reception::Column::DateTime)
            .order_by_desc(reception::Column::Id)
            .one(&self.db)
            .await?
            .map(|(m, s)| model_to_domain(m, s))
            .transpose()
    }

    async fn update_status(
        &self,
        id: Uuid,
        from_status_id: i32,
        to_status_id: i32,
    ) -> StorageResult<Option<Reception>> {
        debug!(
            "Updating reception {} from status {} to {}",
            id, from_status_id, to_status_id
        );
        let result = reception::Entity::update_many()
            .col_expr(reception::Column::StatusId, Expr::value(to_status_id))
            .filter(reception::Column::Id.eq(id))
            .filter(reception::Column::StatusId.eq(from_status_id))
            .exec(&self.db)
            .await
            .map_err(write_err(format!("in-progress reception {}", id)))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }
        self.find_with_status(id).await
    }

    async fn list_by_pickup_point_ids_with_status(
        &self,
        pickup_point_ids: &[Uuid],
    ) -> StorageResult<Vec<Reception>> {
        if pickup_point_ids.is_empty() {
            return Ok(Vec::new());
        }

        reception::Entity::find()
            .find_also_related(reception_status::Entity)
            .filter(reception::Column::PickupPointId.is_in(pickup_point_ids.iter().copied()))
            .order_by_asc(reception::Column::DateTime)
            .order_by_asc(reception::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|(m, s)| model_to_domain(m, s))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{City, PickupPoint, PickupPointRepository};
    use crate::infrastructure::database::repositories::pickup_point_repository::SeaOrmPickupPointRepository;
    use crate::infrastructure::database::repositories::test_db;
    use chrono::{Duration, Utc};
    use sea_orm::DatabaseConnection;

    async fn setup() -> (DatabaseConnection, Uuid) {
        let db = test_db::connect().await;
        let pvz = Uuid::new_v4();
        SeaOrmPickupPointRepository::new(db.clone())
            .create(PickupPoint::new(pvz, Utc::now(), City::new(1, "Москва")))
            .await
            .unwrap();
        (db, pvz)
    }

    async fn statuses(db: &DatabaseConnection) -> (ReceptionStatus, ReceptionStatus) {
        let repo = SeaOrmReceptionStatusRepository::new(db.clone());
        let open = repo
            .find_by_kind(ReceptionStatusKind::InProgress)
            .await
            .unwrap()
            .unwrap();
        let closed = repo
            .find_by_kind(ReceptionStatusKind::Closed)
            .await
            .unwrap()
            .unwrap();
        (open, closed)
    }

    #[tokio::test]
    async fn seeded_statuses_resolve() {
        let (db, _) = setup().await;
        let (open, closed) = statuses(&db).await;
        assert_eq!(open.id, 1);
        assert_eq!(closed.id, 2);
    }

    #[tokio::test]
    async fn second_in_progress_hits_unique_index() {
        let (db, pvz) = setup().await;
        let (open, _) = statuses(&db).await;
        let repo = SeaOrmReceptionRepository::new(db);

        repo.create(Reception::open(pvz, Utc::now(), open)).await.unwrap();
        let err = repo
            .create(Reception::open(pvz, Utc::now(), open))
            .await
            .unwrap_err();
        assert!(err.is_duplicate(), "unexpected error: {err}");
    }

    #[tokio::test]
    async fn close_frees_the_active_slot() {
        let (db, pvz) = setup().await;
        let (open, closed) = statuses(&db).await;
        let repo = SeaOrmReceptionRepository::new(db);

        let first = repo.create(Reception::open(pvz, Utc::now(), open)).await.unwrap();
        let active = repo
            .find_by_status(ReceptionStatusKind::InProgress, pvz)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(active.id, first.id);
        assert_eq!(active.status, Some(ReceptionStatusKind::InProgress));

        let updated = repo
            .update_status(first.id, open.id, closed.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, Some(ReceptionStatusKind::Closed));
        assert!(repo
            .find_by_status(ReceptionStatusKind::InProgress, pvz)
            .await
            .unwrap()
            .is_none());

        let later = Utc::now() + Duration::minutes(1);
        let second = repo.create(Reception::open(pvz, later, open)).await.unwrap();
        assert_ne!(second.id, first.id);

        let all = repo.list_by_pickup_point_ids_with_status(&[pvz]).await.unwrap();
        let ids: Vec<Uuid> = all.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn update_of_missing_reception_is_none() {
        let (db, _) = setup().await;
        let repo = SeaOrmReceptionRepository::new(db);
        assert!(repo.update_status(Uuid::new_v4(), 1, 2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn second_close_of_same_reception_is_none() {
        let (db, pvz) = setup().await;
        let (open, closed) = statuses(&db).await;
        let repo = SeaOrmReceptionRepository::new(db);

        let reception = repo.create(Reception::open(pvz, Utc::now(), open)).await.unwrap();
        assert!(repo
            .update_status(reception.id, open.id, closed.id)
            .await
            .unwrap()
            .is_some());
        assert!(repo
            .update_status(reception.id, open.id, closed.id)
            .await
            .unwrap()
            .is_none());

        let all = repo.list_by_pickup_point_ids_with_status(&[pvz]).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].status, Some(ReceptionStatusKind::Closed));
    }
}
