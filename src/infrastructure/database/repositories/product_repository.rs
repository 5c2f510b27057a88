//! SeaORM implementations of ProductTypeRepository and ProductRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::sea_query::{Expr, Query};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::domain::{Product, ProductRepository, ProductType, ProductTypeRepository, StorageResult};
use crate::infrastructure::database::entities::{product, product_type, reception};
use crate::infrastructure::seed::IN_PROGRESS_STATUS_ID;

fn model_to_domain(m: product::Model, t: Option<product_type::Model>) -> Product {
    Product {
        id: m.id,
        date_time: m.date_time,
        type_id: m.type_id,
        product_type: t.map(|t| t.name),
        reception_id: m.reception_id,
    }
}

// ── SeaOrmProductTypeRepository ─────────────────────────────────

pub struct SeaOrmProductTypeRepository {
    db: DatabaseConnection,
}

impl SeaOrmProductTypeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductTypeRepository for SeaOrmProductTypeRepository {
    async fn find_by_name(&self, name: &str) -> StorageResult<Option<ProductType>> {
        let model = product_type::Entity::find()
            .filter(product_type::Column::Name.eq(name))
            .one(&self.db)
            .await?;
        Ok(model.map(|m| ProductType::new(m.id, m.name)))
    }
}

// ── SeaOrmProductRepository ─────────────────────────────────────

pub struct SeaOrmProductRepository {
    db: DatabaseConnection,
}

impl SeaOrmProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn create(&self, product: Product) -> StorageResult<Option<Product>> {
        debug!(
            "Adding product {} to reception {}",
            product.id, product.reception_id
        );

        // INSERT ... SELECT: the row is produced only while the reception is in progress
        let source = Query::select()
            .exprs([
                Expr::val(product.id),
                Expr::val(product.date_time),
                Expr::val(product.type_id),
                Expr::val(product.reception_id),
            ])
            .from(reception::Entity)
            .and_where(reception::Column::Id.eq(product.reception_id))
            .and_where(reception::Column::StatusId.eq(IN_PROGRESS_STATUS_ID))
            .to_owned();

        let mut insert = Query::insert();
        insert.into_table(product::Entity).columns([
            product::Column::Id,
            product::Column::DateTime,
            product::Column::TypeId,
            product::Column::ReceptionId,
        ]);
        insert
            .select_from(source)
            .map_err(|e| DbErr::Custom(e.to_string()))?;

        let statement = self.db.get_database_backend().build(&insert);
        let result = self.db.execute(statement).await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Ok(Some(product))
    }

    async fn last_in_reception(&self, reception_id: Uuid) -> StorageResult<Option<Product>> {
        let found = product::Entity::find()
            .find_also_related(product_type::Entity)
            .filter(product::Column::ReceptionId.eq(reception_id))
            .order_by_desc(product::Column::DateTime)
            .order_by_desc(product::Column::Id)
            .one(&self.db)
            .await?;
        Ok(found.map(|(m, t)| model_to_domain(m, t)))
    }

    async fn delete(&self, id: Uuid) -> StorageResult<bool> {
        debug!("Deleting product {}", id);
        let result = product::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn list_by_reception_ids_with_type(
        &self,
        reception_ids: &[Uuid],
    ) -> StorageResult<Vec<Product>> {
        if reception_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = product::Entity::find()
            .find_also_related(product_type::Entity)
            .filter(product::Column::ReceptionId.is_in(reception_ids.iter().copied()))
            .order_by_asc(product::Column::DateTime)
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(|(m, t)| model_to_domain(m, t)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        City, PickupPoint, PickupPointRepository, Reception, ReceptionRepository, ReceptionStatus,
        ReceptionStatusKind,
    };
    use crate::infrastructure::database::repositories::pickup_point_repository::SeaOrmPickupPointRepository;
    use crate::infrastructure::database::repositories::reception_repository::SeaOrmReceptionRepository;
    use crate::infrastructure::database::repositories::test_db;
    use chrono::{Duration, TimeZone, Utc};

    #[tokio::test]
    async fn last_and_delete_follow_creation_order() {
        let db = test_db::connect().await;
        let pvz = Uuid::new_v4();
        SeaOrmPickupPointRepository::new(db.clone())
            .create(PickupPoint::new(pvz, Utc::now(), City::new(1, "Москва")))
            .await
            .unwrap();
        let status = ReceptionStatus {
            id: 1,
            kind: ReceptionStatusKind::InProgress,
        };
        let reception = SeaOrmReceptionRepository::new(db.clone())
            .create(Reception::open(pvz, Utc::now(), status))
            .await
            .unwrap();

        let types = SeaOrmProductTypeRepository::new(db.clone());
        let shoes = types.find_by_name("обувь").await.unwrap().unwrap();
        assert!(types.find_by_name("мебель").await.unwrap().is_none());

        let repo = SeaOrmProductRepository::new(db);
        let t = Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap();
        let early = repo
            .create(Product::new(reception.id, t, &shoes))
            .await
            .unwrap()
            .unwrap();
        let tied_a = repo
            .create(Product::new(reception.id, t + Duration::minutes(5), &shoes))
            .await
            .unwrap()
            .unwrap();
        let tied_b = repo
            .create(Product::new(reception.id, t + Duration::minutes(5), &shoes))
            .await
            .unwrap()
            .unwrap();

        let last = repo.last_in_reception(reception.id).await.unwrap().unwrap();
        assert_eq!(last.id, tied_b.id);
        assert_eq!(last.product_type.as_deref(), Some("обувь"));

        assert!(repo.delete(tied_b.id).await.unwrap());
        assert!(!repo.delete(tied_b.id).await.unwrap());

        let listed = repo
            .list_by_reception_ids_with_type(&[reception.id])
            .await
            .unwrap();
        let ids: Vec<Uuid> = listed.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![early.id, tied_a.id]);
    }

    #[tokio::test]
    async fn insert_into_closed_reception_is_refused() {
        let db = test_db::connect().await;
        let pvz = Uuid::new_v4();
        SeaOrmPickupPointRepository::new(db.clone())
            .create(PickupPoint::new(pvz, Utc::now(), City::new(1, "Москва")))
            .await
            .unwrap();
        let status = ReceptionStatus {
            id: 1,
            kind: ReceptionStatusKind::InProgress,
        };
        let receptions = SeaOrmReceptionRepository::new(db.clone());
        let reception = receptions
            .create(Reception::open(pvz, Utc::now(), status))
            .await
            .unwrap();
        receptions
            .update_status(reception.id, 1, 2)
            .await
            .unwrap()
            .unwrap();

        let shoes = ProductType::new(3, "обувь");
        let repo = SeaOrmProductRepository::new(db);
        let refused = repo
            .create(Product::new(reception.id, Utc::now(), &shoes))
            .await
            .unwrap();
        assert!(refused.is_none());
        assert!(repo
            .create(Product::new(Uuid::new_v4(), Utc::now(), &shoes))
            .await
            .unwrap()
            .is_none());
        assert!(repo
            .list_by_reception_ids_with_type(&[reception.id])
            .await
            .unwrap()
            .is_empty());
    }
}
