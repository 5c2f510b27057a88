//! SeaORM implementation of CityRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::domain::{City, CityRepository, StorageResult};
use crate::infrastructure::database::entities::city;

pub(super) fn model_to_domain(m: city::Model) -> City {
    City { id: m.id, name: m.name }
}

pub struct SeaOrmCityRepository {
    db: DatabaseConnection,
}

impl SeaOrmCityRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CityRepository for SeaOrmCityRepository {
    async fn find_by_name(&self, name: &str) -> StorageResult<Option<City>> {
        debug!("Finding city by name: {}", name);
        let model = city::Entity::find()
            .filter(city::Column::Name.eq(name))
            .one(&self.db)
            .await?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_id(&self, id: i32) -> StorageResult<Option<City>> {
        let model = city::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(model_to_domain))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::repositories::test_db;

    #[tokio::test]
    async fn seeded_cities_are_found() {
        let repo = SeaOrmCityRepository::new(test_db::connect().await);

        let spb = repo.find_by_name("Санкт-Петербург").await.unwrap().unwrap();
        assert_eq!(spb.id, 2);
        assert_eq!(repo.find_by_id(3).await.unwrap().unwrap().name, "Казань");
        assert!(repo.find_by_name("Новосибирск").await.unwrap().is_none());
    }
}
