//! In-memory repository provider for development and testing

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::{
    City, CityRepository, PickupPoint, PickupPointListQuery, PickupPointRepository, Product,
    ProductRepository, ProductType, ProductTypeRepository, Reception, ReceptionRepository,
    ReceptionStatus, ReceptionStatusKind, ReceptionStatusRepository, RepositoryProvider,
    StorageError, StorageResult,
};
use crate::infrastructure::seed;

/// In-memory store implementing every repository.
///
/// Enforces the same rules the SQL schema does: unique pickup point ids and
/// at most one in-progress reception per pickup point (the `active` index
/// plays the role of the partial unique index).
pub struct InMemoryRepositoryProvider {
    cities: DashMap<i32, City>,
    product_types: DashMap<i32, ProductType>,
    statuses: Vec<ReceptionStatus>,
    pickup_points: DashMap<Uuid, PickupPoint>,
    receptions: DashMap<Uuid, Reception>,
    active: DashMap<Uuid, Uuid>,
    products: DashMap<Uuid, Product>,
    list_queries: AtomicUsize,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        let cities = DashMap::new();
        for (id, name) in seed::CITIES {
            cities.insert(id, City::new(id, name));
        }

        let product_types = DashMap::new();
        for (id, name) in seed::PRODUCT_TYPES {
            product_types.insert(id, ProductType::new(id, name));
        }

        Self {
            cities,
            product_types,
            statuses: seed::RECEPTION_STATUSES
                .iter()
                .map(|&(id, kind)| ReceptionStatus { id, kind })
                .collect(),
            pickup_points: DashMap::new(),
            receptions: DashMap::new(),
            active: DashMap::new(),
            products: DashMap::new(),
            list_queries: AtomicUsize::new(0),
        }
    }

    /// Number of `list_*` calls served so far
    pub fn list_queries(&self) -> usize {
        self.list_queries.load(Ordering::SeqCst)
    }

    fn count_list_query(&self) {
        self.list_queries.fetch_add(1, Ordering::SeqCst);
    }

    fn status_kind(&self, status_id: i32) -> StorageResult<ReceptionStatusKind> {
        self.statuses
            .iter()
            .find(|s| s.id == status_id)
            .map(|s| s.kind)
            .ok_or_else(|| StorageError::Corrupt(format!("unknown reception status {}", status_id)))
    }

    fn status_id(&self, kind: ReceptionStatusKind) -> Option<i32> {
        self.statuses.iter().find(|s| s.kind == kind).map(|s| s.id)
    }

    fn attach_city(&self, mut pvz: PickupPoint) -> PickupPoint {
        pvz.city = self.cities.get(&pvz.city_id).map(|c| c.clone());
        pvz
    }

    fn attach_status(&self, mut reception: Reception) -> StorageResult<Reception> {
        reception.status = Some(self.status_kind(reception.status_id)?);
        Ok(reception)
    }

    fn attach_type(&self, mut product: Product) -> Product {
        product.product_type = self.product_types.get(&product.type_id).map(|t| t.name.clone());
        product
    }

    fn sorted_pickup_points(&self) -> Vec<PickupPoint> {
        let mut points: Vec<PickupPoint> =
            self.pickup_points.iter().map(|e| e.value().clone()).collect();
        points.sort_by(|a, b| {
            b.registration_date
                .cmp(&a.registration_date)
                .then_with(|| b.id.cmp(&a.id))
        });
        points
    }
}

impl Default for InMemoryRepositoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CityRepository for InMemoryRepositoryProvider {
    async fn find_by_name(&self, name: &str) -> StorageResult<Option<City>> {
        Ok(self
            .cities
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.value().clone()))
    }

    async fn find_by_id(&self, id: i32) -> StorageResult<Option<City>> {
        Ok(self.cities.get(&id).map(|c| c.clone()))
    }
}

#[async_trait]
impl PickupPointRepository for InMemoryRepositoryProvider {
    async fn create(&self, pickup_point: PickupPoint) -> StorageResult<PickupPoint> {
        match self.pickup_points.entry(pickup_point.id) {
            Entry::Occupied(_) => Err(StorageError::Duplicate(format!(
                "pickup_points.id = {}",
                pickup_point.id
            ))),
            Entry::Vacant(slot) => {
                let mut stored = pickup_point.clone();
                stored.city = None;
                slot.insert(stored);
                Ok(pickup_point)
            }
        }
    }

    async fn find_by_id(&self, id: Uuid) -> StorageResult<Option<PickupPoint>> {
        let found = self.pickup_points.get(&id).map(|p| p.clone());
        Ok(found.map(|p| self.attach_city(p)))
    }

    async fn list_by_date_and_city(
        &self,
        query: &PickupPointListQuery,
    ) -> StorageResult<Vec<PickupPoint>> {
        self.count_list_query();

        let mut points = self.sorted_pickup_points();
        if let Some((start, end)) = query.dates.bounds() {
            points.retain(|p| {
                self.receptions.iter().any(|r| {
                    r.pickup_point_id == p.id && r.date_time >= start && r.date_time <= end
                })
            });
        }

        Ok(points
            .into_iter()
            .skip(query.offset() as usize)
            .take(query.limit() as usize)
            .map(|p| self.attach_city(p))
            .collect())
    }

    async fn list_all(&self) -> StorageResult<Vec<PickupPoint>> {
        self.count_list_query();
        Ok(self
            .sorted_pickup_points()
            .into_iter()
            .map(|p| self.attach_city(p))
            .collect())
    }
}

#[async_trait]
impl ReceptionStatusRepository for InMemoryRepositoryProvider {
    async fn find_by_kind(
        &self,
        kind: ReceptionStatusKind,
    ) -> StorageResult<Option<ReceptionStatus>> {
        Ok(self.statuses.iter().find(|s| s.kind == kind).copied())
    }
}

#[async_trait]
impl ReceptionRepository for InMemoryRepositoryProvider {
    async fn create(&self, reception: Reception) -> StorageResult<Reception> {
        let kind = self.status_kind(reception.status_id)?;
        let mut stored = reception.clone();
        stored.status = None;

        if kind == ReceptionStatusKind::InProgress {
            match self.active.entry(reception.pickup_point_id) {
                Entry::Occupied(_) => {
                    return Err(StorageError::Duplicate(format!(
                        "in-progress reception for pickup point {}",
                        reception.pickup_point_id
                    )))
                }
                Entry::Vacant(slot) => {
                    slot.insert(reception.id);
                    self.receptions.insert(reception.id, stored);
                }
            }
        } else {
            self.receptions.insert(reception.id, stored);
        }

        Ok(reception)
    }

    async fn find_by_status(
        &self,
        kind: ReceptionStatusKind,
        pickup_point_id: Uuid,
    ) -> StorageResult<Option<Reception>> {
        let Some(status_id) = self.status_id(kind) else {
            return Ok(None);
        };

        let found = if kind == ReceptionStatusKind::InProgress {
            let active_id = self.active.get(&pickup_point_id).map(|id| *id);
            active_id.and_then(|id| self.receptions.get(&id).map(|r| r.clone()))
        } else {
            self.receptions
                .iter()
                .filter(|r| r.pickup_point_id == pickup_point_id && r.status_id == status_id)
                .max_by_key(|r| r.date_time)
                .map(|r| r.value().clone())
        };

        found.map(|r| self.attach_status(r)).transpose()
    }

    async fn update_status(
        &self,
        id: Uuid,
        from_status_id: i32,
        to_status_id: i32,
    ) -> StorageResult<Option<Reception>> {
        let was_active = self.status_kind(from_status_id)? == ReceptionStatusKind::InProgress;
        let becomes_active = self.status_kind(to_status_id)? == ReceptionStatusKind::InProgress;

        let pickup_point_id = match self.receptions.get(&id) {
            Some(r) if r.status_id == from_status_id => r.pickup_point_id,
            _ => return Ok(None),
        };

        // The active index decides races on the in-progress slot
        if was_active && !becomes_active {
            let released = self
                .active
                .remove_if(&pickup_point_id, |_, active_id| *active_id == id);
            if released.is_none() {
                return Ok(None);
            }
        } else if becomes_active && !was_active {
            match self.active.entry(pickup_point_id) {
                Entry::Occupied(_) => {
                    return Err(StorageError::Duplicate(format!(
                        "in-progress reception for pickup point {}",
                        pickup_point_id
                    )))
                }
                Entry::Vacant(slot) => {
                    slot.insert(id);
                }
            }
        }

        let updated = match self.receptions.get_mut(&id) {
            Some(mut r) if r.status_id == from_status_id => {
                r.status_id = to_status_id;
                r.clone()
            }
            _ => return Ok(None),
        };

        Ok(Some(updated))
    }

    async fn list_by_pickup_point_ids_with_status(
        &self,
        pickup_point_ids: &[Uuid],
    ) -> StorageResult<Vec<Reception>> {
        self.count_list_query();

        let mut receptions: Vec<Reception> = self
            .receptions
            .iter()
            .filter(|r| pickup_point_ids.contains(&r.pickup_point_id))
            .map(|r| r.value().clone())
            .collect();
        receptions.sort_by(|a, b| a.date_time.cmp(&b.date_time).then_with(|| a.id.cmp(&b.id)));

        receptions
            .into_iter()
            .map(|r| self.attach_status(r))
            .collect()
    }
}

#[async_trait]
impl ProductTypeRepository for InMemoryRepositoryProvider {
    async fn find_by_name(&self, name: &str) -> StorageResult<Option<ProductType>> {
        Ok(self
            .product_types
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.value().clone()))
    }
}

#[async_trait]
impl ProductRepository for InMemoryRepositoryProvider {
    async fn create(&self, product: Product) -> StorageResult<Option<Product>> {
        let pickup_point_id = match self.receptions.get(&product.reception_id) {
            Some(r) => r.pickup_point_id,
            None => return Ok(None),
        };

        // Holding the active entry blocks a concurrent close until the insert lands
        let Some(active) = self.active.get(&pickup_point_id) else {
            return Ok(None);
        };
        if *active != product.reception_id {
            return Ok(None);
        }

        let mut stored = product.clone();
        stored.product_type = None;
        self.products.insert(product.id, stored);
        drop(active);

        Ok(Some(product))
    }

    async fn last_in_reception(&self, reception_id: Uuid) -> StorageResult<Option<Product>> {
        let last = self
            .products
            .iter()
            .filter(|p| p.reception_id == reception_id)
            .max_by_key(|p| p.recency_key())
            .map(|p| p.value().clone());
        Ok(last.map(|p| self.attach_type(p)))
    }

    async fn delete(&self, id: Uuid) -> StorageResult<bool> {
        Ok(self.products.remove(&id).is_some())
    }

    async fn list_by_reception_ids_with_type(
        &self,
        reception_ids: &[Uuid],
    ) -> StorageResult<Vec<Product>> {
        self.count_list_query();

        let mut products: Vec<Product> = self
            .products
            .iter()
            .filter(|p| reception_ids.contains(&p.reception_id))
            .map(|p| p.value().clone())
            .collect();
        products.sort_by_key(|p| p.recency_key());

        Ok(products.into_iter().map(|p| self.attach_type(p)).collect())
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn cities(&self) -> &dyn CityRepository {
        self
    }

    fn pickup_points(&self) -> &dyn PickupPointRepository {
        self
    }

    fn reception_statuses(&self) -> &dyn ReceptionStatusRepository {
        self
    }

    fn receptions(&self) -> &dyn ReceptionRepository {
        self
    }

    fn product_types(&self) -> &dyn ProductTypeRepository {
        self
    }

    fn products(&self) -> &dyn ProductRepository {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn in_progress() -> ReceptionStatus {
        ReceptionStatus {
            id: seed::IN_PROGRESS_STATUS_ID,
            kind: ReceptionStatusKind::InProgress,
        }
    }

    #[tokio::test]
    async fn duplicate_pickup_point_is_rejected() {
        let store = InMemoryRepositoryProvider::new();
        let pvz = PickupPoint::new(Uuid::new_v4(), Utc::now(), City::new(1, "Москва"));

        PickupPointRepository::create(&store, pvz.clone()).await.unwrap();
        let err = PickupPointRepository::create(&store, pvz).await.unwrap_err();
        assert!(err.is_duplicate());
    }

    #[tokio::test]
    async fn second_in_progress_reception_is_rejected() {
        let store = InMemoryRepositoryProvider::new();
        let pvz = Uuid::new_v4();

        ReceptionRepository::create(&store, Reception::open(pvz, Utc::now(), in_progress()))
            .await
            .unwrap();
        let err = ReceptionRepository::create(&store, Reception::open(pvz, Utc::now(), in_progress()))
            .await
            .unwrap_err();
        assert!(err.is_duplicate());
    }

    #[tokio::test]
    async fn closing_frees_the_active_slot() {
        let store = InMemoryRepositoryProvider::new();
        let pvz = Uuid::new_v4();
        let first = ReceptionRepository::create(&store, Reception::open(pvz, Utc::now(), in_progress()))
            .await
            .unwrap();

        let closed = store
            .update_status(first.id, seed::IN_PROGRESS_STATUS_ID, seed::CLOSED_STATUS_ID)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(closed.status_id, seed::CLOSED_STATUS_ID);
        assert!(store
            .find_by_status(ReceptionStatusKind::InProgress, pvz)
            .await
            .unwrap()
            .is_none());

        ReceptionRepository::create(&store, Reception::open(pvz, Utc::now(), in_progress()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn update_of_missing_reception_is_none() {
        let store = InMemoryRepositoryProvider::new();
        let updated = store
            .update_status(Uuid::new_v4(), seed::IN_PROGRESS_STATUS_ID, seed::CLOSED_STATUS_ID)
            .await
            .unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn second_close_of_same_reception_is_none() {
        let store = InMemoryRepositoryProvider::new();
        let pvz = Uuid::new_v4();
        let reception =
            ReceptionRepository::create(&store, Reception::open(pvz, Utc::now(), in_progress()))
                .await
                .unwrap();

        let close = || {
            store.update_status(reception.id, seed::IN_PROGRESS_STATUS_ID, seed::CLOSED_STATUS_ID)
        };
        assert!(close().await.unwrap().is_some());
        assert!(close().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_reports_missing_rows() {
        let store = InMemoryRepositoryProvider::new();
        let reception =
            ReceptionRepository::create(&store, Reception::open(Uuid::new_v4(), Utc::now(), in_progress()))
                .await
                .unwrap();
        let kind = ProductType::new(1, "электроника");
        let product = ProductRepository::create(&store, Product::new(reception.id, Utc::now(), &kind))
            .await
            .unwrap()
            .unwrap();

        assert!(store.delete(product.id).await.unwrap());
        assert!(!store.delete(product.id).await.unwrap());
    }

    #[tokio::test]
    async fn product_needs_in_progress_reception() {
        let store = InMemoryRepositoryProvider::new();
        let kind = ProductType::new(2, "одежда");
        let reception =
            ReceptionRepository::create(&store, Reception::open(Uuid::new_v4(), Utc::now(), in_progress()))
                .await
                .unwrap();

        let orphan = ProductRepository::create(&store, Product::new(Uuid::new_v4(), Utc::now(), &kind))
            .await
            .unwrap();
        assert!(orphan.is_none());

        store
            .update_status(reception.id, seed::IN_PROGRESS_STATUS_ID, seed::CLOSED_STATUS_ID)
            .await
            .unwrap()
            .unwrap();
        let late = ProductRepository::create(&store, Product::new(reception.id, Utc::now(), &kind))
            .await
            .unwrap();
        assert!(late.is_none());
        assert!(store.last_in_reception(reception.id).await.unwrap().is_none());
    }
}
