//! Pickup point domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::city::City;
use crate::shared::{DateRangeFilter, PaginationParams};

/// A physical location receiving shipped goods.
///
/// `city` stays `None` until the city reference has been resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickupPoint {
    pub id: Uuid,
    pub registration_date: DateTime<Utc>,
    pub city_id: i32,
    pub city: Option<City>,
}

impl PickupPoint {
    pub fn new(id: Uuid, registration_date: DateTime<Utc>, city: City) -> Self {
        Self {
            id,
            registration_date,
            city_id: city.id,
            city: Some(city),
        }
    }

    pub fn with_city(mut self, city: City) -> Self {
        self.city_id = city.id;
        self.city = Some(city);
        self
    }

    pub fn city_name(&self) -> Option<&str> {
        self.city.as_ref().map(|c| c.name.as_str())
    }
}

/// Page of pickup points, optionally restricted to those having a reception
/// inside a date window.
#[derive(Debug, Clone, Copy, Default)]
pub struct PickupPointListQuery {
    pub pagination: PaginationParams,
    pub dates: DateRangeFilter,
}

impl PickupPointListQuery {
    pub fn new(pagination: PaginationParams, dates: DateRangeFilter) -> Self {
        Self { pagination, dates }
    }

    pub fn offset(&self) -> u64 {
        self.pagination.offset()
    }

    pub fn limit(&self) -> u64 {
        self.pagination.limit as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_attaches_city() {
        let pvz = PickupPoint::new(Uuid::new_v4(), Utc::now(), City::new(2, "Казань"));
        assert_eq!(pvz.city_id, 2);
        assert_eq!(pvz.city_name(), Some("Казань"));
    }

    #[test]
    fn query_offsets_by_page() {
        let query = PickupPointListQuery::new(PaginationParams::new(3, 2), DateRangeFilter::default());
        assert_eq!(query.offset(), 4);
        assert_eq!(query.limit(), 2);
    }
}
