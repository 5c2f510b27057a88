//! Product domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Product type reference row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductType {
    pub id: i32,
    pub name: String,
}

impl ProductType {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Single item logged into a reception.
///
/// Ids are UUID v7, so within one reception they sort in creation order.
/// `product_type` holds the resolved type name, `None` until resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub date_time: DateTime<Utc>,
    pub type_id: i32,
    pub product_type: Option<String>,
    pub reception_id: Uuid,
}

impl Product {
    pub fn new(reception_id: Uuid, date_time: DateTime<Utc>, product_type: &ProductType) -> Self {
        Self {
            id: Uuid::now_v7(),
            date_time,
            type_id: product_type.id,
            product_type: Some(product_type.name.clone()),
            reception_id,
        }
    }

    /// Ordering key for "most recently added"
    pub fn recency_key(&self) -> (DateTime<Utc>, Uuid) {
        (self.date_time, self.id)
    }
}
