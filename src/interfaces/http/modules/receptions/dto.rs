//! Reception DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::domain::Reception;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReceptionDto {
    pub id: Uuid,
    pub date_time: DateTime<Utc>,
    pub pvz_id: Uuid,
    /// `in_progress` or `closed`
    pub status: Option<String>,
}

impl From<Reception> for ReceptionDto {
    fn from(r: Reception) -> Self {
        Self {
            id: r.id,
            date_time: r.date_time,
            pvz_id: r.pickup_point_id,
            status: r.status.map(|s| s.to_string()),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReceptionRequest {
    pub pvz_id: Uuid,
}
