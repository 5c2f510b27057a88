//! Pickup point DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::application::{PickupPointOverview, ReceptionOverview};
use crate::domain::PickupPoint;
use crate::interfaces::http::modules::products::ProductDto;
use crate::interfaces::http::modules::receptions::ReceptionDto;
use crate::shared::{DateRangeFilter, PaginationParams, DEFAULT_LIMIT, DEFAULT_PAGE};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PvzDto {
    pub id: Uuid,
    pub registration_date: DateTime<Utc>,
    pub city: Option<String>,
}

impl From<PickupPoint> for PvzDto {
    fn from(p: PickupPoint) -> Self {
        Self {
            id: p.id,
            registration_date: p.registration_date,
            city: p.city.map(|c| c.name),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePvzRequest {
    /// Caller-assigned identifier
    pub id: Uuid,
    #[validate(length(min = 1, message = "city is required"))]
    pub city: String,
    /// Defaults to the current time
    pub registration_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReceptionOverviewDto {
    pub reception: ReceptionDto,
    pub products: Vec<ProductDto>,
}

impl From<ReceptionOverview> for ReceptionOverviewDto {
    fn from(r: ReceptionOverview) -> Self {
        Self {
            reception: r.reception.into(),
            products: r.products.into_iter().map(ProductDto::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PvzOverviewDto {
    pub pvz: PvzDto,
    pub receptions: Vec<ReceptionOverviewDto>,
}

impl From<PickupPointOverview> for PvzOverviewDto {
    fn from(o: PickupPointOverview) -> Self {
        Self {
            pvz: o.pickup_point.into(),
            receptions: o
                .receptions
                .into_iter()
                .map(ReceptionOverviewDto::from)
                .collect(),
        }
    }
}

/// Overview query: both dates must be set for the filter to apply
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListPvzParams {
    /// Inclusive lower bound on reception date (RFC 3339)
    pub start_date: Option<DateTime<Utc>>,
    /// Inclusive upper bound on reception date (RFC 3339)
    pub end_date: Option<DateTime<Utc>>,
    /// Page number, starting at 1
    #[serde(default = "default_page")]
    pub page: u32,
    /// Page size, 1..=30
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl ListPvzParams {
    pub fn filter(&self) -> DateRangeFilter {
        DateRangeFilter::new(self.start_date, self.end_date)
    }

    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::new(self.page, self.limit)
    }
}

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}
