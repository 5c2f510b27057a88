//! Pickup point handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::dto::{CreatePvzRequest, ListPvzParams, PvzDto, PvzOverviewDto};
use crate::interfaces::http::common::{ApiError, ApiQuery, ApiResponse, ValidatedJson};
use crate::interfaces::http::modules::products::ProductDto;
use crate::interfaces::http::modules::receptions::ReceptionDto;
use crate::interfaces::http::router::AppState;

#[utoipa::path(
    post,
    path = "/api/v1/pvz",
    tag = "PVZ",
    request_body = CreatePvzRequest,
    responses(
        (status = 201, description = "Pickup point registered", body = ApiResponse<PvzDto>),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "City not found"),
        (status = 409, description = "Pickup point id already taken")
    )
)]
pub async fn create_pvz(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreatePvzRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PvzDto>>), ApiError> {
    let pvz = state
        .directory
        .create(request.id, &request.city, request.registration_date)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(pvz.into()))))
}

#[utoipa::path(
    get,
    path = "/api/v1/pvz",
    tag = "PVZ",
    params(ListPvzParams),
    responses(
        (status = 200, description = "Pickup points with receptions and products", body = ApiResponse<Vec<PvzOverviewDto>>),
        (status = 400, description = "Invalid pagination or date range")
    )
)]
pub async fn list_pvz(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListPvzParams>,
) -> Result<Json<ApiResponse<Vec<PvzOverviewDto>>>, ApiError> {
    let overviews = state
        .overview
        .list(params.filter(), params.pagination())
        .await?;
    Ok(Json(ApiResponse::success(
        overviews.into_iter().map(PvzOverviewDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/pvz/all",
    tag = "PVZ",
    responses(
        (status = 200, description = "Every pickup point, newest first", body = ApiResponse<Vec<PvzDto>>)
    )
)]
pub async fn list_all_pvz(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<PvzDto>>>, ApiError> {
    let all = state.directory.list_all().await?;
    Ok(Json(ApiResponse::success(
        all.into_iter().map(PvzDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/pvz/{pvz_id}",
    tag = "PVZ",
    params(("pvz_id" = Uuid, Path, description = "Pickup point id")),
    responses(
        (status = 200, description = "Pickup point", body = ApiResponse<PvzDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_pvz(
    State(state): State<AppState>,
    Path(pvz_id): Path<Uuid>,
) -> Result<Json<ApiResponse<PvzDto>>, ApiError> {
    let pvz = state.directory.get(pvz_id).await?;
    Ok(Json(ApiResponse::success(pvz.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/pvz/{pvz_id}/close_last_reception",
    tag = "PVZ",
    params(("pvz_id" = Uuid, Path, description = "Pickup point id")),
    responses(
        (status = 200, description = "Reception closed", body = ApiResponse<ReceptionDto>),
        (status = 409, description = "No reception in progress")
    )
)]
pub async fn close_last_reception(
    State(state): State<AppState>,
    Path(pvz_id): Path<Uuid>,
) -> Result<Json<ApiResponse<ReceptionDto>>, ApiError> {
    let reception = state.lifecycle.close(pvz_id).await?;
    Ok(Json(ApiResponse::success(reception.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/pvz/{pvz_id}/delete_last_product",
    tag = "PVZ",
    params(("pvz_id" = Uuid, Path, description = "Pickup point id")),
    responses(
        (status = 200, description = "Removed product", body = ApiResponse<ProductDto>),
        (status = 404, description = "Pickup point not found or nothing to remove"),
        (status = 409, description = "No reception in progress")
    )
)]
pub async fn delete_last_product(
    State(state): State<AppState>,
    Path(pvz_id): Path<Uuid>,
) -> Result<Json<ApiResponse<ProductDto>>, ApiError> {
    let product = state.ledger.remove_last(pvz_id).await?;
    Ok(Json(ApiResponse::success(product.into())))
}
