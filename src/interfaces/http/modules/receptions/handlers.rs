//! Reception handlers

use axum::{extract::State, http::StatusCode, Json};

use super::dto::{CreateReceptionRequest, ReceptionDto};
use crate::interfaces::http::common::{ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::router::AppState;

#[utoipa::path(
    post,
    path = "/api/v1/receptions",
    tag = "Receptions",
    request_body = CreateReceptionRequest,
    responses(
        (status = 201, description = "Reception opened", body = ApiResponse<ReceptionDto>),
        (status = 404, description = "Pickup point not found"),
        (status = 409, description = "A reception is already in progress")
    )
)]
pub async fn create_reception(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateReceptionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ReceptionDto>>), ApiError> {
    let reception = state.lifecycle.open(request.pvz_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(ReceptionDto::from(reception))),
    ))
}
