//! Product handlers

use axum::{extract::State, http::StatusCode, Json};

use super::dto::{CreateProductRequest, ProductDto};
use crate::interfaces::http::common::{ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::router::AppState;

#[utoipa::path(
    post,
    path = "/api/v1/products",
    tag = "Products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product added", body = ApiResponse<ProductDto>),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Unknown product type"),
        (status = 409, description = "No reception in progress")
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateProductRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ProductDto>>), ApiError> {
    let product = state
        .ledger
        .add(request.pvz_id, &request.product_type)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(ProductDto::from(product))),
    ))
}
