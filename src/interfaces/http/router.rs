//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::common::ApiResponse;
use super::modules::health::{self, ComponentHealth, HealthResponse, HealthState};
use super::modules::metrics::{self, MetricsState};
use super::modules::products::{self, CreateProductRequest, ProductDto};
use super::modules::pvz::{self, CreatePvzRequest, PvzDto, PvzOverviewDto, ReceptionOverviewDto};
use super::modules::receptions::{self, CreateReceptionRequest, ReceptionDto};
use super::modules::request_id::request_id_middleware;
use crate::application::{InventoryLedger, OverviewAggregator, PickupPointDirectory, ReceptionLifecycle};
use crate::domain::RepositoryProvider;
use crate::shared::SharedClock;

/// Services shared by the pickup point, reception and product handlers
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<PickupPointDirectory>,
    pub lifecycle: Arc<ReceptionLifecycle>,
    pub ledger: Arc<InventoryLedger>,
    pub overview: Arc<OverviewAggregator>,
}

impl AppState {
    pub fn new(repos: Arc<dyn RepositoryProvider>, clock: SharedClock) -> Self {
        Self {
            directory: Arc::new(PickupPointDirectory::with_clock(repos.clone(), clock.clone())),
            lifecycle: Arc::new(ReceptionLifecycle::with_clock(repos.clone(), clock.clone())),
            ledger: Arc::new(InventoryLedger::with_clock(repos.clone(), clock)),
            overview: Arc::new(OverviewAggregator::new(repos)),
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        pvz::create_pvz,
        pvz::list_pvz,
        pvz::list_all_pvz,
        pvz::get_pvz,
        pvz::close_last_reception,
        pvz::delete_last_product,
        receptions::create_reception,
        products::create_product,
    ),
    components(
        schemas(
            ApiResponse<String>,
            HealthResponse,
            ComponentHealth,
            PvzDto,
            CreatePvzRequest,
            PvzOverviewDto,
            ReceptionOverviewDto,
            ReceptionDto,
            CreateReceptionRequest,
            ProductDto,
            CreateProductRequest,
        )
    ),
    tags(
        (name = "Health", description = "Проверка состояния сервера и подключения к базе данных."),
        (name = "PVZ", description = "Пункты выдачи заказов: регистрация, просмотр с приёмками и товарами, закрытие приёмки и удаление последнего товара."),
        (name = "Receptions", description = "Приёмки товаров. На одном ПВЗ одновременно может быть открыта только одна приёмка (`in_progress`)."),
        (name = "Products", description = "Товары в открытой приёмке. Типы: `электроника`, `одежда`, `обувь`."),
    ),
    info(
        title = "PVZ Service API",
        version = "1.0.0",
        description = "REST API для учёта приёмок товаров на пунктах выдачи заказов.

## Формат ответов

Все REST-ответы обёрнуты в стандартную оболочку:
```json
{\"success\": true, \"data\": {...}}
```

При ошибке:
```json
{\"success\": false, \"data\": null, \"error\": \"описание ошибки\"}
```

## Пагинация

`GET /api/v1/pvz` принимает `page` (от 1) и `limit` (1–30, по умолчанию 10).
Фильтр `startDate`/`endDate` применяется только если заданы обе даты.",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
///
/// `metrics_handle` is `None` when the Prometheus exporter is disabled; the
/// `/metrics` route and the request metrics middleware are then left out.
pub fn create_api_router(
    state: AppState,
    db: Option<DatabaseConnection>,
    metrics_handle: Option<PrometheusHandle>,
) -> Router {
    let api_routes = Router::new()
        .route("/api/v1/pvz", get(pvz::list_pvz).post(pvz::create_pvz))
        .route("/api/v1/pvz/all", get(pvz::list_all_pvz))
        .route("/api/v1/pvz/{pvz_id}", get(pvz::get_pvz))
        .route(
            "/api/v1/pvz/{pvz_id}/close_last_reception",
            post(pvz::close_last_reception),
        )
        .route(
            "/api/v1/pvz/{pvz_id}/delete_last_product",
            post(pvz::delete_last_product),
        )
        .route("/api/v1/receptions", post(receptions::create_reception))
        .route("/api/v1/products", post(products::create_product))
        .with_state(state);

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(HealthState {
            db,
            started_at: Arc::new(Instant::now()),
        });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .merge(health_routes)
        .merge(api_routes);

    if let Some(handle) = metrics_handle {
        let metrics_routes = Router::new()
            .route("/metrics", get(metrics::prometheus_metrics))
            .with_state(MetricsState { handle });
        router = router
            .merge(metrics_routes)
            .route_layer(middleware::from_fn(metrics::http_metrics_middleware));
    }

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}
