pub mod config;
pub mod format;
pub mod handlers;
pub mod models;
pub mod render;
pub mod state;
pub mod system_monitor;

use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

use state::AppState;

/// OpenAPI description of the HTTP surface. Built in code only; not served.
#[derive(OpenApi)]
#[openapi(
    info(title = "webui-status", description = "Kali Linux GUI host status sidecar"),
    paths(handlers::index, handlers::api_stats),
    components(schemas(models::SystemStats, models::UsageStats)),
    tags((name = "system", description = "Host resource usage"))
)]
pub struct ApiDoc;

/// Build the application router with the given state.
/// Extracted from `main()` so integration tests can construct the app
/// without binding to a network port.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/stats", get(handlers::api_stats))
        .with_state(state)
}
