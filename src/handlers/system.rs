// ---------------------------------------------------------------------------
// handlers/system.rs — Status page and stats API
// ---------------------------------------------------------------------------

use axum::extract::State;
use axum::response::Html;
use axum::Json;

use crate::models::SystemStats;
use crate::render::{render_html, render_json};
use crate::state::AppState;
use crate::system_monitor::SystemSnapshot;

use super::ApiError;

/// Sample the host on the blocking pool; the CPU window sleeps.
async fn collect(state: &AppState) -> Result<SystemSnapshot, ApiError> {
    let source = state.metrics.clone();
    let snapshot = tokio::task::spawn_blocking(move || source.collect())
        .await
        .map_err(|e| ApiError::Internal(format!("collector task failed: {}", e)))??;
    Ok(snapshot)
}

#[utoipa::path(get, path = "/", tag = "system",
    responses(
        (status = 200, description = "Human-readable status page", content_type = "text/html", body = String),
        (status = 500, description = "System statistics could not be read")
    )
)]
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let snap = collect(&state).await?;
    Ok(Html(render_html(&snap, &state.config)))
}

#[utoipa::path(get, path = "/api/stats", tag = "system",
    responses(
        (status = 200, description = "Current host resource usage", body = SystemStats),
        (status = 500, description = "System statistics could not be read")
    )
)]
pub async fn api_stats(State(state): State<AppState>) -> Result<Json<SystemStats>, ApiError> {
    let snap = collect(&state).await?;
    tracing::debug!(cpu = snap.cpu_percent, "stats collected");
    Ok(Json(render_json(&snap)))
}
