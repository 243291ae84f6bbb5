use axum::{Json, extract::State};

use super::ApiError;
use super::types::{ApiResponse, SystemStatus};
use crate::state::AppState;

pub async fn health(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SystemStatus>>, ApiError> {
    let database = match state.store.ping().await {
        Ok(()) => "ok".to_string(),
        Err(e) => {
            tracing::warn!("Health check database ping failed: {e}");
            "unreachable".to_string()
        }
    };

    let cache = if state.cache.has_primary() {
        "primary".to_string()
    } else {
        "fallback".to_string()
    };

    Ok(Json(ApiResponse::success(SystemStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime: state.start_time.elapsed().as_secs(),
        database,
        cache,
    })))
}
