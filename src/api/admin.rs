use axum::{
    Json,
    extract::{Query, State},
    http::HeaderMap,
};
use serde::Deserialize;

use super::ApiError;
use super::ingest::check_token;
use super::types::{ApiResponse, CacheClearResult};
use crate::state::AppState;

pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

#[derive(Debug, Deserialize)]
pub struct ClearQuery {
    /// Namespace prefix to clear; all namespaces when absent.
    pub prefix: Option<String>,
}

pub async fn clear_cache(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<ClearQuery>,
) -> Result<Json<ApiResponse<CacheClearResult>>, ApiError> {
    check_token(&headers, ADMIN_TOKEN_HEADER, &state.config.ingest.token)?;

    let (cleared, prefix) = match params.prefix {
        Some(prefix) => (state.cache.clear_prefix(&prefix).await, prefix),
        None => (state.cache.clear_all_namespaces().await, "*".to_string()),
    };

    Ok(Json(ApiResponse::success(CacheClearResult {
        cleared,
        prefix,
    })))
}
