use axum::{
    Json,
    extract::{Multipart, State},
    http::HeaderMap,
};

use super::ApiError;
use super::types::ApiResponse;
use crate::services::IngestSummary;
use crate::state::AppState;

pub const INGEST_TOKEN_HEADER: &str = "x-ingest-token";

pub fn check_token(headers: &HeaderMap, header_name: &str, expected: &str) -> Result<(), ApiError> {
    let presented = headers
        .get(header_name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if presented != expected {
        return Err(ApiError::unauthorized(format!(
            "Missing or invalid {header_name} header"
        )));
    }

    Ok(())
}

/// Accepts a multipart upload with a single CSV part named `file`.
pub async fn ingest_csv(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<IngestSummary>>, ApiError> {
    check_token(&headers, INGEST_TOKEN_HEADER, &state.config.ingest.token)?;

    let mut data = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            data = Some(field.bytes().await.map_err(|e| {
                ApiError::validation(format!("Failed to read uploaded file: {e}"))
            })?);
        }
    }

    let data = data.ok_or_else(|| ApiError::validation("Missing multipart field 'file'"))?;

    let summary = state.ingest.ingest_csv(&data).await?;

    Ok(Json(ApiResponse::success(summary)))
}
