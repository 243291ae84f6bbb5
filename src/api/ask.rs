use axum::{Json, extract::State};
use serde::Deserialize;

use super::ApiError;
use super::types::ApiResponse;
use super::validation::validate_question;
use crate::services::AskOutcome;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

pub async fn ask(
    State(state): State<AppState>,
    Json(req): Json<AskRequest>,
) -> Result<Json<ApiResponse<AskOutcome>>, ApiError> {
    let question = validate_question(&req.question)?;

    let outcome = state.catalog.ask(question).await?;

    Ok(Json(ApiResponse::success(outcome)))
}
