use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use super::types::ApiResponse;
use super::ApiError;
use super::validation::{parse_compare_ids, validate_pagination};
use crate::models::course::{CoursePage, CourseRecord, MetaSummary};
use crate::models::filter::{DeliveryMode, FilterSet, Level};
use crate::state::AppState;

const fn default_page() -> u64 {
    1
}

const fn default_page_size() -> u64 {
    10
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    pub department: Option<String>,
    pub level: Option<Level>,
    pub delivery_mode: Option<DeliveryMode>,
    pub min_credits: Option<i32>,
    pub max_credits: Option<i32>,
    pub min_duration_weeks: Option<i32>,
    pub max_duration_weeks: Option<i32>,
    pub max_fee: Option<i32>,
    pub min_rating: Option<f32>,
    pub q: Option<String>,
    pub year: Option<i32>,
}

impl ListQuery {
    fn into_filter(self) -> FilterSet {
        FilterSet {
            department: self.department,
            delivery_mode: self.delivery_mode,
            level: self.level,
            max_credits: self.max_credits,
            max_duration_weeks: self.max_duration_weeks,
            max_fee: self.max_fee,
            // A rating ceiling is only reachable through the question parser.
            max_rating: None,
            min_credits: self.min_credits,
            min_duration_weeks: self.min_duration_weeks,
            min_rating: self.min_rating,
            q: self.q,
            year: self.year,
        }
    }
}

pub async fn list_courses(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<ApiResponse<CoursePage>>, ApiError> {
    let (page, page_size) = validate_pagination(params.page, params.page_size)?;
    let filter = params.into_filter();

    let result = state.catalog.list(&filter, page, page_size).await?;

    Ok(Json(ApiResponse::success(result)))
}

#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    pub ids: String,
}

pub async fn compare_courses(
    State(state): State<AppState>,
    Query(params): Query<CompareQuery>,
) -> Result<Json<ApiResponse<Vec<CourseRecord>>>, ApiError> {
    let ids = parse_compare_ids(&params.ids);

    let records = state.catalog.compare(&ids).await?;

    Ok(Json(ApiResponse::success(records)))
}

pub async fn get_meta(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<MetaSummary>>, ApiError> {
    let summary = state.catalog.meta().await?;

    Ok(Json(ApiResponse::success(summary)))
}
