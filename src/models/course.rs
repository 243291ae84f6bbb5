use serde::{Deserialize, Serialize};

use crate::entities::course;

/// Projection of a persisted course, safe to serialize into cache payloads
/// and API responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub id: i32,
    pub course_id: i32,
    pub course_name: String,
    pub department: String,
    pub level: String,
    pub delivery_mode: String,
    pub credits: i32,
    pub duration_weeks: i32,
    pub rating: f32,
    pub tuition_fee: i32,
    pub year_offered: i32,
}

impl From<course::Model> for CourseRecord {
    fn from(m: course::Model) -> Self {
        Self {
            id: m.id,
            course_id: m.course_id,
            course_name: m.course_name,
            department: m.department,
            level: m.level,
            delivery_mode: m.delivery_mode,
            credits: m.credits,
            duration_weeks: m.duration_weeks,
            rating: m.rating,
            tuition_fee: m.tuition_fee,
            year_offered: m.year_offered,
        }
    }
}

/// One page of list results plus the total match count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoursePage {
    pub items: Vec<CourseRecord>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
}

/// Distinct catalog values for client-side filter UIs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaSummary {
    pub departments: Vec<String>,
    pub levels: Vec<String>,
    pub delivery_modes: Vec<String>,
}

/// A row to upsert, keyed on the external `course_id`.
#[derive(Debug, Clone, Deserialize)]
pub struct CourseUpsert {
    pub course_id: i32,
    pub course_name: String,
    pub department: String,
    pub level: String,
    pub delivery_mode: String,
    pub credits: i32,
    pub duration_weeks: i32,
    pub rating: f32,
    #[serde(alias = "tuition_fee_inr")]
    pub tuition_fee: i32,
    pub year_offered: i32,
}
