use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// External identifier; upserts are keyed on this, not on `id`.
    #[sea_orm(unique)]
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

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
