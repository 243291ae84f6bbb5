use crate::entities::{course, prelude::*};
use crate::models::course::CourseUpsert;
use crate::models::filter::FilterSet;
use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, QueryTrait, Select, Set, TransactionTrait,
};
use tracing::info;

pub struct CourseRepository {
    conn: DatabaseConnection,
}

impl CourseRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Fold the present filter dimensions onto a select. Each predicate is
    /// applied only when its dimension is set; filters compose as AND.
    fn apply_filters(select: Select<Course>, f: &FilterSet) -> Select<Course> {
        select
            .apply_if(f.department.clone(), |s, v| {
                s.filter(course::Column::Department.eq(v))
            })
            .apply_if(f.level, |s, v| s.filter(course::Column::Level.eq(v.as_str())))
            .apply_if(f.delivery_mode, |s, v| {
                s.filter(course::Column::DeliveryMode.eq(v.as_str()))
            })
            // SQLite LIKE is case-insensitive for ASCII, which is the
            // contains-match contract here.
            .apply_if(f.q.clone(), |s, v| {
                s.filter(course::Column::CourseName.contains(v))
            })
            .apply_if(f.min_rating, |s, v| s.filter(course::Column::Rating.gte(v)))
            .apply_if(f.max_rating, |s, v| s.filter(course::Column::Rating.lte(v)))
            .apply_if(f.max_fee, |s, v| s.filter(course::Column::TuitionFee.lte(v)))
            .apply_if(f.min_credits, |s, v| s.filter(course::Column::Credits.gte(v)))
            .apply_if(f.max_credits, |s, v| s.filter(course::Column::Credits.lte(v)))
            .apply_if(f.min_duration_weeks, |s, v| {
                s.filter(course::Column::DurationWeeks.gte(v))
            })
            .apply_if(f.max_duration_weeks, |s, v| {
                s.filter(course::Column::DurationWeeks.lte(v))
            })
            .apply_if(f.year, |s, v| s.filter(course::Column::YearOffered.eq(v)))
    }

    /// One page of matches plus the total count. Ordered by rating
    /// descending, then fee ascending. An offset past the total yields an
    /// empty page, not an error.
    pub async fn list(
        &self,
        filter: &FilterSet,
        page: u64,
        page_size: u64,
    ) -> Result<(Vec<course::Model>, u64)> {
        let total = Self::apply_filters(Course::find(), filter)
            .count(&self.conn)
            .await?;

        // Saturating arithmetic keeps absurd page numbers from wrapping;
        // any offset at or past the total is an empty page.
        let offset = page.saturating_sub(1).saturating_mul(page_size);
        if offset >= total {
            return Ok((Vec::new(), total));
        }

        let items = Self::apply_filters(Course::find(), filter)
            .order_by_desc(course::Column::Rating)
            .order_by_asc(course::Column::TuitionFee)
            .offset(offset)
            .limit(page_size)
            .all(&self.conn)
            .await?;

        Ok((items, total))
    }

    pub async fn by_course_ids(&self, course_ids: &[i32]) -> Result<Vec<course::Model>> {
        if course_ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(Course::find()
            .filter(course::Column::CourseId.is_in(course_ids.to_vec()))
            .order_by_asc(course::Column::CourseId)
            .all(&self.conn)
            .await?)
    }

    /// Distinct (departments, levels, delivery modes) observed in the
    /// catalog, each sorted for stable output.
    pub async fn distinct_meta(&self) -> Result<(Vec<String>, Vec<String>, Vec<String>)> {
        let departments = self.distinct_column(course::Column::Department).await?;
        let levels = self.distinct_column(course::Column::Level).await?;
        let delivery_modes = self.distinct_column(course::Column::DeliveryMode).await?;
        Ok((departments, levels, delivery_modes))
    }

    async fn distinct_column(&self, column: course::Column) -> Result<Vec<String>> {
        Ok(Course::find()
            .select_only()
            .column(column)
            .distinct()
            .order_by_asc(column)
            .into_tuple::<String>()
            .all(&self.conn)
            .await?)
    }

    /// Upsert rows keyed on the external `course_id`, all in one
    /// transaction so a failed ingest never leaves a partial catalog.
    pub async fn upsert_many(&self, rows: &[CourseUpsert]) -> Result<usize> {
        let txn = self.conn.begin().await?;

        for row in rows {
            let active = course::ActiveModel {
                course_id: Set(row.course_id),
                course_name: Set(row.course_name.clone()),
                department: Set(row.department.clone()),
                level: Set(row.level.clone()),
                delivery_mode: Set(row.delivery_mode.clone()),
                credits: Set(row.credits),
                duration_weeks: Set(row.duration_weeks),
                rating: Set(row.rating),
                tuition_fee: Set(row.tuition_fee),
                year_offered: Set(row.year_offered),
                ..Default::default()
            };

            Course::insert(active)
                .on_conflict(
                    sea_orm::sea_query::OnConflict::column(course::Column::CourseId)
                        .update_columns([
                            course::Column::CourseName,
                            course::Column::Department,
                            course::Column::Level,
                            course::Column::DeliveryMode,
                            course::Column::Credits,
                            course::Column::DurationWeeks,
                            course::Column::Rating,
                            course::Column::TuitionFee,
                            course::Column::YearOffered,
                        ])
                        .to_owned(),
                )
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;

        info!("Upserted {} course rows", rows.len());
        Ok(rows.len())
    }
}
