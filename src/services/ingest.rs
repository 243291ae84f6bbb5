//! CSV ingest: parse, upsert, invalidate.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::cache::CacheLayer;
use crate::db::Store;
use crate::models::course::CourseUpsert;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for IngestError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

#[derive(Debug, Serialize)]
pub struct IngestSummary {
    pub ingested: usize,
    pub cache_cleared: u64,
}

#[derive(Clone)]
pub struct IngestService {
    store: Store,
    cache: Arc<CacheLayer>,
}

impl IngestService {
    #[must_use]
    pub const fn new(store: Store, cache: Arc<CacheLayer>) -> Self {
        Self { store, cache }
    }

    /// Upsert every row of a CSV payload, then drop all cache namespaces.
    /// Any malformed row rejects the whole file; nothing is written. A
    /// header-only file commits zero rows and reports that count.
    pub async fn ingest_csv(&self, data: &[u8]) -> Result<IngestSummary, IngestError> {
        let rows = parse_rows(data)?;

        let ingested = self.store.upsert_courses(&rows).await?;
        let cache_cleared = self.cache.clear_all_namespaces().await;

        info!("Ingested {ingested} courses, cleared {cache_cleared} cache keys");

        Ok(IngestSummary {
            ingested,
            cache_cleared,
        })
    }

    /// Seed the catalog from a CSV on disk, used at startup.
    pub async fn ingest_file(&self, path: &Path) -> anyhow::Result<IngestSummary> {
        let data = tokio::fs::read(path).await?;
        let summary = self.ingest_csv(&data).await?;
        info!(
            "Auto-ingested {} courses from {}",
            summary.ingested,
            path.display()
        );
        Ok(summary)
    }
}

fn parse_rows(data: &[u8]) -> Result<Vec<CourseUpsert>, IngestError> {
    let mut reader = csv::Reader::from_reader(data);
    let mut rows = Vec::new();
    for record in reader.deserialize::<CourseUpsert>() {
        rows.push(record?);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
course_id,course_name,department,level,delivery_mode,credits,duration_weeks,rating,tuition_fee_inr,year_offered
1,Intro to Programming,CS,UG,online,4,12,4.5,40000,2024
2,Linear Algebra,Math,UG,offline,3,10,4.2,35000,2023
";

    #[test]
    fn parses_well_formed_csv() {
        let rows = parse_rows(SAMPLE.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].course_id, 1);
        assert_eq!(rows[0].tuition_fee, 40000);
        assert_eq!(rows[1].department, "Math");
    }

    #[test]
    fn rejects_malformed_row() {
        let bad = "\
course_id,course_name,department,level,delivery_mode,credits,duration_weeks,rating,tuition_fee_inr,year_offered
1,Intro,CS,UG,online,four,12,4.5,40000,2024
";
        assert!(matches!(
            parse_rows(bad.as_bytes()),
            Err(IngestError::Csv(_))
        ));
    }

    #[test]
    fn header_only_csv_yields_no_rows() {
        let header = "course_id,course_name,department,level,delivery_mode,credits,duration_weeks,rating,tuition_fee_inr,year_offered\n";
        assert!(parse_rows(header.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn accepts_plain_tuition_fee_header() {
        let alt = "\
course_id,course_name,department,level,delivery_mode,credits,duration_weeks,rating,tuition_fee,year_offered
3,Microeconomics,Economics,PG,hybrid,3,8,4.0,55000,2024
";
        let rows = parse_rows(alt.as_bytes()).unwrap();
        assert_eq!(rows[0].tuition_fee, 55000);
    }
}
