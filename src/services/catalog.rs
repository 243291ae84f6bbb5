//! Read-side orchestration: cache lookup, query execution, cache fill.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::cache::{CacheLayer, keys};
use crate::config::CacheConfig;
use crate::db::Store;
use crate::models::course::{CoursePage, CourseRecord, MetaSummary};
use crate::models::filter::FilterSet;
use crate::parser::parse_question;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for CatalogError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Answer to a free-text question: the filters that were understood plus
/// the first page of results.
#[derive(Debug, Serialize, Deserialize)]
pub struct AskOutcome {
    pub parsed_filters: FilterSet,
    pub results: CoursePage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Clone)]
pub struct CatalogService {
    store: Store,
    cache: Arc<CacheLayer>,
    ttl: CacheConfig,
}

impl CatalogService {
    #[must_use]
    pub const fn new(store: Store, cache: Arc<CacheLayer>, ttl: CacheConfig) -> Self {
        Self { store, cache, ttl }
    }

    /// Filtered, paginated listing. Results are cached per composed key;
    /// a hit skips the store entirely.
    pub async fn list(
        &self,
        filter: &FilterSet,
        page: u64,
        page_size: u64,
    ) -> Result<CoursePage, CatalogError> {
        let key = keys::courses_key(filter, page, page_size);

        if let Some(hit) = self.cache.get(&key).await
            && let Ok(cached) = serde_json::from_str::<CoursePage>(&hit)
        {
            debug!("List served from cache: {key}");
            return Ok(cached);
        }

        let (items, total) = self.store.list_courses(filter, page, page_size).await?;

        let result = CoursePage {
            items: items.into_iter().map(CourseRecord::from).collect(),
            total,
            page,
            page_size,
        };

        if let Ok(payload) = serde_json::to_string(&result) {
            self.cache
                .set(&key, payload, Duration::from_secs(self.ttl.list_ttl_seconds))
                .await;
        }

        Ok(result)
    }

    /// Records for the given external course ids, unpaginated.
    pub async fn compare(&self, course_ids: &[i32]) -> Result<Vec<CourseRecord>, CatalogError> {
        let key = keys::compare_key(course_ids);

        if let Some(hit) = self.cache.get(&key).await
            && let Ok(cached) = serde_json::from_str::<Vec<CourseRecord>>(&hit)
        {
            return Ok(cached);
        }

        let records: Vec<CourseRecord> = self
            .store
            .courses_by_course_ids(course_ids)
            .await?
            .into_iter()
            .map(CourseRecord::from)
            .collect();

        if let Ok(payload) = serde_json::to_string(&records) {
            self.cache
                .set(
                    &key,
                    payload,
                    Duration::from_secs(self.ttl.compare_ttl_seconds),
                )
                .await;
        }

        Ok(records)
    }

    pub async fn meta(&self) -> Result<MetaSummary, CatalogError> {
        if let Some(hit) = self.cache.get(keys::META_KEY).await
            && let Ok(cached) = serde_json::from_str::<MetaSummary>(&hit)
        {
            return Ok(cached);
        }

        let (departments, levels, delivery_modes) = self.store.distinct_meta().await?;
        let summary = MetaSummary {
            departments,
            levels,
            delivery_modes,
        };

        if let Ok(payload) = serde_json::to_string(&summary) {
            self.cache
                .set(
                    keys::META_KEY,
                    payload,
                    Duration::from_secs(self.ttl.meta_ttl_seconds),
                )
                .await;
        }

        Ok(summary)
    }

    /// Free-text query: extract filters, run the first page, report back
    /// what was understood.
    pub async fn ask(&self, question: &str) -> Result<AskOutcome, CatalogError> {
        let key = keys::ask_key(question);

        if let Some(hit) = self.cache.get(&key).await
            && let Ok(cached) = serde_json::from_str::<AskOutcome>(&hit)
        {
            return Ok(cached);
        }

        let parsed_filters = parse_question(question);
        debug!("Parsed question '{question}' into {parsed_filters:?}");

        let results = self.list(&parsed_filters, 1, 10).await?;
        let message = if results.total == 0 {
            Some("No matching courses found.".to_string())
        } else {
            None
        };

        let outcome = AskOutcome {
            parsed_filters,
            results,
            message,
        };

        if let Ok(payload) = serde_json::to_string(&outcome) {
            self.cache
                .set(&key, payload, Duration::from_secs(self.ttl.ask_ttl_seconds))
                .await;
        }

        Ok(outcome)
    }
}
