use anyhow::Result;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::cache::CacheLayer;
use crate::config::Config;
use crate::db::Store;
use crate::services::{CatalogService, IngestService};

/// Shared application state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Store,
    pub cache: Arc<CacheLayer>,
    pub catalog: CatalogService,
    pub ingest: IngestService,
    pub start_time: Instant,
    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    pub async fn new(config: Config, prometheus_handle: Option<PrometheusHandle>) -> Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_url,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let cache = if config.cache.enabled {
            Arc::new(CacheLayer::connect(&config.cache.database_url).await)
        } else {
            info!("Cache store disabled, using in-memory fallback only");
            Arc::new(CacheLayer::in_memory_only())
        };

        let catalog = CatalogService::new(store.clone(), cache.clone(), config.cache.clone());
        let ingest = IngestService::new(store.clone(), cache.clone());

        Ok(Self {
            config: Arc::new(config),
            store,
            cache,
            catalog,
            ingest,
            start_time: Instant::now(),
            prometheus_handle,
        })
    }
}
