//! Two-tier cache: a SQLite-backed primary store plus an in-process
//! fallback map. The primary store is never a source of user-visible
//! failure; any operational error is logged and the fallback takes over.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use sea_orm::{ConnectionTrait, DatabaseConnection, Schema};
use tracing::{info, warn};

use crate::db::repositories::cache::CacheRepository;
use crate::entities::prelude::CacheEntry;

pub mod keys;

struct FallbackEntry {
    payload: String,
    expires_at: Instant,
}

pub struct CacheLayer {
    primary: Option<CacheRepository>,
    fallback: Mutex<HashMap<String, FallbackEntry>>,
}

impl CacheLayer {
    /// Open the primary store. Connection failure degrades to a
    /// fallback-only cache rather than failing startup.
    pub async fn connect(db_url: &str) -> Self {
        // In-memory SQLite is per-connection, so it must not be pooled.
        let max_connections = if db_url.contains(":memory:") { 1 } else { 3 };

        let primary = match crate::db::connect(db_url, max_connections, 1).await {
            Ok(conn) => match ensure_schema(&conn).await {
                Ok(()) => {
                    info!("Cache store connected at {}", db_url);
                    Some(CacheRepository::new(conn))
                }
                Err(e) => {
                    warn!("Cache store schema setup failed, using in-memory fallback: {e}");
                    None
                }
            },
            Err(e) => {
                warn!("Cache store unreachable, using in-memory fallback: {e}");
                None
            }
        };

        Self {
            primary,
            fallback: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn in_memory_only() -> Self {
        Self {
            primary: None,
            fallback: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub const fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    /// Cached value if present and unexpired. Primary errors count as a
    /// miss and fall through to the fallback map.
    pub async fn get(&self, key: &str) -> Option<String> {
        if let Some(primary) = &self.primary {
            match primary.get(key).await {
                Ok(Some(payload)) => {
                    metrics::counter!("cache_hits_total").increment(1);
                    return Some(payload);
                }
                Ok(None) => {}
                Err(e) => warn!("Cache get failed for '{key}': {e}"),
            }
        }

        let mut map = self
            .fallback
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        match map.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => {
                metrics::counter!("cache_hits_total").increment(1);
                Some(entry.payload.clone())
            }
            Some(_) => {
                map.remove(key);
                metrics::counter!("cache_misses_total").increment(1);
                None
            }
            None => {
                metrics::counter!("cache_misses_total").increment(1);
                None
            }
        }
    }

    /// Store a value, overwriting any existing entry for the key. On
    /// primary failure the write lands in the fallback map instead.
    pub async fn set(&self, key: &str, value: String, ttl: Duration) {
        if let Some(primary) = &self.primary {
            match primary.set(key, &value, ttl).await {
                Ok(()) => return,
                Err(e) => warn!("Cache set failed for '{key}': {e}"),
            }
        }

        let mut map = self
            .fallback
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        map.insert(
            key.to_string(),
            FallbackEntry {
                payload: value,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    /// Remove every entry whose key begins with `prefix` from both stores;
    /// returns the total removed. With the primary unreachable only the
    /// fallback is cleared and that partial count is reported.
    pub async fn clear_prefix(&self, prefix: &str) -> u64 {
        let mut cleared = 0;

        if let Some(primary) = &self.primary {
            match primary.delete_prefix(prefix).await {
                Ok(n) => cleared += n,
                Err(e) => warn!("Cache clear failed for prefix '{prefix}': {e}"),
            }
        }

        let mut map = self
            .fallback
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let before = map.len();
        map.retain(|key, _| !key.starts_with(prefix));
        cleared += (before - map.len()) as u64;

        info!("Cleared {cleared} cache keys for prefix '{prefix}'");
        cleared
    }

    /// Drop every known namespace; used after catalog mutation.
    pub async fn clear_all_namespaces(&self) -> u64 {
        let mut cleared = 0;
        for prefix in keys::ALL_NAMESPACES {
            cleared += self.clear_prefix(prefix).await;
        }
        cleared
    }
}

async fn ensure_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    let backend = conn.get_database_backend();
    let schema = Schema::new(backend);
    let mut stmt = schema.create_table_from_entity(CacheEntry);
    stmt.if_not_exists();
    conn.execute(backend.build(&stmt)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fallback_set_get_and_overwrite() {
        let cache = CacheLayer::in_memory_only();
        cache
            .set("courses:a", "one".to_string(), Duration::from_secs(60))
            .await;
        assert_eq!(cache.get("courses:a").await.as_deref(), Some("one"));

        cache
            .set("courses:a", "two".to_string(), Duration::from_secs(60))
            .await;
        assert_eq!(cache.get("courses:a").await.as_deref(), Some("two"));
    }

    #[tokio::test]
    async fn fallback_entries_expire() {
        let cache = CacheLayer::in_memory_only();
        cache
            .set("ask:q", "stale".to_string(), Duration::ZERO)
            .await;
        assert_eq!(cache.get("ask:q").await, None);
    }

    #[tokio::test]
    async fn fallback_clear_prefix_counts() {
        let cache = CacheLayer::in_memory_only();
        cache
            .set("courses:a", "1".to_string(), Duration::from_secs(60))
            .await;
        cache
            .set("courses:b", "2".to_string(), Duration::from_secs(60))
            .await;
        cache
            .set("meta", "3".to_string(), Duration::from_secs(60))
            .await;

        assert_eq!(cache.clear_prefix("courses:").await, 2);
        assert_eq!(cache.get("courses:a").await, None);
        assert_eq!(cache.get("meta").await.as_deref(), Some("3"));
    }

    #[tokio::test]
    async fn primary_store_roundtrip() {
        let cache = CacheLayer::connect("sqlite::memory:").await;
        assert!(cache.primary.is_some(), "in-memory sqlite should connect");

        cache
            .set("meta", "payload".to_string(), Duration::from_secs(60))
            .await;
        assert_eq!(cache.get("meta").await.as_deref(), Some("payload"));

        assert_eq!(cache.clear_prefix("meta").await, 1);
        assert_eq!(cache.get("meta").await, None);
    }

    #[tokio::test]
    async fn primary_store_expires_entries() {
        let cache = CacheLayer::connect("sqlite::memory:").await;
        cache
            .set("ask:old", "stale".to_string(), Duration::ZERO)
            .await;
        assert_eq!(cache.get("ask:old").await, None);
    }
}
