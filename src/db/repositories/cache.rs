use crate::entities::{cache_entry, prelude::*};
use anyhow::Result;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use std::time::Duration;

/// Key-value rows with an RFC 3339 expiry, backing the primary cache store.
pub struct CacheRepository {
    conn: DatabaseConnection,
}

impl CacheRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let now = chrono::Utc::now().to_rfc3339();

        // Expired rows are swept opportunistically on read.
        let _ = CacheEntry::delete_many()
            .filter(cache_entry::Column::ExpiresAt.lt(&now))
            .exec(&self.conn)
            .await;

        let entry = CacheEntry::find()
            .filter(cache_entry::Column::Key.eq(key))
            .filter(cache_entry::Column::ExpiresAt.gt(&now))
            .one(&self.conn)
            .await?;

        Ok(entry.map(|e| e.payload))
    }

    /// Unconditional overwrite for the key.
    pub async fn set(&self, key: &str, payload: &str, ttl: Duration) -> Result<()> {
        let expires_at = (chrono::Utc::now()
            + chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::seconds(60)))
        .to_rfc3339();

        let active = cache_entry::ActiveModel {
            key: Set(key.to_string()),
            payload: Set(payload.to_string()),
            expires_at: Set(expires_at),
            ..Default::default()
        };

        CacheEntry::insert(active)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(cache_entry::Column::Key)
                    .update_columns([
                        cache_entry::Column::Payload,
                        cache_entry::Column::ExpiresAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.conn)
            .await?;

        Ok(())
    }

    pub async fn delete_prefix(&self, prefix: &str) -> Result<u64> {
        let result = CacheEntry::delete_many()
            .filter(cache_entry::Column::Key.starts_with(prefix))
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected)
    }
}
