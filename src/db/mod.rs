use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::models::course::CourseUpsert;
use crate::models::filter::FilterSet;

pub mod migrator;
pub mod repositories;

/// Facade over the catalog database. Cheap to clone; all repositories share
/// the pooled connection.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let conn = connect(db_url, max_connections, min_connections).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn course_repo(&self) -> repositories::course::CourseRepository {
        repositories::course::CourseRepository::new(self.conn.clone())
    }

    pub async fn list_courses(
        &self,
        filter: &FilterSet,
        page: u64,
        page_size: u64,
    ) -> Result<(Vec<crate::entities::course::Model>, u64)> {
        self.course_repo().list(filter, page, page_size).await
    }

    pub async fn courses_by_course_ids(
        &self,
        course_ids: &[i32],
    ) -> Result<Vec<crate::entities::course::Model>> {
        self.course_repo().by_course_ids(course_ids).await
    }

    pub async fn distinct_meta(&self) -> Result<(Vec<String>, Vec<String>, Vec<String>)> {
        self.course_repo().distinct_meta().await
    }

    pub async fn upsert_courses(&self, rows: &[CourseUpsert]) -> Result<usize> {
        self.course_repo().upsert_many(rows).await
    }
}

/// Open a pooled connection with bounded timeouts, creating the backing
/// file for on-disk SQLite URLs.
pub(crate) async fn connect(
    db_url: &str,
    max_connections: u32,
    min_connections: u32,
) -> Result<DatabaseConnection> {
    if !db_url.contains(":memory:") {
        let path_str = db_url.trim_start_matches("sqlite:");
        if let Some(parent) = Path::new(path_str).parent() {
            tokio::fs::create_dir_all(parent).await.ok();
        }
        if !Path::new(path_str).exists() {
            std::fs::File::create(path_str)?;
        }
    }

    let mut opt = ConnectOptions::new(db_url.to_string());
    opt.max_connections(max_connections)
        .min_connections(min_connections)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(600))
        .sqlx_logging(false);

    Ok(Database::connect(opt).await?)
}
