use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use std::time::Duration;

use crate::models::{NewProfession, ProfessionRecord};
use crate::services::catalog::{CatalogStore, StoreError};

const SELECT_PROFESSIONS: &str = r#"
    SELECT id, name, description, skills, interests, experience_level,
           salary_range, demand, category
    FROM professions
"#;

/// SQLite-backed profession catalog
///
/// Owns a connection pool; clone the surrounding `Arc` rather than the
/// client. Migrations under `./migrations` run on connect.
pub struct SqliteCatalog {
    pool: SqlitePool,
}

impl SqliteCatalog {
    /// Create a new catalog client from a connection string
    ///
    /// The database file is created if it does not exist yet.
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .connect_with(options)
            .await?;

        Self::migrate(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a catalog client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Opening SQLite catalog at {}", url);

        Self::new(
            url,
            max_connections.unwrap_or(5),
            min_connections.unwrap_or(1),
        )
        .await
    }

    /// Private in-memory database on a single pinned connection
    ///
    /// Every SQLite `:memory:` connection is its own database, so the pool
    /// is limited to one connection that never expires.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        Self::migrate(&pool).await?;

        Ok(Self { pool })
    }

    async fn migrate(pool: &SqlitePool) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(pool).await?;
        tracing::debug!("Catalog migrations applied");
        Ok(())
    }

    /// Number of records in the catalog
    pub async fn count(&self) -> Result<i64, StoreError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM professions")
            .fetch_one(&self.pool)
            .await?;

        Ok(row.try_get("total")?)
    }

    #[cfg(test)]
    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Decode a row; `description` is nullable and reads as empty
fn record_from_row(row: &SqliteRow) -> Result<ProfessionRecord, sqlx::Error> {
    Ok(ProfessionRecord {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row
            .try_get::<Option<String>, _>("description")?
            .unwrap_or_default(),
        skills: row.try_get("skills")?,
        interests: row.try_get("interests")?,
        experience_level: row.try_get("experience_level")?,
        salary_range: row.try_get("salary_range")?,
        demand: row.try_get("demand")?,
        category: row.try_get("category")?,
    })
}

/// Decode rows, skipping the ones that cannot be read
fn decode_rows(rows: &[SqliteRow]) -> Vec<ProfessionRecord> {
    rows.iter()
        .filter_map(|row| match record_from_row(row) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("Skipping undecodable catalog row: {}", e);
                None
            }
        })
        .collect()
}

#[async_trait]
impl CatalogStore for SqliteCatalog {
    async fn list_all(&self) -> Result<Vec<ProfessionRecord>, StoreError> {
        let query = format!("{} ORDER BY id", SELECT_PROFESSIONS);
        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;

        let records = decode_rows(&rows);
        tracing::debug!("Loaded {} catalog records", records.len());

        Ok(records)
    }

    async fn insert(&self, profession: NewProfession) -> Result<i64, StoreError> {
        profession.check().map_err(StoreError::InvalidRecord)?;

        let query = r#"
            INSERT INTO professions
                (name, description, skills, interests, experience_level,
                 salary_range, demand, category)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#;

        let result = sqlx::query(query)
            .bind(&profession.name)
            .bind(&profession.description)
            .bind(&profession.skills)
            .bind(&profession.interests)
            .bind(&profession.experience_level)
            .bind(&profession.salary_range)
            .bind(&profession.demand)
            .bind(&profession.category)
            .execute(&self.pool)
            .await?;

        let id = result.last_insert_rowid();
        tracing::debug!("Inserted profession {} ({})", id, profession.name);

        Ok(id)
    }

    async fn sample(&self, size: usize) -> Result<Vec<ProfessionRecord>, StoreError> {
        let query = format!("{} ORDER BY RANDOM() LIMIT $1", SELECT_PROFESSIONS);
        let rows = sqlx::query(&query)
            .bind(size as i64)
            .fetch_all(&self.pool)
            .await?;

        Ok(decode_rows(&rows))
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
