use async_trait::async_trait;
use std::sync::RwLock;
use thiserror::Error;

use crate::models::{NewProfession, ProfessionRecord};

/// Errors that can occur when reading or writing the profession catalog
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Malformed record {id}: {reason}")]
    MalformedRecord { id: i64, reason: String },

    #[error("Catalog lock poisoned")]
    Poisoned,
}

/// Read/write contract of the profession catalog
///
/// Implementations must be safe for concurrent readers; `list_all` returns a
/// snapshot that is not required to observe concurrent inserts.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Every record currently known, in catalog order
    async fn list_all(&self) -> Result<Vec<ProfessionRecord>, StoreError>;

    /// Append a new record and return its id
    async fn insert(&self, profession: NewProfession) -> Result<i64, StoreError>;

    /// Up to `size` records to suggest when nothing matched
    async fn sample(&self, size: usize) -> Result<Vec<ProfessionRecord>, StoreError>;

    /// Whether the backing storage is reachable
    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}

/// In-memory catalog, used in tests and when no database is configured
///
/// `sample` returns records in catalog order so results are reproducible.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    records: RwLock<Vec<ProfessionRecord>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from existing records, keeping their ids
    ///
    /// No validation happens here, which lets tests load malformed rows.
    pub fn with_records(records: Vec<ProfessionRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn list_all(&self) -> Result<Vec<ProfessionRecord>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.clone())
    }

    async fn insert(&self, profession: NewProfession) -> Result<i64, StoreError> {
        profession.check().map_err(StoreError::InvalidRecord)?;

        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;
        let id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        records.push(ProfessionRecord::from_new(id, profession));

        tracing::debug!("Inserted profession {} into in-memory catalog", id);
        Ok(id)
    }

    async fn sample(&self, size: usize) -> Result<Vec<ProfessionRecord>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.iter().take(size).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profession(name: &str) -> NewProfession {
        NewProfession {
            name: name.to_string(),
            description: "Creates visual content".to_string(),
            skills: "design, photoshop".to_string(),
            interests: "art".to_string(),
            experience_level: "under-1y".to_string(),
            salary_range: Some("60000-150000".to_string()),
            demand: Some("Medium".to_string()),
            category: Some("Design".to_string()),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let catalog = InMemoryCatalog::new();

        let first = catalog.insert(profession("Graphic Designer")).await.unwrap();
        let second = catalog.insert(profession("Web Designer")).await.unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 2);

        let all = catalog.list_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].name, "Web Designer");
        assert_eq!(all[1].id, 2);
    }

    #[tokio::test]
    async fn test_insert_rejects_blank_fields() {
        let catalog = InMemoryCatalog::new();
        let mut blank = profession("Graphic Designer");
        blank.interests = "  ".to_string();

        let err = catalog.insert(blank).await.unwrap_err();

        assert!(matches!(err, StoreError::InvalidRecord(_)));
        assert!(catalog.is_empty().unwrap());
    }

    #[tokio::test]
    async fn test_poisoned_lock_is_reported() {
        let catalog = std::sync::Arc::new(InMemoryCatalog::new());
        catalog.insert(profession("Graphic Designer")).await.unwrap();

        let poisoner = std::sync::Arc::clone(&catalog);
        let result = std::thread::spawn(move || {
            let _guard = poisoner.records.write().unwrap();
            panic!("writer died holding the lock");
        })
        .join();
        assert!(result.is_err());

        assert!(matches!(catalog.len(), Err(StoreError::Poisoned)));
        assert!(matches!(catalog.is_empty(), Err(StoreError::Poisoned)));
        assert!(matches!(catalog.list_all().await, Err(StoreError::Poisoned)));
    }

    #[test]
    fn test_sample_is_bounded() {
        let catalog = InMemoryCatalog::new();
        tokio_test::block_on(async {
            for i in 0..5 {
                catalog.insert(profession(&format!("P{}", i))).await.unwrap();
            }
            assert_eq!(catalog.sample(3).await.unwrap().len(), 3);
            assert_eq!(catalog.sample(10).await.unwrap().len(), 5);
            assert!(catalog.sample(0).await.unwrap().is_empty());
        });
    }
}
