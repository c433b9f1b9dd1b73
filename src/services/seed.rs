use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::models::NewProfession;
use crate::services::catalog::{CatalogStore, StoreError};

/// Errors that can occur while seeding the catalog
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse seed file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Catalog error: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    professions: Vec<NewProfession>,
}

/// Parse a TOML document of `[[professions]]` tables
pub fn parse_seed(text: &str) -> Result<Vec<NewProfession>, SeedError> {
    let file: SeedFile = toml::from_str(text)?;
    Ok(file.professions)
}

/// Read and parse a seed file from disk
pub async fn load_seed_file<P: AsRef<Path>>(path: P) -> Result<Vec<NewProfession>, SeedError> {
    let text = tokio::fs::read_to_string(path.as_ref()).await?;
    parse_seed(&text)
}

/// Insert the given professions, but only into an empty catalog
///
/// Entries the store rejects are logged and skipped. Returns the number of
/// records inserted; zero when the catalog already had records.
pub async fn seed_if_empty(
    store: &dyn CatalogStore,
    professions: Vec<NewProfession>,
) -> Result<usize, SeedError> {
    let existing = store.list_all().await?.len();
    if existing > 0 {
        tracing::info!("Catalog already holds {} professions, skipping seed", existing);
        return Ok(0);
    }

    let mut inserted = 0;
    for profession in professions {
        let name = profession.name.clone();
        match store.insert(profession).await {
            Ok(_) => inserted += 1,
            Err(StoreError::InvalidRecord(reason)) => {
                tracing::warn!("Skipping seed entry {:?}: {}", name, reason);
            }
            Err(e) => return Err(e.into()),
        }
    }

    tracing::info!("Seeded catalog with {} professions", inserted);
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::catalog::InMemoryCatalog;

    const SEED: &str = r#"
        [[professions]]
        name = "Python Developer"
        description = "Builds applications in Python"
        skills = "Python, Django, Flask, SQL, Algorithms"
        interests = "Programming, IT, Web development"
        experience_level = "1-3y"
        salary_range = "120000-250000"
        demand = "High"
        category = "IT"

        [[professions]]
        name = "Broken"
        description = "Has no skills"
        skills = ""
        interests = "nothing"
        experience_level = "any"
    "#;

    #[test]
    fn test_parse_seed() {
        let professions = parse_seed(SEED).unwrap();
        assert_eq!(professions.len(), 2);
        assert_eq!(professions[0].experience_level, "1-3y");
        assert_eq!(professions[0].category.as_deref(), Some("IT"));
        assert_eq!(professions[1].salary_range, None);
    }

    #[test]
    fn test_parse_seed_rejects_bad_toml() {
        assert!(matches!(parse_seed("[[professions]\nname ="), Err(SeedError::Parse(_))));
    }

    #[tokio::test]
    async fn test_seed_only_into_empty_catalog() {
        let store = InMemoryCatalog::new();

        let inserted = seed_if_empty(&store, parse_seed(SEED).unwrap()).await.unwrap();
        assert_eq!(inserted, 1);

        let again = seed_if_empty(&store, parse_seed(SEED).unwrap()).await.unwrap();
        assert_eq!(again, 0);
        assert_eq!(store.len().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_bundled_catalog_is_valid() {
        let professions = load_seed_file("data/catalog.toml").await.unwrap();
        assert!(!professions.is_empty());
        for profession in &professions {
            assert!(profession.check().is_ok(), "{}", profession.name);
        }
    }
}
