// Service exports
pub mod advisor;
pub mod catalog;
pub mod seed;
pub mod sqlite;

pub use advisor::{Advice, AdvisorClient, AdvisorError, FALLBACK_ADVICE};
pub use catalog::{CatalogStore, InMemoryCatalog, StoreError};
pub use seed::{load_seed_file, parse_seed, seed_if_empty, SeedError};
pub use sqlite::SqliteCatalog;
