//! Career Match - profession matching and ranking service
//!
//! This library ranks a catalog of professions against a user's skills,
//! interests and experience level, and serves the results over HTTP.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{MatchError, Matcher, MatchingEngine};
pub use crate::models::{MatchQuery, NewProfession, ProfessionRecord, ScoredResult, ScoringWeights};
pub use crate::services::{CatalogStore, InMemoryCatalog, SqliteCatalog, StoreError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let matcher = Matcher::default();
        let query = MatchQuery::new(["rust"], ["systems"], "any");
        let result = matcher.rank_candidates(&query, &[], 5).unwrap();
        assert!(result.matches.is_empty());
    }
}
