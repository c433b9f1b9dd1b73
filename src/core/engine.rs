use std::collections::HashSet;
use std::sync::Arc;

use crate::core::matcher::{MatchError, Matcher};
use crate::models::{MatchQuery, ProfessionRecord, ScoredResult};
use crate::services::catalog::{CatalogStore, StoreError};

/// Matching engine bound to an explicitly owned catalog handle
///
/// Stateless between calls; concurrent `rank` calls only share the store,
/// which must tolerate concurrent readers.
#[derive(Clone)]
pub struct MatchingEngine {
    store: Arc<dyn CatalogStore>,
    matcher: Matcher,
}

impl MatchingEngine {
    pub fn new(store: Arc<dyn CatalogStore>, matcher: Matcher) -> Self {
        Self { store, matcher }
    }

    pub fn store(&self) -> &Arc<dyn CatalogStore> {
        &self.store
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Rank the whole catalog for a query, returning at most `limit` results
    ///
    /// A failed catalog read aborts the call; single malformed records do not.
    pub async fn rank(
        &self,
        query: &MatchQuery,
        limit: usize,
    ) -> Result<Vec<ScoredResult>, MatchError> {
        let catalog = self.store.list_all().await?;
        let result = self.matcher.rank_candidates(query, &catalog, limit)?;
        Ok(result.matches)
    }

    /// Distinct non-blank categories, in the order they first appear
    pub async fn categories(&self) -> Result<Vec<String>, StoreError> {
        let catalog = self.store.list_all().await?;
        let mut seen = HashSet::new();

        Ok(catalog
            .into_iter()
            .filter_map(|record| record.category)
            .map(|category| category.trim().to_string())
            .filter(|category| !category.is_empty())
            .filter(|category| seen.insert(category.clone()))
            .collect())
    }

    /// Records to suggest when a ranking pass came back empty
    pub async fn fallback_sample(&self, size: usize) -> Result<Vec<ProfessionRecord>, StoreError> {
        self.store.sample(size).await
    }
}
