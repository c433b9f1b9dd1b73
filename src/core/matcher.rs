use thiserror::Error;

use crate::core::{
    filters::{matches_experience, prepare_candidate},
    normalize::distinct_tokens,
    scoring::calculate_match_score,
};
use crate::models::{ExperienceRequirement, MatchQuery, ProfessionRecord, ScoredResult, ScoringWeights};
use crate::services::catalog::StoreError;

/// Default number of results returned by a ranking pass
pub const DEFAULT_LIMIT: usize = 5;

/// Errors that can occur while ranking professions
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Catalog error: {0}")]
    Store(#[from] StoreError),
}

/// A query after validation and token normalization
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedQuery {
    pub skills: Vec<String>,
    pub interests: Vec<String>,
    pub experience: ExperienceRequirement,
}

impl PreparedQuery {
    /// Validate the experience label and normalize the token lists
    ///
    /// The label is never corrected: an empty or unknown label is an error.
    pub fn from_query(query: &MatchQuery) -> Result<Self, MatchError> {
        if query.experience_level.is_empty() {
            return Err(MatchError::InvalidQuery(
                "experience level must not be empty".to_string(),
            ));
        }

        let experience = query
            .experience_level
            .parse::<ExperienceRequirement>()
            .map_err(|e| MatchError::InvalidQuery(e.to_string()))?;

        Ok(Self {
            skills: distinct_tokens(&query.skills),
            interests: distinct_tokens(&query.interests),
            experience,
        })
    }
}

/// Result of a ranking pass
#[derive(Debug)]
pub struct MatchResult {
    pub matches: Vec<ScoredResult>,
    pub total_candidates: usize,
    pub skipped_records: usize,
}

/// Profession ranking pipeline
///
/// # Pipeline Stages
/// 1. Query validation and normalization
/// 2. Record preparation (malformed records are skipped)
/// 3. Experience filter
/// 4. Skill and interest scoring, zero scores dropped
/// 5. Stable descending sort and truncation
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Rank catalog records for a query
    ///
    /// # Arguments
    /// * `query` - Raw user query, normalized here
    /// * `candidates` - Catalog snapshot, in catalog order
    /// * `limit` - Maximum number of results to return
    ///
    /// # Returns
    /// MatchResult with results ordered by score; ties keep catalog order.
    /// An empty `matches` is a normal outcome, not an error.
    pub fn rank_candidates(
        &self,
        query: &MatchQuery,
        candidates: &[ProfessionRecord],
        limit: usize,
    ) -> Result<MatchResult, MatchError> {
        let query = PreparedQuery::from_query(query)?;
        let total_candidates = candidates.len();
        let mut skipped_records = 0;

        let mut scored: Vec<ScoredResult> = candidates
            .iter()
            .filter_map(|record| match prepare_candidate(record) {
                Ok(candidate) => Some(candidate),
                Err(e) => {
                    tracing::warn!("Skipping catalog record: {}", e);
                    skipped_records += 1;
                    None
                }
            })
            .filter(|candidate| matches_experience(candidate, &query.experience))
            .filter_map(|candidate| {
                let score = calculate_match_score(&query, &candidate, &self.weights).total();

                if score > 0.0 {
                    Some(ScoredResult {
                        profession: candidate.record.clone(),
                        match_score: score,
                    })
                } else {
                    None
                }
            })
            .collect();

        // sort_by is stable, equal scores keep catalog order
        scored.sort_by(|a, b| {
            b.match_score
                .partial_cmp(&a.match_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        scored.truncate(limit);

        tracing::debug!(
            "Ranked {} of {} catalog records ({} skipped)",
            scored.len(),
            total_candidates,
            skipped_records
        );

        Ok(MatchResult {
            matches: scored,
            total_candidates,
            skipped_records,
        })
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
