// Core algorithm exports
pub mod engine;
pub mod filters;
pub mod matcher;
pub mod normalize;
pub mod scoring;

pub use engine::MatchingEngine;
pub use filters::{matches_experience, prepare_candidate, Candidate};
pub use matcher::{MatchError, MatchResult, Matcher, PreparedQuery, DEFAULT_LIMIT};
pub use normalize::{distinct_tokens, normalize_token, split_tokens};
pub use scoring::{calculate_match_score, MatchScore};
