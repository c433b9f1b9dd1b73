use serde::{Deserialize, Serialize};
use crate::models::domain::{ProfessionRecord, ScoredResult};

/// Response for the recommendations endpoint
///
/// When nothing matched, `matches` is empty, `fallback` is set and
/// `suggestions` carries a random sample of the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    pub matches: Vec<ScoredResult>,
    pub fallback: bool,
    pub suggestions: Vec<ProfessionRecord>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertProfessionResponse {
    pub id: i64,
}

/// Advisor text, or the local fallback message when the advisor failed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdviceResponse {
    pub advice: String,
    pub fallback: bool,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
