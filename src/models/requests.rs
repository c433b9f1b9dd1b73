use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::models::domain::MatchQuery;

/// Request to rank professions for a user
///
/// `skills` and `interests` accept either a JSON array or a single
/// comma-separated string, the way users type them into a chat.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendationRequest {
    #[validate(length(min = 1))]
    #[serde(deserialize_with = "list_or_csv")]
    pub skills: Vec<String>,
    #[validate(length(min = 1))]
    #[serde(deserialize_with = "list_or_csv")]
    pub interests: Vec<String>,
    #[validate(length(min = 1))]
    #[serde(alias = "experience_level", rename = "experienceLevel")]
    pub experience_level: String,
    #[serde(default)]
    pub limit: Option<u16>,
}

impl RecommendationRequest {
    pub fn to_query(&self) -> MatchQuery {
        MatchQuery {
            skills: self.skills.clone(),
            interests: self.interests.clone(),
            experience_level: self.experience_level.trim().to_string(),
        }
    }
}

/// Request for free-text career advice from the LLM advisor
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AdviceRequest {
    #[validate(length(min = 1))]
    #[serde(deserialize_with = "list_or_csv")]
    pub skills: Vec<String>,
    #[validate(length(min = 1))]
    #[serde(deserialize_with = "list_or_csv")]
    pub interests: Vec<String>,
    #[validate(length(min = 1))]
    #[serde(alias = "experience_level", rename = "experienceLevel")]
    pub experience_level: String,
}

/// Request to assess how well a single profession fits the user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EvaluateFitRequest {
    #[validate(length(min = 1))]
    pub profession: String,
    #[serde(deserialize_with = "list_or_csv")]
    pub skills: Vec<String>,
    #[serde(deserialize_with = "list_or_csv")]
    pub interests: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListOrCsv {
    List(Vec<String>),
    Csv(String),
}

/// Accept `["a", "b"]` or `"a, b"`; blank entries are dropped
fn list_or_csv<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match ListOrCsv::deserialize(deserializer)? {
        ListOrCsv::List(items) => items,
        ListOrCsv::Csv(text) => text.split(',').map(str::to_string).collect(),
    };

    Ok(raw
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}
