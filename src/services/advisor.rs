use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Text returned when the advisor is disabled or the call failed
pub const FALLBACK_ADVICE: &str = "The AI advisor is unavailable right now. \
Review the ranked professions above, or try again later with a few more skills and interests.";

const SYSTEM_PROMPT: &str = "You are a career counsellor. Answer concisely in plain text, \
with at most five suggestions, each with a one-sentence justification.";

/// Errors that can occur when calling the completion service
#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Completion contained no text")]
    EmptyCompletion,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Advisor output, flagged when it is the local fallback text
#[derive(Debug, Clone, PartialEq)]
pub struct Advice {
    pub text: String,
    pub fallback: bool,
}

impl Advice {
    pub fn fallback() -> Self {
        Self {
            text: FALLBACK_ADVICE.to_string(),
            fallback: true,
        }
    }
}

/// Client for an OpenAI-compatible chat completion endpoint
///
/// Every call is bounded by the client timeout and is independent of the
/// matching engine; callers decide whether to degrade to [`FALLBACK_ADVICE`].
#[derive(Debug, Clone)]
pub struct AdvisorClient {
    base_url: String,
    api_key: String,
    model: String,
    client: Client,
}

impl AdvisorClient {
    pub fn new(
        base_url: String,
        api_key: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, AdvisorError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            api_key,
            model,
            client,
        })
    }

    /// Send a single prompt and return the completion text
    pub async fn complete(&self, prompt: &str) -> Result<String, AdvisorError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));

        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        tracing::debug!("Requesting completion from {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AdvisorError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body: ChatResponse = response.json().await?;

        body.choices
            .into_iter()
            .filter_map(|c| c.message.content)
            .map(|text| text.trim().to_string())
            .find(|text| !text.is_empty())
            .ok_or(AdvisorError::EmptyCompletion)
    }

    /// Free-text profession recommendations for a user profile
    pub async fn career_advice(
        &self,
        skills: &[String],
        interests: &[String],
        experience_level: &str,
    ) -> Result<String, AdvisorError> {
        self.complete(&advice_prompt(skills, interests, experience_level))
            .await
    }

    /// Free-text assessment of how well one profession suits the user
    pub async fn evaluate_fit(
        &self,
        profession: &str,
        skills: &[String],
        interests: &[String],
    ) -> Result<String, AdvisorError> {
        self.complete(&evaluation_prompt(profession, skills, interests))
            .await
    }

    pub async fn career_advice_or_fallback(
        &self,
        skills: &[String],
        interests: &[String],
        experience_level: &str,
    ) -> Advice {
        degrade(self.career_advice(skills, interests, experience_level).await)
    }

    pub async fn evaluate_fit_or_fallback(
        &self,
        profession: &str,
        skills: &[String],
        interests: &[String],
    ) -> Advice {
        degrade(self.evaluate_fit(profession, skills, interests).await)
    }
}

fn degrade(result: Result<String, AdvisorError>) -> Advice {
    match result {
        Ok(text) => Advice {
            text,
            fallback: false,
        },
        Err(e) => {
            tracing::warn!("Advisor call failed, using fallback text: {}", e);
            Advice::fallback()
        }
    }
}

fn advice_prompt(skills: &[String], interests: &[String], experience_level: &str) -> String {
    format!(
        "Suggest professions for a person with these skills: {}. \
         Their interests are: {}. Experience level: {}.",
        skills.join(", "),
        interests.join(", "),
        experience_level
    )
}

fn evaluation_prompt(profession: &str, skills: &[String], interests: &[String]) -> String {
    format!(
        "Assess how well the profession \"{}\" suits a person with these skills: {} \
         and these interests: {}. Name the strongest overlap and the main gap.",
        profession,
        skills.join(", "),
        interests.join(", ")
    )
}
