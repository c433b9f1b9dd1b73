use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::core::DEFAULT_LIMIT;
use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub advisor: AdvisorSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSettings {
    /// TOML file loaded into the catalog when it is empty
    pub seed_file: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
    #[serde(default = "default_fallback_sample_size")]
    pub fallback_sample_size: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            fallback_sample_size: default_fallback_sample_size(),
        }
    }
}

fn default_limit() -> usize { DEFAULT_LIMIT }
fn default_max_limit() -> usize { 50 }
fn default_fallback_sample_size() -> usize { 3 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_skill_exact")]
    pub skill_exact: f64,
    #[serde(default = "default_skill_partial")]
    pub skill_partial: f64,
    #[serde(default = "default_interest_exact")]
    pub interest_exact: f64,
    #[serde(default = "default_interest_partial")]
    pub interest_partial: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            skill_exact: default_skill_exact(),
            skill_partial: default_skill_partial(),
            interest_exact: default_interest_exact(),
            interest_partial: default_interest_partial(),
        }
    }
}

impl WeightsConfig {
    /// Every weight must be finite and non-negative
    pub fn validate(&self) -> Result<(), ConfigError> {
        let weights = [
            ("skill_exact", self.skill_exact),
            ("skill_partial", self.skill_partial),
            ("interest_exact", self.interest_exact),
            ("interest_partial", self.interest_partial),
        ];

        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Message(format!(
                    "scoring.weights.{} must be a finite non-negative number, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        ScoringWeights {
            skill_exact: config.skill_exact,
            skill_partial: config.skill_partial,
            interest_exact: config.interest_exact,
            interest_partial: config.interest_partial,
        }
    }
}

fn default_skill_exact() -> f64 { 3.0 }
fn default_skill_partial() -> f64 { 1.0 }
fn default_interest_exact() -> f64 { 2.0 }
fn default_interest_partial() -> f64 { 0.5 }

#[derive(Debug, Clone, Deserialize)]
pub struct AdvisorSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_advisor_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_advisor_model")]
    pub model: String,
    #[serde(default = "default_advisor_timeout")]
    pub timeout_secs: u64,
}

impl AdvisorSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Enabled and carrying an API key
    pub fn is_usable(&self) -> bool {
        self.enabled && !self.api_key.trim().is_empty()
    }
}

impl Default for AdvisorSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_advisor_endpoint(),
            api_key: String::new(),
            model: default_advisor_model(),
            timeout_secs: default_advisor_timeout(),
        }
    }
}

fn default_advisor_endpoint() -> String { "https://api.openai.com/v1".to_string() }
fn default_advisor_model() -> String { "gpt-4o-mini".to_string() }
fn default_advisor_timeout() -> u64 { 30 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with CAREER_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., CAREER__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("CAREER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("CAREER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply the conventional unprefixed variables on top of the layered config
///
/// `DATABASE_URL` sets the catalog location and `OPENAI_API_KEY` the advisor
/// key, unless the prefixed forms are already set.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if env::var("CAREER__DATABASE__URL").is_err() {
        if let Ok(url) = env::var("DATABASE_URL") {
            builder = builder.set_override("database.url", url)?;
        }
    }

    if env::var("CAREER__ADVISOR__API_KEY").is_err() {
        if let Ok(key) = env::var("OPENAI_API_KEY") {
            builder = builder.set_override("advisor.api_key", key)?;
        }
    }

    builder.build()
}
