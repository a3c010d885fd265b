use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::core::{Recommender, DEFAULT_MAX_RESULTS, DEFAULT_MIN_SCORE};
use crate::models::FitWeights;
use crate::services::RetryPolicy;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub retry: RetrySettings,
    #[serde(default)]
    pub recommender: RecommenderSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

/// Where the school records come from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    #[default]
    Bundled,
    File,
    Remote,
    Postgres,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    #[serde(default)]
    pub source: CatalogSource,
    pub path: Option<String>,
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub database_url: Option<String>,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            source: CatalogSource::default(),
            path: None,
            url: None,
            api_key: None,
            database_url: None,
            max_connections: None,
            min_connections: None,
            acquire_timeout_secs: None,
            request_timeout_secs: default_request_timeout(),
            cache_ttl_secs: default_cache_ttl(),
        }
    }
}

fn default_request_timeout() -> u64 { 10 }
fn default_cache_ttl() -> u64 { 300 }

#[derive(Debug, Clone, Deserialize)]
pub struct RetrySettings {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

impl RetrySettings {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, self.base_delay_ms, self.max_delay_ms)
    }
}

fn default_max_attempts() -> u32 { 3 }
fn default_base_delay_ms() -> u64 { 200 }
fn default_max_delay_ms() -> u64 { 2_000 }

#[derive(Debug, Clone, Deserialize)]
pub struct RecommenderSettings {
    #[serde(default = "default_min_score")]
    pub min_score: f64,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default)]
    pub weights: WeightsConfig,
}

impl Default for RecommenderSettings {
    fn default() -> Self {
        Self {
            min_score: default_min_score(),
            max_results: default_max_results(),
            weights: WeightsConfig::default(),
        }
    }
}

impl RecommenderSettings {
    pub fn build(&self) -> Recommender {
        Recommender::new(self.weights.into(), self.min_score, self.max_results)
    }
}

fn default_min_score() -> f64 { DEFAULT_MIN_SCORE }
fn default_max_results() -> usize { DEFAULT_MAX_RESULTS }

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_gmat_weight")]
    pub gmat: f64,
    #[serde(default = "default_experience_weight")]
    pub experience: f64,
    #[serde(default = "default_location_weight")]
    pub location: f64,
    #[serde(default = "default_budget_weight")]
    pub budget: f64,
    #[serde(default = "default_career_weight")]
    pub career: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            gmat: default_gmat_weight(),
            experience: default_experience_weight(),
            location: default_location_weight(),
            budget: default_budget_weight(),
            career: default_career_weight(),
        }
    }
}

impl From<WeightsConfig> for FitWeights {
    fn from(config: WeightsConfig) -> Self {
        FitWeights {
            gmat: config.gmat,
            experience: config.experience,
            location: config.location,
            budget: config.budget,
            career: config.career,
        }
    }
}

fn default_gmat_weight() -> f64 { 40.0 }
fn default_experience_weight() -> f64 { 20.0 }
fn default_location_weight() -> f64 { 15.0 }
fn default_budget_weight() -> f64 { 15.0 }
fn default_career_weight() -> f64 { 10.0 }

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
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with CAMPUS)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., CAMPUS__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("CAMPUS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_env_overrides(settings)?;

        settings.try_deserialize()
    }
}

/// Honour the conventional DATABASE_URL variable for the postgres catalog
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    let mut builder = Config::builder().add_source(settings);

    if let Ok(database_url) = std::env::var("DATABASE_URL") {
        builder = builder.set_override("catalog.database_url", database_url)?;
    }

    builder.build()
}
