//! Configuration loading for Symptora.
//! Reads symptora.toml from the current directory or the path in SYMPTORA_CONFIG.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use symptora_common::MatchSource;
use thiserror::Error;

const DATA_BASE_URL: &str = "https://raw.githubusercontent.com/kattaNagasainikhila-wq/health_data/main";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String { "0.0.0.0:5000".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

/// Where the reference documents live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_diseases_url")]
    pub diseases_url: String,
    #[serde(default = "default_symptoms_url")]
    pub symptoms_url: String,
    #[serde(default = "default_preventions_url")]
    pub preventions_url: String,
    /// Optional symptom → diseases index.
    #[serde(default)]
    pub symptom_index_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub fetch_timeout_secs: u64,
    /// Hosts allowed in addition to those of the URLs above.
    #[serde(default)]
    pub extra_hosts: Vec<String>,
}

fn default_diseases_url()    -> String { format!("{DATA_BASE_URL}/diseases_data.json") }
fn default_symptoms_url()    -> String { format!("{DATA_BASE_URL}/symptoms_data.json") }
fn default_preventions_url() -> String { format!("{DATA_BASE_URL}/preventions_data.json") }
fn default_timeout_secs()    -> u64    { 5 }

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            diseases_url: default_diseases_url(),
            symptoms_url: default_symptoms_url(),
            preventions_url: default_preventions_url(),
            symptom_index_url: None,
            fetch_timeout_secs: default_timeout_secs(),
            extra_hosts: vec![],
        }
    }
}

impl DataConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Every configured source URL.
    pub fn source_urls(&self) -> Vec<&str> {
        let mut urls = vec![
            self.diseases_url.as_str(),
            self.symptoms_url.as_str(),
            self.preventions_url.as_str(),
        ];
        if let Some(ref index) = self.symptom_index_url {
            urls.push(index.as_str());
        }
        urls
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    #[serde(default)]
    pub source: MatchSource,
    /// Cap on ranked diseases returned; 0 means no cap.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// How many top diseases feed follow-up suggestions.
    #[serde(default = "default_suggestion_pool")]
    pub suggestion_pool: usize,
}

fn default_max_results()     -> usize { 10 }
fn default_suggestion_pool() -> usize { 3 }

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            source: MatchSource::default(),
            max_results: default_max_results(),
            suggestion_pool: default_suggestion_pool(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive; RUST_LOG wins when set.
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String { "symptora=debug,info".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: default_filter() }
    }
}


impl Config {
    /// Load configuration from symptora.toml.
    /// Checks SYMPTORA_CONFIG env var first, then current directory. A missing
    /// file means built-in defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("SYMPTORA_CONFIG")
            .unwrap_or_else(|_| "symptora.toml".to_string());

        let mut config = if Path::new(&path).exists() {
            Self::load_from(&path)?
        } else {
            tracing::info!(path = %path, "No config file found, using defaults");
            Self::default()
        };

        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    /// SYMPTORA_BIND overrides `server.bind`.
    pub fn apply_env(&mut self) {
        if let Ok(bind) = std::env::var("SYMPTORA_BIND") {
            if !bind.trim().is_empty() {
                self.server.bind = bind;
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, url) in [
            ("data.diseases_url", &self.data.diseases_url),
            ("data.symptoms_url", &self.data.symptoms_url),
            ("data.preventions_url", &self.data.preventions_url),
        ] {
            if url.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{field} must not be empty")));
            }
        }
        if self.data.fetch_timeout_secs == 0 {
            return Err(ConfigError::Invalid("data.fetch_timeout_secs must be positive".into()));
        }
        if self.matching.suggestion_pool == 0 {
            return Err(ConfigError::Invalid("matching.suggestion_pool must be positive".into()));
        }
        if self.matching.source == MatchSource::Index && self.data.symptom_index_url.is_none() {
            tracing::warn!("matching.source = \"index\" but no data.symptom_index_url; the symptom table will be used");
        }
        Ok(())
    }
}
