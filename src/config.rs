use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::MatchWeights;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Result-size limits applied by the HTTP layer, never by the ranker
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchingSettings {
    pub default_limit: Option<u16>,
    pub max_limit: Option<u16>,
}

impl MatchingSettings {
    /// Requested limit, or the default, capped at the configured maximum
    pub fn effective_limit(&self, requested: Option<u16>) -> usize {
        let max = self.max_limit.unwrap_or(100);
        requested
            .or(self.default_limit)
            .unwrap_or(20)
            .min(max) as usize
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_specialty_weight")]
    pub specialty: f64,
    #[serde(default = "default_insurance_weight")]
    pub insurance: f64,
    #[serde(default = "default_modality_weight")]
    pub modality: f64,
    #[serde(default = "default_location_weight")]
    pub location: f64,
    #[serde(default = "default_gender_weight")]
    pub gender: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            specialty: default_specialty_weight(),
            insurance: default_insurance_weight(),
            modality: default_modality_weight(),
            location: default_location_weight(),
            gender: default_gender_weight(),
        }
    }
}

impl From<WeightsConfig> for MatchWeights {
    fn from(config: WeightsConfig) -> Self {
        Self {
            specialty: config.specialty,
            insurance: config.insurance,
            modality: config.modality,
            location: config.location,
            gender: config.gender,
        }
    }
}

fn default_specialty_weight() -> f64 { 40.0 }
fn default_insurance_weight() -> f64 { 25.0 }
fn default_modality_weight() -> f64 { 15.0 }
fn default_location_weight() -> f64 { 15.0 }
fn default_gender_weight() -> f64 { 5.0 }

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

fn env_source() -> Environment {
    // e.g., CAREMATCH__SERVER__PORT -> server.port
    Environment::with_prefix("CAREMATCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with CAREMATCH__)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }
}
