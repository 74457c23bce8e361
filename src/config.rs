use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_min_score")]
    pub min_score: f64,
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
    /// Optional radius prefilter for the candidate pool
    #[serde(default)]
    pub radius_km: Option<f64>,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            min_score: default_min_score(),
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            radius_km: None,
        }
    }
}

fn default_min_score() -> f64 { 0.3 }
fn default_limit() -> usize { 20 }
fn default_max_limit() -> usize { 100 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_category_weight")]
    pub category: f64,
    #[serde(default = "default_tags_weight")]
    pub tags: f64,
    #[serde(default = "default_value_weight")]
    pub value: f64,
    #[serde(default = "default_condition_exact_weight")]
    pub condition_exact: f64,
    #[serde(default = "default_condition_comparable_weight")]
    pub condition_comparable: f64,
    #[serde(default = "default_popularity_cap")]
    pub popularity_cap: f64,
    #[serde(default = "default_age_weight")]
    pub age: f64,
    #[serde(default = "default_preference_weight")]
    pub preference: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            category: default_category_weight(),
            tags: default_tags_weight(),
            value: default_value_weight(),
            condition_exact: default_condition_exact_weight(),
            condition_comparable: default_condition_comparable_weight(),
            popularity_cap: default_popularity_cap(),
            age: default_age_weight(),
            preference: default_preference_weight(),
        }
    }
}

impl From<WeightsConfig> for ScoringWeights {
    fn from(value: WeightsConfig) -> Self {
        Self {
            category: value.category,
            tags: value.tags,
            value: value.value,
            condition_exact: value.condition_exact,
            condition_comparable: value.condition_comparable,
            popularity_cap: value.popularity_cap,
            age: value.age,
            preference: value.preference,
        }
    }
}

fn default_category_weight() -> f64 { 0.25 }
fn default_tags_weight() -> f64 { 0.15 }
fn default_value_weight() -> f64 { 0.15 }
fn default_condition_exact_weight() -> f64 { 0.10 }
fn default_condition_comparable_weight() -> f64 { 0.05 }
fn default_popularity_cap() -> f64 { 0.10 }
fn default_age_weight() -> f64 { 0.05 }
fn default_preference_weight() -> f64 { 0.05 }

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
    /// 3. Environment variables (prefixed with BARTER_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with BARTER_)
            // e.g., BARTER_MATCHING__MIN_SCORE -> matching.min_score
            .add_source(
                Environment::with_prefix("BARTER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("BARTER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
