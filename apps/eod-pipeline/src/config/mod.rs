//! Configuration module for the EOD pipeline.
//!
//! Provides configuration loading, validation, and environment variable
//! interpolation.
//!
//! # Usage
//!
//! ```rust,ignore
//! use eod_pipeline::config::{Config, load_config};
//!
//! // Load from default path (config.yaml)
//! let config = load_config(None)?;
//!
//! // Load from custom path
//! let config = load_config(Some("custom/config.yaml"))?;
//!
//! println!("listing: {}", config.source.listing_url);
//! ```

mod observability;
mod output;
mod patterns;
mod source;

use chrono::NaiveDate;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::use_cases::PipelineSettings;
use crate::domain::file_discovery::{FilePatternMatcher, PatternError};

pub use observability::{LogFormat, LoggingConfig, ObservabilityConfig};
pub use output::OutputConfig;
pub use patterns::PatternsConfig;
pub use source::SourceConfig;

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),

    /// A file name pattern is invalid.
    #[error("Config validation failed: {0}")]
    InvalidPattern(#[from] PatternError),
}

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Remote file server.
    pub source: SourceConfig,
    /// Local output.
    #[serde(default)]
    pub output: OutputConfig,
    /// File name patterns.
    #[serde(default)]
    pub patterns: PatternsConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Orchestrator settings derived from this configuration.
    #[must_use]
    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            download_root: self.output.download_root.clone(),
            max_concurrent_files: self.source.max_concurrent_files,
            patterns: self.patterns.templates(),
        }
    }
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "config.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match std::env::var(&cap[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let url = Url::parse(&config.source.listing_url).map_err(|e| {
        ConfigError::ValidationError(format!(
            "source.listing_url '{}' is not a valid URL: {e}",
            config.source.listing_url
        ))
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::ValidationError(format!(
            "source.listing_url must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if config.source.request_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "source.request_timeout_secs must be positive".to_string(),
        ));
    }

    if config.source.max_concurrent_files == 0 {
        return Err(ConfigError::ValidationError(
            "source.max_concurrent_files must be at least 1".to_string(),
        ));
    }

    // Placeholder and syntax checks do not depend on the date.
    let templates = config.patterns.templates();
    FilePatternMatcher::new(
        templates.iter().map(|(t, template)| (*t, template.as_str())),
        NaiveDate::MIN,
    )?;

    Ok(())
}
