//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; the access token is read from the
//! `ENROLLRUSH_ACCESS_TOKEN` environment variable, never from the file.
//!
//! # Example
//!
//! ```no_run
//! use enrollrush::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use super::logging::LoggingConfig;
use super::submit::SubmitConfig;
use crate::adapter::outbound::qunsou::settings::ApiConfig;
use crate::application::SubmitterSettings;
use crate::domain::AccessToken;
use crate::error::{ConfigError, Result};

/// Environment variable holding the access token.
pub const ACCESS_TOKEN_ENV: &str = "ENROLLRUSH_ACCESS_TOKEN";

/// Main application configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Enrollment API connection settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Poll/submit loop tuning.
    #[serde(default)]
    pub submit: SubmitConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Access token from [`ACCESS_TOKEN_ENV`].
    #[serde(skip)]
    pub access_token: Option<AccessToken>,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config = Self::parse_unvalidated(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse TOML content and pick up the access token, without validating.
    ///
    /// For callers that apply overrides first and then call
    /// [`Config::validate`] themselves.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed.
    #[allow(clippy::result_large_err)]
    pub fn parse_unvalidated(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        config.access_token = std::env::var(ACCESS_TOKEN_ENV)
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .map(AccessToken::new);

        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Self::load_unvalidated(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file without validating it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML is malformed.
    #[allow(clippy::result_large_err)]
    pub fn load_unvalidated<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_unvalidated(&content)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns the first missing or out-of-range field.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "base_url" }.into());
        }
        if url::Url::parse(&self.api.base_url).is_err() {
            return Err(ConfigError::InvalidValue {
                field: "base_url",
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }
        if self.api.user_agents.iter().all(|a| a.trim().is_empty()) {
            return Err(ConfigError::MissingField {
                field: "user_agents",
            }
            .into());
        }
        if self.submit.poll_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "poll_interval_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.submit.failure_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "failure_limit",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.submit.max_concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_concurrency",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.submit.default_min_length == 0 {
            return Err(ConfigError::InvalidValue {
                field: "default_min_length",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Settings handed to every submitter.
    #[must_use]
    pub fn submitter_settings(&self) -> SubmitterSettings {
        SubmitterSettings::from(&self.submit)
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
