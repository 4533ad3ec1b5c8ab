//! Configuration and token resolution shared by CLI handlers.

use std::path::Path;

use tracing::debug;

use crate::domain::AccessToken;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::{Config, ACCESS_TOKEN_ENV};

/// Load `path`, or built-in defaults when the file does not exist.
///
/// The result is not validated yet: handlers apply their flag overrides
/// first and then call [`Config::validate`].
pub fn load_or_default(path: &Path) -> Result<Config> {
    if path.exists() {
        return Config::load_unvalidated(path);
    }
    debug!(path = %path.display(), "Config file not found, using defaults");
    Config::parse_unvalidated("")
}

/// The `--token` flag wins over the environment.
pub fn resolve_token(flag: Option<&str>, config: &Config) -> Result<AccessToken> {
    if let Some(token) = flag.map(str::trim).filter(|t| !t.is_empty()) {
        return Ok(AccessToken::new(token));
    }
    config.access_token.clone().ok_or_else(|| {
        ConfigError::MissingField {
            field: ACCESS_TOKEN_ENV,
        }
        .into()
    })
}
