//! Handler for `check config`.

use std::path::Path;

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::settings::{Config, ACCESS_TOKEN_ENV};

/// Validate a configuration file without starting a run.
pub fn execute_config(config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)?;

    output::section("Configuration Check");
    output::field("Config", config_path.display());
    output::success("Configuration file is valid");

    output::section("Summary");
    output::field("Base URL", &config.api.base_url);
    output::field("User agents", config.api.user_agents.len());
    output::field("Poll", format!("{} ms", config.submit.poll_interval_ms));
    output::field("Failures", config.submit.failure_limit);
    output::field("Concurrency", config.submit.max_concurrency);

    if config.access_token.is_some() {
        output::success("Access token detected");
    } else {
        output::warning(&format!(
            "Access token not configured (set {ACCESS_TOKEN_ENV} or pass --token)"
        ));
    }

    output::success("Configuration check complete");
    Ok(())
}
