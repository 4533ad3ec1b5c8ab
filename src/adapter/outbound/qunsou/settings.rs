//! Enrollment API connection settings.

use serde::Deserialize;

/// Production base URL of the enrollment API.
pub const DEFAULT_BASE_URL: &str = "https://api-xcx-qunsou.weiyoubot.cn/xcx/enroll";

/// Desktop browser agent sent when no list is configured.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 6.2; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/60.0.3112.90 Safari/537.36";

/// HTTP settings for the enrollment API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL; endpoint paths such as `/v1/userinfo` are appended to it.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// User agents to send. One entry is sent on every request; with more,
    /// each request picks one at random.
    #[serde(default = "default_user_agents")]
    pub user_agents: Vec<String>,
    /// Whole-request timeout in milliseconds (0 disables it).
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds (0 disables it).
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_user_agents() -> Vec<String> {
    vec![DEFAULT_USER_AGENT.to_string()]
}

const fn default_timeout_ms() -> u64 {
    10_000
}

const fn default_connect_timeout_ms() -> u64 {
    5_000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agents: default_user_agents(),
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}
