//! `reqwest`-backed [`Transport`].

use std::time::Duration;

use async_trait::async_trait;
use rand::seq::SliceRandom;
use reqwest::header::USER_AGENT;
use reqwest::Client as HttpClient;
use serde_json::Value;
use tracing::trace;
use url::Url;

use super::settings::{ApiConfig, DEFAULT_USER_AGENT};
use crate::error::Result;
use crate::port::Transport;

/// User agents to choose from per request.
#[derive(Debug, Clone)]
pub struct UserAgentPool {
    agents: Vec<String>,
}

impl UserAgentPool {
    /// Build a pool; an empty list falls back to [`DEFAULT_USER_AGENT`].
    #[must_use]
    pub fn new(agents: Vec<String>) -> Self {
        let agents: Vec<String> = agents
            .into_iter()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect();
        if agents.is_empty() {
            return Self {
                agents: vec![DEFAULT_USER_AGENT.to_string()],
            };
        }
        Self { agents }
    }

    /// The agent for the next request.
    #[must_use]
    pub fn pick(&self) -> &str {
        match self.agents.as_slice() {
            [only] => only.as_str(),
            agents => agents
                .choose(&mut rand::thread_rng())
                .map_or(DEFAULT_USER_AGENT, String::as_str),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

/// Shared HTTP session: one connection pool and cookie store for every
/// submitter of a run.
pub struct HttpTransport {
    http: HttpClient,
    agents: UserAgentPool,
}

impl HttpTransport {
    /// Build the session described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built. There is no
    /// fallback client: it would lose the cookie store and the timeouts.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let mut builder = HttpClient::builder().cookie_store(true);
        if config.timeout_ms > 0 {
            builder = builder.timeout(Duration::from_millis(config.timeout_ms));
        }
        if config.connect_timeout_ms > 0 {
            builder = builder.connect_timeout(Duration::from_millis(config.connect_timeout_ms));
        }

        Ok(Self {
            http: builder.build()?,
            agents: UserAgentPool::new(config.user_agents.clone()),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_json(&self, url: &Url) -> Result<Value> {
        trace!(path = url.path(), "GET");
        let response = self
            .http
            .get(url.clone())
            .header(USER_AGENT, self.agents.pick())
            .send()
            .await?;
        Ok(response.json::<Value>().await?)
    }

    async fn post_json(&self, url: &Url, body: &Value) -> Result<Value> {
        trace!(path = url.path(), "POST");
        let response = self
            .http
            .post(url.clone())
            .header(USER_AGENT, self.agents.pick())
            .json(body)
            .send()
            .await?;
        Ok(response.json::<Value>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_pool_falls_back_to_default_agent() {
        let pool = UserAgentPool::new(vec![String::new(), "  ".into()]);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.pick(), DEFAULT_USER_AGENT);
    }

    #[test]
    fn single_agent_is_always_used() {
        let pool = UserAgentPool::new(vec!["agent/1".into()]);
        for _ in 0..10 {
            assert_eq!(pool.pick(), "agent/1");
        }
    }

    #[test]
    fn rotation_only_picks_configured_agents() {
        let agents = vec!["a/1".to_string(), "b/2".to_string(), "c/3".to_string()];
        let pool = UserAgentPool::new(agents.clone());
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let picked = pool.pick();
            assert!(agents.iter().any(|a| a == picked), "unexpected agent {picked}");
            seen.insert(picked.to_string());
        }
        assert_eq!(seen.len(), agents.len());
    }

    #[test]
    fn transport_builds_from_default_config() {
        let transport = HttpTransport::from_config(&ApiConfig::default()).unwrap();
        assert_eq!(transport.agents.pick(), DEFAULT_USER_AGENT);
    }

    #[test]
    fn transport_builds_without_timeouts() {
        let config = ApiConfig {
            timeout_ms: 0,
            connect_timeout_ms: 0,
            user_agents: vec!["a/1".into(), "b/2".into()],
            ..ApiConfig::default()
        };
        let transport = HttpTransport::from_config(&config).unwrap();
        assert_eq!(transport.agents.len(), 2);
    }
}
