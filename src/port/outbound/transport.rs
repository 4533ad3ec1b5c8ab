//! Raw JSON transport port.
//!
//! The enrollment client only needs two verbs. Implementations own
//! connection pooling, cookies, user agents, and timeouts, and must be safe
//! to share across concurrently running submitters.

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use crate::error::Result;

/// JSON-over-HTTP transport.
#[async_trait]
pub trait Transport: Send + Sync {
    /// `GET url` and decode the body as JSON.
    async fn get_json(&self, url: &Url) -> Result<Value>;

    /// `POST url` with a JSON body and decode the response as JSON.
    async fn post_json(&self, url: &Url, body: &Value) -> Result<Value>;
}
