//! Enrollment API client.
//!
//! Builds endpoint URLs and decodes responses on top of any [`Transport`].
//! Endpoints (relative to the configured base URL):
//!
//! - `GET  /v1/userinfo?access_token=…` - profile values
//! - `GET  /v1/req_detail?access_token=…&eid=…` - current form schema
//! - `POST /v5/enroll` - submission
//! - `GET  /v1/user/history?access_token=…` - enrollment history

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::domain::{
    parse_history, parse_required_fields, AccessToken, EnrollmentTask, HistoryEntry, ProfileCache,
    RequiredField, SubmissionField, SubmitReceipt, SubmitRequest,
};
use crate::error::{EnrollError, Error, Result};
use crate::port::{EnrollmentApi, Transport};

const PROFILE_PATH: &str = "/v1/userinfo";
const DETAIL_PATH: &str = "/v1/req_detail";
const SUBMIT_PATH: &str = "/v5/enroll";
const HISTORY_PATH: &str = "/v1/user/history";

/// Client for the enrollment endpoints.
///
/// Cheap to share: all state lives behind the `Arc`'d transport.
pub struct EnrollmentClient {
    transport: Arc<dyn Transport>,
    base_url: String,
}

impl EnrollmentClient {
    /// Create a client rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute URL.
    pub fn new(transport: Arc<dyn Transport>, base_url: &str) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)?;
        Ok(Self {
            transport,
            base_url,
        })
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url> {
        let url = format!("{}{path}", self.base_url);
        if params.is_empty() {
            return Ok(Url::parse(&url)?);
        }
        Ok(Url::parse_with_params(&url, params)?)
    }
}

fn transport_error(err: Error) -> EnrollError {
    err.into_enroll()
}

#[async_trait]
impl EnrollmentApi for EnrollmentClient {
    async fn fetch_profile(
        &self,
        token: &AccessToken,
    ) -> std::result::Result<ProfileCache, EnrollError> {
        let url = self
            .endpoint(PROFILE_PATH, &[("access_token", token.expose())])
            .map_err(transport_error)?;
        let response = self.transport.get_json(&url).await.map_err(transport_error)?;
        let profile = ProfileCache::load(&response)?;
        debug!(fields = profile.len(), "Fetched profile");
        Ok(profile)
    }

    async fn fetch_required_fields(
        &self,
        task: &EnrollmentTask,
    ) -> std::result::Result<Vec<RequiredField>, EnrollError> {
        let url = self
            .endpoint(
                DETAIL_PATH,
                &[
                    ("access_token", task.access_token.expose()),
                    ("eid", task.id.as_str()),
                ],
            )
            .map_err(transport_error)?;
        let response = self.transport.get_json(&url).await.map_err(transport_error)?;
        parse_required_fields(&response)
    }

    async fn submit(
        &self,
        task: &EnrollmentTask,
        fields: &[SubmissionField],
    ) -> std::result::Result<SubmitReceipt, EnrollError> {
        let url = self.endpoint(SUBMIT_PATH, &[]).map_err(transport_error)?;
        let body = serde_json::to_value(SubmitRequest::new(task, fields))
            .map_err(|e| transport_error(e.into()))?;
        let response = self
            .transport
            .post_json(&url, &body)
            .await
            .map_err(transport_error)?;
        SubmitReceipt::parse(&response)
    }

    async fn fetch_history(
        &self,
        token: &AccessToken,
    ) -> std::result::Result<Vec<HistoryEntry>, EnrollError> {
        let url = self
            .endpoint(HISTORY_PATH, &[("access_token", token.expose())])
            .map_err(transport_error)?;
        let response = self.transport.get_json(&url).await.map_err(transport_error)?;
        parse_history(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::transport::ScriptedTransport;
    use serde_json::json;

    fn client(transport: &Arc<ScriptedTransport>) -> EnrollmentClient {
        EnrollmentClient::new(transport.clone(), "https://api.example.test/xcx/enroll/").unwrap()
    }

    #[test]
    fn rejects_relative_base_url() {
        let transport = Arc::new(ScriptedTransport::new());
        assert!(EnrollmentClient::new(transport, "not a url").is_err());
    }

    #[tokio::test]
    async fn detail_request_carries_token_and_eid() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.on_detail("E1", json!({ "data": { "req_info": [] } }));

        let task = EnrollmentTask::new("E1", AccessToken::new("tok en"));
        let fields = client(&transport).fetch_required_fields(&task).await.unwrap();
        assert!(fields.is_empty());

        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].url.as_str(),
            "https://api.example.test/xcx/enroll/v1/req_detail?access_token=tok+en&eid=E1"
        );
    }

    #[tokio::test]
    async fn submit_posts_the_wire_body() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.on_submit("E1", json!({ "sta": 0 }));

        let task = EnrollmentTask::new("E1", AccessToken::new("tok"));
        let fields = vec![SubmissionField {
            field_name: "phone".into(),
            field_value: "123".into(),
            field_key: json!("k1"),
        }];

        let receipt = client(&transport).submit(&task, &fields).await.unwrap();
        assert!(receipt.is_accepted());

        let calls = transport.calls();
        assert_eq!(calls[0].url.path(), "/xcx/enroll/v5/enroll");
        assert_eq!(
            calls[0].body,
            Some(json!({
                "access_token": "tok",
                "eid": "E1",
                "info": [{ "field_name": "phone", "field_value": "123", "field_key": "k1" }],
                "on_behalf": 0,
                "items": [],
                "referer": "",
                "fee_type": ""
            }))
        );
    }

    #[tokio::test]
    async fn transport_failures_surface_as_transport_errors() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.fail_profile("connection reset");

        let err = client(&transport)
            .fetch_profile(&AccessToken::new("tok"))
            .await
            .unwrap_err();
        assert!(matches!(err, EnrollError::Transport(_)), "{err}");
    }

    #[tokio::test]
    async fn history_is_decoded() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.on_history(json!({
            "data": [ { "eid": "a", "title": "Talk", "status": 1 } ]
        }));

        let history = client(&transport)
            .fetch_history(&AccessToken::new("tok"))
            .await
            .unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].title, "Talk");
    }
}
