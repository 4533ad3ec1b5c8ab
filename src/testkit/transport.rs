//! Scripted [`Transport`] for exercising the enrollment client offline.
//!
//! Replies are queued per route (profile, history) or per route and
//! enrollment id (detail, submit). Each call pops the next reply; the last
//! reply of a queue repeats forever, so `on_detail("A", closed)` alone
//! keeps enrollment `A` closed for the whole test.
//!
//! The transport also records every call and tracks how many calls were in
//! flight at once, for concurrency assertions.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};
use url::Url;

use crate::error::{EnrollError, Error, Result};
use crate::port::Transport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Route {
    Profile,
    Detail,
    Submit,
    History,
    Unknown,
}

impl Route {
    fn of(url: &Url) -> Self {
        let path = url.path();
        if path.ends_with("/v1/userinfo") {
            Self::Profile
        } else if path.ends_with("/v1/req_detail") {
            Self::Detail
        } else if path.ends_with("/v5/enroll") {
            Self::Submit
        } else if path.ends_with("/v1/user/history") {
            Self::History
        } else {
            Self::Unknown
        }
    }
}

#[derive(Debug, Clone)]
enum Reply {
    Json(Value),
    /// A body that is not JSON (e.g. an HTML error page).
    NotJson(String),
    Fail(String),
}

impl Reply {
    fn into_result(self) -> Result<Value> {
        match self {
            Reply::Json(value) => Ok(value),
            Reply::NotJson(body) => serde_json::from_str::<Value>(&body).map_err(Error::from),
            Reply::Fail(message) => Err(EnrollError::Transport(message).into()),
        }
    }
}

/// One recorded request.
#[derive(Debug, Clone)]
pub struct Call {
    pub method: &'static str,
    pub url: Url,
    pub body: Option<Value>,
}

impl Call {
    /// The enrollment id carried by the request, from the query or body.
    #[must_use]
    pub fn eid(&self) -> Option<String> {
        if let Some(body) = &self.body {
            return body.get("eid").and_then(Value::as_str).map(str::to_owned);
        }
        self.url
            .query_pairs()
            .find(|(k, _)| k == "eid")
            .map(|(_, v)| v.into_owned())
    }
}

type Key = (Route, Option<String>);

/// Scripted transport. See the module docs.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<HashMap<Key, VecDeque<Reply>>>,
    calls: Mutex<Vec<Call>>,
    latency: Duration,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every reply by `latency` so concurrent calls overlap.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    fn push(&self, route: Route, eid: Option<&str>, reply: Reply) {
        self.replies
            .lock()
            .entry((route, eid.map(str::to_owned)))
            .or_default()
            .push_back(reply);
    }

    pub fn on_profile(&self, response: Value) {
        self.push(Route::Profile, None, Reply::Json(response));
    }

    pub fn fail_profile(&self, message: &str) {
        self.push(Route::Profile, None, Reply::Fail(message.to_string()));
    }

    pub fn on_detail(&self, eid: &str, response: Value) {
        self.push(Route::Detail, Some(eid), Reply::Json(response));
    }

    pub fn on_detail_not_json(&self, eid: &str, body: &str) {
        self.push(Route::Detail, Some(eid), Reply::NotJson(body.to_string()));
    }

    pub fn fail_detail(&self, eid: &str, message: &str) {
        self.push(Route::Detail, Some(eid), Reply::Fail(message.to_string()));
    }

    pub fn on_submit(&self, eid: &str, response: Value) {
        self.push(Route::Submit, Some(eid), Reply::Json(response));
    }

    pub fn fail_submit(&self, eid: &str, message: &str) {
        self.push(Route::Submit, Some(eid), Reply::Fail(message.to_string()));
    }

    pub fn on_history(&self, response: Value) {
        self.push(Route::History, None, Reply::Json(response));
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    /// Number of detail fetches for `eid`.
    pub fn detail_count(&self, eid: &str) -> usize {
        self.count(Route::Detail, eid)
    }

    /// Number of submissions for `eid`.
    pub fn submit_count(&self, eid: &str) -> usize {
        self.count(Route::Submit, eid)
    }

    fn count(&self, route: Route, eid: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| Route::of(&c.url) == route && c.eid().as_deref() == Some(eid))
            .count()
    }

    /// Highest number of calls that were in flight at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    fn next_reply(&self, route: Route, eid: Option<String>) -> Reply {
        let mut replies = self.replies.lock();
        if let Some(queue) = replies.get_mut(&(route, eid)) {
            if queue.len() > 1 {
                if let Some(reply) = queue.pop_front() {
                    return reply;
                }
            }
            if let Some(reply) = queue.front() {
                return reply.clone();
            }
        }
        default_reply(route)
    }

    async fn dispatch(&self, call: Call) -> Result<Value> {
        let route = Route::of(&call.url);
        let eid = match route {
            Route::Detail | Route::Submit => call.eid(),
            _ => None,
        };
        self.calls.lock().push(call);

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let reply = self.next_reply(route, eid);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        reply.into_result()
    }
}

fn default_reply(route: Route) -> Reply {
    match route {
        Route::Profile => Reply::Json(json!({ "data": { "extra_info": [] } })),
        Route::Detail => Reply::Json(json!({ "data": { "req_info": [] } })),
        Route::Submit => Reply::Json(json!({ "sta": -1, "msg": "unscripted submission" })),
        Route::History => Reply::Json(json!({ "data": [] })),
        Route::Unknown => Reply::Fail("unknown route".to_string()),
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get_json(&self, url: &Url) -> Result<Value> {
        self.dispatch(Call {
            method: "GET",
            url: url.clone(),
            body: None,
        })
        .await
    }

    async fn post_json(&self, url: &Url, body: &Value) -> Result<Value> {
        self.dispatch(Call {
            method: "POST",
            url: url.clone(),
            body: Some(body.clone()),
        })
        .await
    }
}
