//! Canned API responses and test settings.
//!
//! Single source of truth for payload shapes used across tests.

use std::time::Duration;

use serde_json::{json, Value};

use crate::application::SubmitterSettings;
use crate::domain::FillerPolicy;

/// Submitter settings with a 1 ms poll interval.
pub fn fast_settings() -> SubmitterSettings {
    SubmitterSettings {
        poll_interval: Duration::from_millis(1),
        failure_limit: 20,
        filler: FillerPolicy::default(),
    }
}

/// `userinfo` response with one entry per `(name, value)`.
pub fn profile(entries: &[(&str, &str)]) -> Value {
    let extra_info: Vec<Value> = entries
        .iter()
        .map(|(name, value)| json!({ "name": name, "value": value }))
        .collect();
    json!({ "data": { "extra_info": extra_info } })
}

/// `req_detail` response for a form that has not opened.
pub fn closed_form() -> Value {
    json!({ "data": { "req_info": [] } })
}

/// `req_detail` response with `(field_name, field_key, min_length)` entries.
pub fn open_form(fields: &[(&str, &str, Option<usize>)]) -> Value {
    let req_info: Vec<Value> = fields
        .iter()
        .map(|(name, key, min_length)| match min_length {
            Some(len) => json!({ "field_name": name, "field_key": key, "min_length": len }),
            None => json!({ "field_name": name, "field_key": key }),
        })
        .collect();
    json!({ "data": { "req_info": req_info } })
}

/// Accepted submission.
pub fn accepted() -> Value {
    json!({ "sta": 0, "msg": "" })
}

/// Rejected submission with a server message.
pub fn rejected(message: &str) -> Value {
    json!({ "sta": -1, "msg": message })
}
