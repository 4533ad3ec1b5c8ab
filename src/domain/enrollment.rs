//! Enrollment tasks, submission results, and history entries.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::form::SubmissionField;
use super::id::{AccessToken, EnrollmentId};
use crate::error::EnrollError;

/// Status code the submit endpoint returns on success.
pub const SUCCESS_STATUS: i64 = 0;

/// Immutable identity of one submission attempt stream.
#[derive(Debug, Clone)]
pub struct EnrollmentTask {
    pub id: EnrollmentId,
    pub access_token: AccessToken,
}

impl EnrollmentTask {
    pub fn new(id: impl Into<EnrollmentId>, access_token: AccessToken) -> Self {
        Self {
            id: id.into(),
            access_token,
        }
    }
}

/// Result of one poll iteration, or the terminal result of a submitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum SubmissionOutcome {
    /// The server accepted the submission.
    Success,
    /// The form has no required fields yet.
    SchemaNotYetOpen,
    /// The server rejected a submission; retryable.
    TransientFailure(String),
    /// The failure budget ran out.
    ExhaustedRetries,
    /// The cancellation signal was observed.
    Cancelled,
    /// The submitter could not start (profile fetch failed) or its task died.
    Failed(String),
}

impl SubmissionOutcome {
    /// Whether this outcome ends a submitter.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Success | Self::ExhaustedRetries | Self::Cancelled | Self::Failed(_)
        )
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Short label for tables and log fields.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::SchemaNotYetOpen => "not_open",
            Self::TransientFailure(_) => "rejected",
            Self::ExhaustedRetries => "exhausted",
            Self::Cancelled => "cancelled",
            Self::Failed(_) => "failed",
        }
    }
}

impl fmt::Display for SubmissionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TransientFailure(reason) | Self::Failed(reason) => {
                write!(f, "{}: {reason}", self.label())
            }
            _ => f.write_str(self.label()),
        }
    }
}

/// What the coordinator reports for one requested id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskReport {
    pub id: EnrollmentId,
    pub outcome: SubmissionOutcome,
    /// Rejected submissions consumed from the failure budget.
    pub failed_attempts: u32,
    /// Detail fetches performed.
    pub polls: u64,
}

/// Body of the submit request.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitRequest<'a> {
    pub access_token: &'a str,
    pub eid: &'a str,
    pub info: &'a [SubmissionField],
    pub on_behalf: u8,
    pub items: [Value; 0],
    pub referer: &'a str,
    pub fee_type: &'a str,
}

impl<'a> SubmitRequest<'a> {
    #[must_use]
    pub fn new(task: &'a EnrollmentTask, info: &'a [SubmissionField]) -> Self {
        Self {
            access_token: task.access_token.expose(),
            eid: task.id.as_str(),
            info,
            on_behalf: 0,
            items: [],
            referer: "",
            fee_type: "",
        }
    }
}

/// Decoded response of the submit endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubmitReceipt {
    pub sta: i64,
    #[serde(default, deserialize_with = "lenient_message")]
    pub msg: String,
}

impl SubmitReceipt {
    pub fn parse(response: &Value) -> Result<Self, EnrollError> {
        Self::deserialize(response).map_err(|e| EnrollError::MalformedSubmitResponse(e.to_string()))
    }

    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.sta == SUCCESS_STATUS
    }
}

fn lenient_message<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Remote status of a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    NotStarted,
    InProgress,
    Closed,
}

impl EnrollmentStatus {
    #[must_use]
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::NotStarted,
            1 => Self::InProgress,
            _ => Self::Closed,
        }
    }

    /// Entries that can still be submitted to.
    #[must_use]
    pub fn is_open(self) -> bool {
        !matches!(self, Self::Closed)
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotStarted => "not started",
            Self::InProgress => "in progress",
            Self::Closed => "closed",
        })
    }
}

/// One entry of the user's enrollment history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub eid: EnrollmentId,
    pub title: String,
    pub status: EnrollmentStatus,
}

#[derive(Debug, Deserialize)]
struct RawHistoryEntry {
    eid: EnrollmentId,
    #[serde(default)]
    title: String,
    status: i64,
}

#[derive(Debug, Deserialize)]
struct HistoryResponse {
    data: Vec<RawHistoryEntry>,
}

/// Decode a history-listing response.
pub fn parse_history(response: &Value) -> Result<Vec<HistoryEntry>, EnrollError> {
    let decoded = HistoryResponse::deserialize(response)
        .map_err(|e| EnrollError::MalformedHistory(e.to_string()))?;

    Ok(decoded
        .data
        .into_iter()
        .map(|raw| HistoryEntry {
            eid: raw.eid,
            title: raw.title,
            status: EnrollmentStatus::from_code(raw.status),
        })
        .collect())
}

/// Entries that are not started or in progress, in listing order.
#[must_use]
pub fn open_entries(entries: &[HistoryEntry]) -> Vec<&HistoryEntry> {
    entries.iter().filter(|e| e.status.is_open()).collect()
}
