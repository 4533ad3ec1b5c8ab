//! Enrollment form schema and submission payload construction.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::profile::ProfileCache;
use crate::error::EnrollError;

/// Filler character used for required fields with no cached value.
pub const DEFAULT_FILLER: char = '1';

/// Filler length used when a field declares no (or a zero) minimum length.
pub const DEFAULT_MIN_LENGTH: usize = 11;

/// A field the organizer's current form demands.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RequiredField {
    pub field_name: String,
    /// Opaque key echoed back verbatim on submission.
    #[serde(default)]
    pub field_key: Value,
    #[serde(default)]
    pub min_length: Option<usize>,
}

impl RequiredField {
    pub fn new(
        field_name: impl Into<String>,
        field_key: impl Into<Value>,
        min_length: Option<usize>,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            field_key: field_key.into(),
            min_length,
        }
    }
}

/// One resolved entry of the submission `info` array.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionField {
    pub field_name: String,
    pub field_value: String,
    pub field_key: Value,
}

/// How values are synthesised for fields the profile does not cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillerPolicy {
    pub filler: char,
    pub default_min_length: usize,
}

impl FillerPolicy {
    /// Filler string for a field declaring `min_length`.
    #[must_use]
    pub fn fill(&self, min_length: Option<usize>) -> String {
        let len = match min_length {
            Some(0) | None => self.default_min_length,
            Some(n) => n,
        };
        std::iter::repeat(self.filler).take(len).collect()
    }
}

impl Default for FillerPolicy {
    fn default() -> Self {
        Self {
            filler: DEFAULT_FILLER,
            default_min_length: DEFAULT_MIN_LENGTH,
        }
    }
}

/// Build the submission fields for the current schema.
///
/// Output order follows `required`. An empty `required` yields an empty
/// result, which callers treat as "form not open yet".
#[must_use]
pub fn build_submission(
    required: &[RequiredField],
    profile: &ProfileCache,
    policy: &FillerPolicy,
) -> Vec<SubmissionField> {
    required
        .iter()
        .map(|field| SubmissionField {
            field_name: field.field_name.clone(),
            field_value: profile
                .get(&field.field_name)
                .map_or_else(|| policy.fill(field.min_length), str::to_owned),
            field_key: field.field_key.clone(),
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct DetailData {
    #[serde(default)]
    req_info: Option<Vec<RequiredField>>,
}

#[derive(Debug, Deserialize)]
struct DetailResponse {
    #[serde(default)]
    data: Option<DetailData>,
}

/// Extract the required-field list from an enrollment-detail response.
///
/// A missing `data` or `req_info` is reported as an empty list (form not
/// open). Entries that do not decode are a [`EnrollError::MalformedDetail`].
pub fn parse_required_fields(response: &Value) -> Result<Vec<RequiredField>, EnrollError> {
    let decoded = DetailResponse::deserialize(response)
        .map_err(|e| EnrollError::MalformedDetail(e.to_string()))?;

    Ok(decoded
        .data
        .and_then(|data| data.req_info)
        .unwrap_or_default())
}
