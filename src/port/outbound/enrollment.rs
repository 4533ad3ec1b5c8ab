//! Enrollment API port.
//!
//! Endpoint-level operations the submitter and CLI drive. Errors are
//! [`EnrollError`] so callers can decide per call site whether a failure is
//! fatal (profile) or just another poll (detail).

use async_trait::async_trait;

use crate::domain::{
    AccessToken, EnrollmentTask, HistoryEntry, ProfileCache, RequiredField, SubmissionField,
    SubmitReceipt,
};
use crate::error::EnrollError;

#[async_trait]
pub trait EnrollmentApi: Send + Sync {
    /// Fetch and cache the user's profile values.
    async fn fetch_profile(&self, token: &AccessToken) -> Result<ProfileCache, EnrollError>;

    /// Fetch the current required-field schema of an enrollment.
    ///
    /// An empty list means the form is not open yet.
    async fn fetch_required_fields(
        &self,
        task: &EnrollmentTask,
    ) -> Result<Vec<RequiredField>, EnrollError>;

    /// Submit one filled form.
    async fn submit(
        &self,
        task: &EnrollmentTask,
        fields: &[SubmissionField],
    ) -> Result<SubmitReceipt, EnrollError>;

    /// List the user's enrollment history.
    async fn fetch_history(&self, token: &AccessToken) -> Result<Vec<HistoryEntry>, EnrollError>;
}
