//! Transport-agnostic domain types: profile cache, form schema, outcomes.

mod enrollment;
mod form;
mod id;
mod profile;

pub use enrollment::{
    open_entries, parse_history, EnrollmentStatus, EnrollmentTask, HistoryEntry, SubmissionOutcome,
    SubmitReceipt, SubmitRequest, TaskReport, SUCCESS_STATUS,
};
pub use form::{
    build_submission, parse_required_fields, FillerPolicy, RequiredField, SubmissionField,
    DEFAULT_FILLER, DEFAULT_MIN_LENGTH,
};
pub use id::{AccessToken, EnrollmentId};
pub use profile::{FieldNames, ProfileCache, ProfileField};
