//! Application services (use cases).
//!
//! - [`submitter`] - Poll/submit state machine for one enrollment
//! - [`coordinator`] - Bounded worker pool over many enrollments
//! - [`cancel`] - One-shot stop signal shared by a run

pub mod cancel;
pub mod coordinator;
pub mod submitter;

pub use cancel::CancellationSignal;
pub use coordinator::{Coordinator, DEFAULT_MAX_CONCURRENCY};
pub use submitter::{
    EnrollmentSubmitter, SubmitterSettings, DEFAULT_FAILURE_LIMIT, DEFAULT_POLL_INTERVAL,
};
