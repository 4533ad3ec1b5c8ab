//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`transport`] - [`ScriptedTransport`](transport::ScriptedTransport):
//!   per-route canned replies, call log, and in-flight tracking.
//! - [`notifier`] - [`RecordingNotifier`](notifier::RecordingNotifier).
//! - [`fixtures`] - Response builders and fast submitter settings.

pub mod fixtures;
pub mod notifier;
pub mod transport;
