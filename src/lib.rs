//! Enrollrush - competitive form submission for mini-program enrollments.
//!
//! Many enrollment forms open at a fixed time and close within seconds.
//! This crate fetches the user's saved profile once, polls each form until
//! its required-field schema appears, fills the form from the profile and
//! submits it, retrying rejected submissions up to a fixed budget.
//!
//! # Modules
//!
//! - [`domain`] - Profile cache, form schema, submission outcomes
//! - [`port`] - Enrollment API, transport and notifier traits
//! - [`application`] - Submitter state machine, bounded coordinator, cancellation
//! - [`adapter`] - HTTP client and CLI
//! - [`infrastructure`] - Configuration and runtime wiring
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `testkit` - Scripted transport, recording notifier and fixtures for tests
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use enrollrush::application::{Coordinator, SubmitterSettings};
//! use enrollrush::domain::{AccessToken, EnrollmentId};
//! use enrollrush::infrastructure::bootstrap;
//! use enrollrush::infrastructure::config::settings::Config;
//! use enrollrush::port::LogNotifier;
//!
//! # async fn demo() -> enrollrush::error::Result<()> {
//! let config = Config::parse_toml("")?;
//! let api = bootstrap::build_enrollment_api(&config)?;
//! let coordinator = Coordinator::new(api, Arc::new(LogNotifier), SubmitterSettings::default());
//! let _reports = coordinator
//!     .run_all(&[EnrollmentId::from("E1")], &AccessToken::new("token"))
//!     .await;
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
