//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!                    │ submitter / coordinator │
//!                    └────────────┬────────────┘
//!              ┌──────────────────┼──────────────────┐
//!              ▼                  ▼                  ▼
//!      ┌──────────────┐   ┌──────────────┐   ┌─────────────┐
//!      │ EnrollmentApi│──▶│  Transport   │   │  Notifier   │
//!      └──────────────┘   └──────────────┘   └─────────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`EnrollmentApi`] - Profile, detail, submit, and history endpoints
//! - [`Transport`] - JSON `GET`/`POST` shared by all submitters
//! - [`Notifier`] - Submitter state transitions (logging, console)

pub mod outbound;

pub use outbound::enrollment::EnrollmentApi;
pub use outbound::notifier::{
    Event, LogNotifier, Notifier, NotifierRegistry, NullNotifier, RejectionEvent,
};
pub use outbound::transport::Transport;
