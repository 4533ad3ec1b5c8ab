//! Notifier port for submitter state transitions.
//!
//! Every transition of an enrollment submitter (profile loaded, form still
//! closed, form opened, rejection, success, exhaustion, cancellation) is
//! published as an [`Event`] so operators see it immediately.

use crate::domain::{EnrollmentId, SubmissionOutcome};

/// Events emitted by submitters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Profile fetched and cached.
    ProfileLoaded { eid: EnrollmentId, fields: usize },
    /// Profile fetch failed; the submitter stops.
    ProfileFailed { eid: EnrollmentId, reason: String },
    /// Detail fetched but the form has no required fields yet.
    FormNotOpen { eid: EnrollmentId, poll: u64 },
    /// Detail fetch failed or returned something undecodable.
    DetailUnavailable { eid: EnrollmentId, reason: String },
    /// Required fields are present; a submission follows.
    FormOpened { eid: EnrollmentId, required: usize },
    /// The server rejected a submission.
    SubmissionRejected(RejectionEvent),
    /// Terminal outcome reached.
    Finished { eid: EnrollmentId, outcome: SubmissionOutcome },
}

impl Event {
    /// The enrollment the event belongs to.
    #[must_use]
    pub fn eid(&self) -> &EnrollmentId {
        match self {
            Event::ProfileLoaded { eid, .. }
            | Event::ProfileFailed { eid, .. }
            | Event::FormNotOpen { eid, .. }
            | Event::DetailUnavailable { eid, .. }
            | Event::FormOpened { eid, .. }
            | Event::Finished { eid, .. } => eid,
            Event::SubmissionRejected(e) => &e.eid,
        }
    }
}

/// Submission rejection event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectionEvent {
    pub eid: EnrollmentId,
    /// Failures consumed so far, this one included.
    pub attempt: u32,
    /// Failure budget.
    pub limit: u32,
    /// Server-reported message (or the transport error text).
    pub message: String,
}

/// Trait for notification handlers.
///
/// Implementations must be thread-safe (`Send + Sync`) and must return
/// quickly: submitters call `notify` inline between HTTP calls.
pub trait Notifier: Send + Sync {
    /// Handle an event.
    fn notify(&self, event: Event);
}

/// Registry of notifiers (composite pattern).
///
/// Broadcasts events to all registered notifiers.
pub struct NotifierRegistry {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl NotifierRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { notifiers: vec![] }
    }

    /// Register a notifier.
    pub fn register(&mut self, notifier: Box<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    /// Number of registered notifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }
}

impl Notifier for NotifierRegistry {
    fn notify(&self, event: Event) {
        for notifier in &self.notifiers {
            notifier.notify(event.clone());
        }
    }
}

impl Default for NotifierRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A no-op notifier for when notifications are disabled.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _event: Event) {}
}

/// A logging notifier that logs events via tracing.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, event: Event) {
        use tracing::{debug, info, warn};
        match event {
            Event::ProfileLoaded { eid, fields } => {
                info!(eid = %eid, fields, "Profile loaded");
            }
            Event::ProfileFailed { eid, reason } => {
                warn!(eid = %eid, reason = %reason, "Profile fetch failed");
            }
            Event::FormNotOpen { eid, poll } => {
                debug!(eid = %eid, poll, "Form not open yet");
            }
            Event::DetailUnavailable { eid, reason } => {
                debug!(eid = %eid, reason = %reason, "Enrollment detail unavailable");
            }
            Event::FormOpened { eid, required } => {
                info!(eid = %eid, required, "Form open, submitting");
            }
            Event::SubmissionRejected(e) => {
                warn!(
                    eid = %e.eid,
                    attempt = e.attempt,
                    limit = e.limit,
                    message = %e.message,
                    "Submission rejected"
                );
            }
            Event::Finished { eid, outcome } => {
                info!(eid = %eid, outcome = %outcome, "Submitter finished");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct Collect(Arc<Mutex<Vec<Event>>>);

    impl Notifier for Collect {
        fn notify(&self, event: Event) {
            self.0.lock().unwrap().push(event);
        }
    }

    #[test]
    fn registry_broadcasts_to_every_notifier() {
        let first = Arc::new(Mutex::new(Vec::new()));
        let second = Arc::new(Mutex::new(Vec::new()));

        let mut registry = NotifierRegistry::new();
        registry.register(Box::new(Collect(first.clone())));
        registry.register(Box::new(NullNotifier));
        registry.register(Box::new(Collect(second.clone())));
        assert_eq!(registry.len(), 3);

        let event = Event::FormOpened {
            eid: EnrollmentId::from("E1"),
            required: 2,
        };
        registry.notify(event.clone());

        assert_eq!(*first.lock().unwrap(), vec![event.clone()]);
        assert_eq!(*second.lock().unwrap(), vec![event]);
    }

    #[test]
    fn every_event_exposes_its_eid() {
        let eid = EnrollmentId::from("E9");
        let rejection = Event::SubmissionRejected(RejectionEvent {
            eid: eid.clone(),
            attempt: 1,
            limit: 20,
            message: "full".into(),
        });
        assert_eq!(rejection.eid(), &eid);
    }
}
