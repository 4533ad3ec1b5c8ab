//! Event-collecting [`Notifier`] for assertions.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::domain::SubmissionOutcome;
use crate::port::{Event, Notifier};

/// Thread-safe event collector. Clones share the same event list.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    events: Arc<Mutex<Vec<Event>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Events belonging to one enrollment.
    pub fn events_for(&self, eid: &str) -> Vec<Event> {
        self.events
            .lock()
            .iter()
            .filter(|e| e.eid().as_str() == eid)
            .cloned()
            .collect()
    }

    /// The terminal outcome reported for `eid`, if any.
    pub fn finished(&self, eid: &str) -> Option<SubmissionOutcome> {
        self.events_for(eid).into_iter().find_map(|e| match e {
            Event::Finished { outcome, .. } => Some(outcome),
            _ => None,
        })
    }

    /// Number of rejection events for `eid`.
    pub fn rejections(&self, eid: &str) -> usize {
        self.events_for(eid)
            .iter()
            .filter(|e| matches!(e, Event::SubmissionRejected(_)))
            .count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, event: Event) {
        self.events.lock().push(event);
    }
}
