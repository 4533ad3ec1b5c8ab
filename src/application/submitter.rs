//! Per-enrollment poll/submit loop.
//!
//! ```text
//! FetchingProfile ──▶ Polling ──▶ Submitting ──▶ Succeeded
//!        │              ▲  │          │
//!        ▼              └──┴──────────┘ (rejected: budget -1)
//!      Failed           │
//!                       ├──▶ Exhausted  (budget spent)
//!                       └──▶ Cancelled  (signal seen at a poll boundary)
//! ```
//!
//! "Form not open" polls never touch the failure budget; only rejected
//! submissions do.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument};

use super::cancel::CancellationSignal;
use crate::domain::{
    build_submission, EnrollmentId, EnrollmentTask, FillerPolicy, ProfileCache, SubmissionOutcome,
    TaskReport,
};
use crate::port::{EnrollmentApi, Event, Notifier, RejectionEvent};

/// Default delay between polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Default number of rejected submissions before giving up.
pub const DEFAULT_FAILURE_LIMIT: u32 = 20;

/// Tuning for a submitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitterSettings {
    pub poll_interval: Duration,
    pub failure_limit: u32,
    pub filler: FillerPolicy,
}

impl Default for SubmitterSettings {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            failure_limit: DEFAULT_FAILURE_LIMIT,
            filler: FillerPolicy::default(),
        }
    }
}

/// Retry/poll state machine for one enrollment id.
pub struct EnrollmentSubmitter {
    task: EnrollmentTask,
    api: Arc<dyn EnrollmentApi>,
    notifier: Arc<dyn Notifier>,
    cancel: CancellationSignal,
    settings: SubmitterSettings,
    failed_attempts: u32,
    polls: u64,
}

impl EnrollmentSubmitter {
    pub fn new(
        task: EnrollmentTask,
        api: Arc<dyn EnrollmentApi>,
        notifier: Arc<dyn Notifier>,
        cancel: CancellationSignal,
        settings: SubmitterSettings,
    ) -> Self {
        Self {
            task,
            api,
            notifier,
            cancel,
            settings,
            failed_attempts: 0,
            polls: 0,
        }
    }

    /// The enrollment this submitter drives.
    #[must_use]
    pub fn id(&self) -> &EnrollmentId {
        &self.task.id
    }

    /// Drive the submitter to a terminal outcome.
    #[instrument(skip(self), fields(eid = %self.task.id))]
    pub async fn run(mut self) -> TaskReport {
        if self.cancel.is_cancelled() {
            return self.finish(SubmissionOutcome::Cancelled);
        }

        let profile = match self.api.fetch_profile(&self.task.access_token).await {
            Ok(profile) => {
                debug!(fields = ?profile.names(), "Profile cached");
                self.notify(Event::ProfileLoaded {
                    eid: self.task.id.clone(),
                    fields: profile.len(),
                });
                profile
            }
            Err(err) => {
                let reason = err.to_string();
                self.notify(Event::ProfileFailed {
                    eid: self.task.id.clone(),
                    reason: reason.clone(),
                });
                return self.finish(SubmissionOutcome::Failed(reason));
            }
        };

        let outcome = self.poll(&profile).await;
        self.finish(outcome)
    }

    async fn poll(&mut self, profile: &ProfileCache) -> SubmissionOutcome {
        loop {
            if self.cancel.is_cancelled() {
                return SubmissionOutcome::Cancelled;
            }

            match self.attempt(profile).await {
                outcome if outcome.is_terminal() => return outcome,
                SubmissionOutcome::TransientFailure(_)
                    if self.failed_attempts >= self.settings.failure_limit =>
                {
                    return SubmissionOutcome::ExhaustedRetries;
                }
                _ => {}
            }

            if self.cancel.sleep(self.settings.poll_interval).await {
                return SubmissionOutcome::Cancelled;
            }
        }
    }

    /// One fetch → build → submit iteration.
    ///
    /// Returns `SchemaNotYetOpen` when there is nothing to submit,
    /// `TransientFailure` on a rejection, and `Cancelled` when the signal was
    /// set while the detail request was in flight.
    async fn attempt(&mut self, profile: &ProfileCache) -> SubmissionOutcome {
        self.polls += 1;

        let required = match self.api.fetch_required_fields(&self.task).await {
            Ok(required) => required,
            Err(err) => {
                self.notify(Event::DetailUnavailable {
                    eid: self.task.id.clone(),
                    reason: err.to_string(),
                });
                return SubmissionOutcome::SchemaNotYetOpen;
            }
        };

        let fields = build_submission(&required, profile, &self.settings.filler);
        if fields.is_empty() {
            self.notify(Event::FormNotOpen {
                eid: self.task.id.clone(),
                poll: self.polls,
            });
            return SubmissionOutcome::SchemaNotYetOpen;
        }

        if self.cancel.is_cancelled() {
            return SubmissionOutcome::Cancelled;
        }

        self.notify(Event::FormOpened {
            eid: self.task.id.clone(),
            required: fields.len(),
        });

        let message = match self.api.submit(&self.task, &fields).await {
            Ok(receipt) if receipt.is_accepted() => return SubmissionOutcome::Success,
            Ok(receipt) => receipt.msg,
            Err(err) => err.to_string(),
        };

        self.failed_attempts += 1;
        self.notify(Event::SubmissionRejected(RejectionEvent {
            eid: self.task.id.clone(),
            attempt: self.failed_attempts,
            limit: self.settings.failure_limit,
            message: message.clone(),
        }));
        SubmissionOutcome::TransientFailure(message)
    }

    fn finish(self, outcome: SubmissionOutcome) -> TaskReport {
        debug!(
            outcome = %outcome,
            failed_attempts = self.failed_attempts,
            polls = self.polls,
            "Submitter stopped"
        );
        self.notify(Event::Finished {
            eid: self.task.id.clone(),
            outcome: outcome.clone(),
        });
        TaskReport {
            id: self.task.id,
            outcome,
            failed_attempts: self.failed_attempts,
            polls: self.polls,
        }
    }

    fn notify(&self, event: Event) {
        self.notifier.notify(event);
    }
}
