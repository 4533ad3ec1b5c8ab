//! Bounded fan-out of submitters over a list of enrollment ids.

use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinSet;
use tracing::{info, warn};

use super::cancel::CancellationSignal;
use super::submitter::{EnrollmentSubmitter, SubmitterSettings};
use crate::domain::{AccessToken, EnrollmentId, EnrollmentTask, SubmissionOutcome, TaskReport};
use crate::port::{EnrollmentApi, Notifier};

/// Default number of submitters running at once.
pub const DEFAULT_MAX_CONCURRENCY: usize = 5;

/// Runs one [`EnrollmentSubmitter`] per id, at most `max_concurrency` at a
/// time.
///
/// All submitters share the API client (and its transport) and one
/// [`CancellationSignal`].
pub struct Coordinator {
    api: Arc<dyn EnrollmentApi>,
    notifier: Arc<dyn Notifier>,
    settings: SubmitterSettings,
    cancel: CancellationSignal,
    max_concurrency: usize,
}

impl Coordinator {
    pub fn new(
        api: Arc<dyn EnrollmentApi>,
        notifier: Arc<dyn Notifier>,
        settings: SubmitterSettings,
    ) -> Self {
        Self {
            api,
            notifier,
            settings,
            cancel: CancellationSignal::new(),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }

    /// Cap the number of concurrently running submitters (minimum 1).
    #[must_use]
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    /// Use an externally created signal instead of a fresh one.
    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationSignal) -> Self {
        self.cancel = cancel;
        self
    }

    #[must_use]
    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Handle for stopping the run from elsewhere.
    #[must_use]
    pub fn cancellation(&self) -> CancellationSignal {
        self.cancel.clone()
    }

    /// Submit to every id and wait until all of them reach a terminal state.
    ///
    /// Returns one report per requested id, in input order. A submitter that
    /// fails or panics never affects its siblings.
    pub async fn run_all(&self, ids: &[EnrollmentId], token: &AccessToken) -> Vec<TaskReport> {
        if ids.is_empty() {
            return Vec::new();
        }

        let slots_sem = Arc::new(Semaphore::new(self.max_concurrency));
        info!(
            enrollments = ids.len(),
            max_concurrency = self.max_concurrency,
            token = %token,
            "Starting enrollment run"
        );

        let mut pool = JoinSet::new();
        for (index, id) in ids.iter().enumerate() {
            let slots_sem = Arc::clone(&slots_sem);
            let submitter = self.submitter(id.clone(), token.clone());
            pool.spawn(async move {
                let report = match slots_sem.acquire_owned().await {
                    Ok(permit) => run_with_permit(submitter, permit).await,
                    Err(err) => aborted(submitter.id().clone(), err.to_string()),
                };
                (index, report)
            });
        }

        let mut slots: Vec<Option<TaskReport>> = vec![None; ids.len()];
        while let Some(joined) = pool.join_next().await {
            match joined {
                Ok((index, report)) => slots[index] = Some(report),
                Err(err) => warn!(error = %err, "Submitter slot task failed"),
            }
        }

        let reports: Vec<TaskReport> = slots
            .into_iter()
            .zip(ids)
            .map(|(slot, id)| {
                slot.unwrap_or_else(|| aborted(id.clone(), "aborted before reporting".into()))
            })
            .collect();

        let succeeded = reports.iter().filter(|r| r.outcome.is_success()).count();
        info!(succeeded, total = reports.len(), "Enrollment run finished");

        reports
    }

    fn submitter(&self, id: EnrollmentId, token: AccessToken) -> EnrollmentSubmitter {
        EnrollmentSubmitter::new(
            EnrollmentTask::new(id, token),
            Arc::clone(&self.api),
            Arc::clone(&self.notifier),
            self.cancel.clone(),
            self.settings,
        )
    }
}

/// Run one submitter while holding a concurrency slot.
///
/// The submitter gets its own task so a panic only loses its own id.
async fn run_with_permit(
    submitter: EnrollmentSubmitter,
    _permit: OwnedSemaphorePermit,
) -> TaskReport {
    let id = submitter.id().clone();
    match tokio::spawn(submitter.run()).await {
        Ok(report) => report,
        Err(err) => {
            warn!(eid = %id, error = %err, "Submitter task failed");
            aborted(id, err.to_string())
        }
    }
}

fn aborted(id: EnrollmentId, reason: String) -> TaskReport {
    TaskReport {
        id,
        outcome: SubmissionOutcome::Failed(reason),
        failed_attempts: 0,
        polls: 0,
    }
}
