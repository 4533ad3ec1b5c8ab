//! Console notifier: one timestamped line per submitter transition.

use chrono::Local;

use super::output::{self, Tone};
use crate::domain::SubmissionOutcome;
use crate::port::{Event, Notifier};

/// Prints submitter events for the operator.
///
/// "Form not open" polls are only shown with `-v`, since they arrive every
/// poll interval for every enrollment.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, event: Event) {
        let now = Local::now().format("%H:%M:%S").to_string();
        match event {
            Event::ProfileLoaded { eid, fields } => {
                let message = format!("{eid}: {fields} cached fields");
                output::event(&now, "profile", Tone::Neutral, &message);
            }
            Event::ProfileFailed { eid, reason } => {
                output::event(&now, "profile", Tone::Bad, &format!("{eid}: {reason}"));
            }
            Event::FormNotOpen { eid, poll } => {
                if output::verbosity() > 0 {
                    let message = format!("{eid}: not open yet (poll {poll})");
                    output::event(&now, "waiting", Tone::Pending, &message);
                }
            }
            Event::DetailUnavailable { eid, reason } => {
                if output::verbosity() > 0 {
                    let message = format!("{eid}: detail unavailable ({reason})");
                    output::event(&now, "waiting", Tone::Pending, &message);
                }
            }
            Event::FormOpened { eid, required } => {
                let message = format!("{eid}: submitting {required} fields");
                output::event(&now, "open", Tone::Neutral, &message);
            }
            Event::SubmissionRejected(e) => {
                output::event(
                    &now,
                    "rejected",
                    Tone::Bad,
                    &format!("{}: {} ({}/{})", e.eid, e.message, e.attempt, e.limit),
                );
            }
            Event::Finished { eid, outcome } => {
                let tone = match outcome {
                    SubmissionOutcome::Success => Tone::Good,
                    SubmissionOutcome::Cancelled => Tone::Pending,
                    _ => Tone::Bad,
                };
                output::event(&now, outcome.label(), tone, &format!("{eid}: {outcome}"));
            }
        }
    }
}
