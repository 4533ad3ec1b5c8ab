//! Handler for the `run` command.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use super::command::RunArgs;
use super::console::ConsoleNotifier;
use super::{config, output};
use crate::adapter::inbound::listener;
use crate::application::CancellationSignal;
use crate::domain::{open_entries, AccessToken, EnrollmentId, SubmissionOutcome, TaskReport};
use crate::error::{Error, Result};
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;
use crate::port::{EnrollmentApi, Notifier};

/// Execute the run command.
pub async fn execute(args: &RunArgs) -> Result<()> {
    let config = prepare_config(args)?;
    config.init_logging();

    let token = config::resolve_token(args.token.as_deref(), &config)?;
    let api = bootstrap::build_enrollment_api(&config)?;
    let ids = resolve_ids(args, api.as_ref(), &token).await?;

    if ids.is_empty() {
        output::warning("No open enrollments to submit to");
        return Ok(());
    }

    print_startup(&config, &ids, &token);

    let cancel = CancellationSignal::new();
    listener::spawn_stdin_listener(cancel.clone());
    let ctrl_c = listener::spawn_ctrl_c_listener(cancel.clone());
    output::note("Press Enter (or Ctrl+C) to stop all tasks");

    let console: Option<Box<dyn Notifier>> = if output::is_json() || output::is_quiet() {
        None
    } else {
        Some(Box::new(ConsoleNotifier))
    };
    let notifier: Arc<dyn Notifier> = Arc::new(bootstrap::build_notifier_registry(console));
    let coordinator = bootstrap::build_coordinator(&config, api, notifier, cancel.clone());

    let reports = coordinator.run_all(&ids, &token).await;

    // Unblocks the Ctrl+C task; the stdin thread dies with the process.
    cancel.cancel();
    let _ = ctrl_c.await;

    print_reports(&reports);

    if reports.iter().any(|r| r.outcome.is_success()) {
        Ok(())
    } else {
        Err(Error::Task(format!(
            "no enrollment succeeded ({} attempted)",
            reports.len()
        )))
    }
}

/// Load the file (or defaults), apply flag overrides, then validate once.
fn prepare_config(args: &RunArgs) -> Result<Config> {
    let mut config = config::load_or_default(&args.config)?;
    apply_overrides(&mut config, args);
    config.validate()?;
    Ok(config)
}

fn apply_overrides(config: &mut Config, args: &RunArgs) {
    if let Some(max) = args.max_concurrency {
        config.submit.max_concurrency = max;
    }
    if let Some(ms) = args.poll_interval_ms {
        config.submit.poll_interval_ms = ms;
    }
    if let Some(limit) = args.failure_limit {
        config.submit.failure_limit = limit;
    }
    if let Some(level) = &args.log_level {
        config.logging.level.clone_from(level);
    }
    if args.json_logs || output::is_json() {
        config.logging.format = "json".into();
    }
}

async fn resolve_ids(
    args: &RunArgs,
    api: &dyn EnrollmentApi,
    token: &AccessToken,
) -> Result<Vec<EnrollmentId>> {
    if !args.all {
        return Ok(args
            .eids
            .iter()
            .map(|e| e.trim())
            .filter(|e| !e.is_empty())
            .map(EnrollmentId::from)
            .collect());
    }

    let history = api.fetch_history(token).await?;
    let ids: Vec<EnrollmentId> = open_entries(&history)
        .into_iter()
        .map(|entry| entry.eid.clone())
        .collect();
    info!(open = ids.len(), total = history.len(), "Resolved enrollments from history");
    Ok(ids)
}

fn print_startup(config: &Config, ids: &[EnrollmentId], token: &AccessToken) {
    if output::is_json() {
        return;
    }
    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Token", token.redacted());
    output::field("Enrollments", ids.len());
    output::field(
        "Concurrency",
        config.submit.max_concurrency.min(ids.len()),
    );
    output::field("Poll", format!("{} ms", config.submit.poll_interval_ms));
    output::field("Failures", config.submit.failure_limit);
    if output::verbosity() > 0 {
        output::field("Base URL", &config.api.base_url);
    }
}

fn print_reports(reports: &[TaskReport]) {
    if output::is_json() {
        output::json_output(json!({
            "command": "run",
            "reports": reports,
        }));
        return;
    }

    output::section("Results");
    for report in reports {
        let line = format!(
            "{}: {} (polls {}, rejected {})",
            report.id, report.outcome, report.polls, report.failed_attempts
        );
        match &report.outcome {
            SubmissionOutcome::Success => output::success(&line),
            SubmissionOutcome::Cancelled => output::note(&line),
            _ => output::warning(&line),
        }
    }
}
