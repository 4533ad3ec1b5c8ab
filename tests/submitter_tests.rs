//! Poll/submit state machine against a scripted API.

mod support;

use std::sync::Arc;
use std::time::Duration;

use enrollrush::application::{CancellationSignal, EnrollmentSubmitter, SubmitterSettings};
use enrollrush::domain::{AccessToken, EnrollmentTask, SubmissionOutcome};
use enrollrush::port::Event;
use enrollrush::testkit::fixtures::{self, fast_settings};
use enrollrush::testkit::notifier::RecordingNotifier;
use enrollrush::testkit::transport::ScriptedTransport;
use serde_json::Value;

fn submitter(
    eid: &str,
    transport: &Arc<ScriptedTransport>,
    notifier: &RecordingNotifier,
    cancel: &CancellationSignal,
    settings: SubmitterSettings,
) -> EnrollmentSubmitter {
    EnrollmentSubmitter::new(
        EnrollmentTask::new(eid, AccessToken::new("tok")),
        support::api(transport),
        Arc::new(notifier.clone()),
        cancel.clone(),
        settings,
    )
}

fn submitted_values(transport: &ScriptedTransport) -> Vec<(String, String)> {
    let call = transport
        .calls()
        .into_iter()
        .find(|c| c.method == "POST")
        .expect("a submission was made");
    let body = call.body.expect("submission has a body");
    body["info"]
        .as_array()
        .expect("info is a list")
        .iter()
        .map(|f| {
            (
                f["field_name"].as_str().unwrap_or_default().to_string(),
                f["field_value"].as_str().unwrap_or_default().to_string(),
            )
        })
        .collect()
}

#[tokio::test]
async fn closed_polls_never_consume_the_failure_budget() {
    let transport = Arc::new(ScriptedTransport::new());
    for _ in 0..30 {
        transport.on_detail("E1", fixtures::closed_form());
    }
    transport.on_detail("E1", fixtures::open_form(&[("姓名", "name", None)]));
    transport.on_submit("E1", fixtures::accepted());
    let notifier = RecordingNotifier::new();

    let report = submitter(
        "E1",
        &transport,
        &notifier,
        &CancellationSignal::new(),
        fast_settings(),
    )
    .run()
    .await;

    assert_eq!(report.outcome, SubmissionOutcome::Success);
    assert_eq!(report.failed_attempts, 0);
    assert_eq!(report.polls, 31);
    let not_open = notifier
        .events_for("E1")
        .iter()
        .filter(|e| matches!(e, Event::FormNotOpen { .. }))
        .count();
    assert_eq!(not_open, 30);
}

#[tokio::test]
async fn exhausts_after_exactly_the_failure_limit() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.on_detail("E1", fixtures::open_form(&[("姓名", "name", None)]));
    transport.on_submit("E1", fixtures::rejected("活动太火爆"));
    let notifier = RecordingNotifier::new();
    let settings = SubmitterSettings {
        failure_limit: 3,
        ..fast_settings()
    };

    let report = submitter("E1", &transport, &notifier, &CancellationSignal::new(), settings)
        .run()
        .await;

    assert_eq!(report.outcome, SubmissionOutcome::ExhaustedRetries);
    assert_eq!(report.failed_attempts, 3);
    assert_eq!(transport.submit_count("E1"), 3);
    assert_eq!(notifier.rejections("E1"), 3);
}

#[tokio::test]
async fn cancel_wakes_a_sleeping_submitter() {
    let transport = Arc::new(ScriptedTransport::new());
    let notifier = RecordingNotifier::new();
    let cancel = CancellationSignal::new();
    let settings = SubmitterSettings {
        poll_interval: Duration::from_secs(30),
        ..fast_settings()
    };

    let handle = tokio::spawn(submitter("E1", &transport, &notifier, &cancel, settings).run());
    tokio::time::sleep(Duration::from_millis(20)).await;
    cancel.cancel();

    let report = tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("submitter should stop well before the next poll")
        .expect("submitter should not panic");

    assert_eq!(report.outcome, SubmissionOutcome::Cancelled);
    assert_eq!(report.polls, 1);
    assert_eq!(transport.submit_count("E1"), 0);
}

#[tokio::test]
async fn non_json_detail_is_treated_as_not_open() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.on_detail_not_json("E1", "<html>502 Bad Gateway</html>");
    transport.fail_detail("E1", "connection reset");
    transport.on_detail("E1", fixtures::open_form(&[("姓名", "name", None)]));
    transport.on_submit("E1", fixtures::accepted());
    let notifier = RecordingNotifier::new();

    let report = submitter(
        "E1",
        &transport,
        &notifier,
        &CancellationSignal::new(),
        fast_settings(),
    )
    .run()
    .await;

    assert_eq!(report.outcome, SubmissionOutcome::Success);
    assert_eq!(report.failed_attempts, 0);
    let unavailable = notifier
        .events_for("E1")
        .iter()
        .filter(|e| matches!(e, Event::DetailUnavailable { .. }))
        .count();
    assert_eq!(unavailable, 2);
}

#[tokio::test]
async fn malformed_profile_fails_without_polling() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.on_profile(serde_json::json!({ "data": "nope" }));
    let notifier = RecordingNotifier::new();

    let report = submitter(
        "E1",
        &transport,
        &notifier,
        &CancellationSignal::new(),
        fast_settings(),
    )
    .run()
    .await;

    match report.outcome {
        SubmissionOutcome::Failed(reason) => assert!(reason.contains("profile")),
        other => panic!("expected a failed outcome, got {other}"),
    }
    assert_eq!(transport.detail_count("E1"), 0);
}

#[tokio::test]
async fn fills_from_profile_and_pads_the_rest() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.on_profile(fixtures::profile(&[("姓名", "123")]));
    transport.on_detail(
        "E1",
        fixtures::open_form(&[
            ("姓名", "name", None),
            ("手机", "phone", None),
            ("学号", "sid", Some(5)),
        ]),
    );
    transport.on_submit("E1", fixtures::accepted());

    let report = submitter(
        "E1",
        &transport,
        &RecordingNotifier::new(),
        &CancellationSignal::new(),
        fast_settings(),
    )
    .run()
    .await;

    assert!(report.outcome.is_success());
    assert_eq!(
        submitted_values(&transport),
        vec![
            ("姓名".to_string(), "123".to_string()),
            ("手机".to_string(), "11111111111".to_string()),
            ("学号".to_string(), "11111".to_string()),
        ]
    );

    let body = transport
        .calls()
        .into_iter()
        .find_map(|c| c.body)
        .unwrap_or(Value::Null);
    assert_eq!(body["eid"], "E1");
    assert_eq!(body["access_token"], "tok");
    assert_eq!(body["on_behalf"], 0);
}
