//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::qunsou::{EnrollmentClient, HttpTransport};
use crate::application::{CancellationSignal, Coordinator};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::notifier::{LogNotifier, Notifier, NotifierRegistry};
use crate::port::{EnrollmentApi, Transport};

/// Build the shared HTTP session and the enrollment client on top of it.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or the configured
/// base URL does not parse.
pub fn build_enrollment_api(config: &Config) -> Result<Arc<dyn EnrollmentApi>> {
    let transport: Arc<dyn Transport> = Arc::new(HttpTransport::from_config(&config.api)?);
    let client = EnrollmentClient::new(transport, &config.api.base_url)?;
    info!(
        base_url = %config.api.base_url,
        user_agents = config.api.user_agents.len(),
        "Enrollment client ready"
    );
    Ok(Arc::new(client))
}

/// Build the notifier registry.
///
/// With an operator console notifier, events go to the console only;
/// without one (JSON or quiet output), they go to tracing.
#[must_use]
pub fn build_notifier_registry(console: Option<Box<dyn Notifier>>) -> NotifierRegistry {
    let mut registry = NotifierRegistry::new();
    match console {
        Some(console) => registry.register(console),
        None => registry.register(Box::new(LogNotifier)),
    }
    registry
}

/// Wire a coordinator from configuration.
#[must_use]
pub fn build_coordinator(
    config: &Config,
    api: Arc<dyn EnrollmentApi>,
    notifier: Arc<dyn Notifier>,
    cancel: CancellationSignal,
) -> Coordinator {
    Coordinator::new(api, notifier, config.submitter_settings())
        .with_max_concurrency(config.submit.max_concurrency)
        .with_cancellation(cancel)
}
