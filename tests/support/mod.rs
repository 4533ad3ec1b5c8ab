//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use enrollrush::adapter::outbound::qunsou::EnrollmentClient;
use enrollrush::domain::EnrollmentId;
use enrollrush::port::EnrollmentApi;
use enrollrush::testkit::transport::ScriptedTransport;

pub const BASE_URL: &str = "https://api.example.test/xcx/enroll";

/// Enrollment client over a scripted transport.
pub fn api(transport: &Arc<ScriptedTransport>) -> Arc<dyn EnrollmentApi> {
    Arc::new(EnrollmentClient::new(transport.clone(), BASE_URL).expect("valid base url"))
}

pub fn ids(raw: &[&str]) -> Vec<EnrollmentId> {
    raw.iter().copied().map(EnrollmentId::from).collect()
}
