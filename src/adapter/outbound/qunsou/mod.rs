//! Adapter for the qunsou enrollment API.

pub mod client;
pub mod http;
pub mod settings;

pub use client::EnrollmentClient;
pub use http::{HttpTransport, UserAgentPool};
pub use settings::ApiConfig;
