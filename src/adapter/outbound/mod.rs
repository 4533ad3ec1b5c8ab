//! Outbound adapters.
//!
//! - [`qunsou`] - HTTP client for the enrollment mini-program API

pub mod qunsou;
