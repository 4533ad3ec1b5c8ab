//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the enrollment API, the raw transport beneath
//! it, and operator notifications.

pub mod enrollment;
pub mod notifier;
pub mod transport;
