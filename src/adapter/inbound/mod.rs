//! Inbound adapters: the CLI and the operator stop triggers.

pub mod cli;
pub mod listener;
