//! Command-line interface.

pub mod check;
pub mod command;
pub mod config;
pub mod console;
pub mod history;
pub mod output;
pub mod run;

pub use command::{CheckCommand, Cli, Commands};
