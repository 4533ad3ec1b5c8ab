//! Command-line interface definitions.
//!
//! Defines the CLI structure for the enrollrush application using `clap`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default configuration file path.
pub const DEFAULT_CONFIG: &str = "config.toml";

/// Poll enrollment forms and submit the moment they open
#[derive(Parser, Debug)]
#[command(name = "enrollrush")]
#[command(version)]
pub struct Cli {
    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the enrollrush CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Race one or more enrollments until they succeed, give up, or are stopped
    Run(Box<RunArgs>),

    /// List open enrollments from the account history
    History(HistoryArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `enrollrush check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate the configuration file syntax and semantics.
    Config(ConfigPathArg),
}

/// Shared argument struct for commands that require only a configuration path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to the configuration file (defaults apply when it is missing)
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Enrollment id to submit to; repeat or comma-separate for several
    #[arg(long = "eid", value_delimiter = ',', required_unless_present = "all")]
    pub eids: Vec<String>,

    /// Submit to every open enrollment in the account history
    #[arg(long, conflicts_with = "eids")]
    pub all: bool,

    /// Access token (overrides ENROLLRUSH_ACCESS_TOKEN)
    #[arg(long)]
    pub token: Option<String>,

    /// Override the number of enrollments raced at once
    #[arg(long)]
    pub max_concurrency: Option<usize>,

    /// Override the delay between polls in milliseconds
    #[arg(long)]
    pub poll_interval_ms: Option<u64>,

    /// Override the rejected-submission budget per enrollment
    #[arg(long)]
    pub failure_limit: Option<u32>,

    /// Override log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty
    #[arg(long)]
    pub json_logs: bool,
}

/// Arguments for the `history` subcommand.
#[derive(Parser, Debug)]
pub struct HistoryArgs {
    /// Path to the configuration file (defaults apply when it is missing)
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Access token (overrides ENROLLRUSH_ACCESS_TOKEN)
    #[arg(long)]
    pub token: Option<String>,

    /// Include closed enrollments
    #[arg(long)]
    pub include_closed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn eids_accept_repeats_and_commas() {
        let cli = Cli::parse_from(["enrollrush", "run", "--eid", "A,B", "--eid", "C"]);
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.eids, ["A", "B", "C"]);
        assert!(!args.all);
    }

    #[test]
    fn run_requires_ids_or_all() {
        assert!(Cli::try_parse_from(["enrollrush", "run"]).is_err());
        assert!(Cli::try_parse_from(["enrollrush", "run", "--all"]).is_ok());
        assert!(Cli::try_parse_from(["enrollrush", "run", "--all", "--eid", "A"]).is_err());
    }
}
