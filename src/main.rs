use clap::Parser;
use enrollrush::adapter::inbound::cli::output::{self, OutputConfig};
use enrollrush::adapter::inbound::cli::{check, history, run, CheckCommand, Cli, Commands};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    let result = match &cli.command {
        Commands::Run(args) => run::execute(args).await,
        Commands::History(args) => history::execute(args).await,
        Commands::Check(CheckCommand::Config(args)) => check::execute_config(&args.config),
    };

    if let Err(e) = result {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
