use anyhow::Result;
use clap::{Parser, Subcommand};
use exrate::core::log::init_logging;
use std::process::ExitCode;

/// Convert an amount between currencies using the latest exchange rates
#[derive(Parser)]
#[command(version, about, args_conflicts_with_subcommands = true)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,

    /// <amount> <currency_from> [<currency_to> ...]
    #[arg(value_name = "ARGS", allow_negative_numbers = true)]
    args: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => exrate::cli::setup::setup().map(|_| ExitCode::SUCCESS),
        None => exrate::run_command(&cli.args, cli.config_path.as_deref())
            .await
            .map(|outcome| {
                if outcome.is_success() {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::FAILURE
                }
            }),
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
