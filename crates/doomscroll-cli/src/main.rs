//! CLI entry point - the composition root.
//!
//! Parses arguments, initialises logging and dispatches to the handlers.
//! Handler errors are reported once here and mapped to the exit code.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use doomscroll_cli::{Cli, CliConfig, CliError, Commands, handlers};

/// Logs go to stderr so they never interleave with the feed on stdout.
fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise logging: {e}"))
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = CliConfig::from_cli(&cli)?;

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Prepare { dataset } => handlers::prepare::execute(&config, dataset).await,
        Commands::Launch(args) => handlers::launch::execute(&config, args).await,
        Commands::Paths => handlers::paths::execute(&config),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before clap reads HF_TOKEN and friends
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    if let Err(e) = run(cli).await {
        tracing::debug!(exit_code = e.exit_code(), "Command failed");
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
    Ok(())
}
