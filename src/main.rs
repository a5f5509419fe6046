use clap::Parser;
use kyomu::commands::Cli;
use kyomu::startup;
use std::process::ExitCode;
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    startup::init_logging()?;

    info!("Starting kyomu");

    // Load configuration
    let config = startup::load_config(&cli).await?;

    // Unlock the dashboard and run the command
    startup::start(cli, config).await
}
