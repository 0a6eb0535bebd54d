//! Main entry point for the `salesdash` command.

use anyhow::Context as _;
use clap::Parser;
use salesdash_cli::{resolve_config, Cli, SalesDashApp};
use salesdash_common::logging::init_logging;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    // Keeps the file appender flushing until exit.
    let _log_guard = init_logging(&config.logging.to_logging_config()).context("Failed to initialize logging")?;
    info!("Starting salesdash {}", env!("CARGO_PKG_VERSION"));

    let app = SalesDashApp::new(config);
    let mut stdout = std::io::stdout().lock();
    if let Err(err) = app.run(&cli.command, &mut stdout).await {
        error!("Command failed: {err:#}");
        return Err(err);
    }
    Ok(())
}
