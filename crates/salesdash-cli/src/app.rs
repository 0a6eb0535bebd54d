//! Application lifecycle: configuration resolution and command dispatch.

use crate::{Cli, Command};
use anyhow::Context as _;
use salesdash_commands::{dashboard, generate, options, summary, AppContext, CommandResult};
use salesdash_config::{Config, ConfigLoader, ConfigValidator};
use std::io::Write;
use tracing::{debug, info};

/// Loads the configuration file and applies the command line overrides.
pub fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = ConfigLoader::load_from(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply_overrides(&mut config);
    ConfigValidator::validate(&config).context("Invalid configuration")?;
    Ok(config)
}

/// Main application structure.
#[derive(Debug, Clone)]
pub struct SalesDashApp {
    ctx: AppContext,
}

impl SalesDashApp {
    /// Creates the application for a resolved configuration.
    pub fn new(config: Config) -> Self {
        Self {
            ctx: AppContext::new(config),
        }
    }

    /// Shared command context.
    pub const fn context(&self) -> &AppContext {
        &self.ctx
    }

    /// Runs one command, writing its report to `out`.
    pub async fn run<W: Write>(&self, command: &Command, out: &mut W) -> CommandResult {
        let ctx = &self.ctx;
        debug!(?command, "Dispatching command");
        match command {
            Command::Generate(args) => generate::run(ctx, args, out),
            Command::Dashboard(args) => dashboard::run(ctx, args, out).await,
            Command::Summary(args) => summary::run(ctx, args, out),
            Command::Options(args) => options::run(ctx, args, out),
            Command::Config => {
                let yaml = serde_yaml::to_string(ctx.config.as_ref()).context("Failed to serialize configuration")?;
                write!(out, "{yaml}")?;
                Ok(())
            }
        }?;
        info!("Command finished");
        Ok(())
    }
}
