//! CLI interface module
//!
//! Each invocation builds its own [`StartupContext`], runs one command and
//! shuts the store down again.

pub mod commands;

use std::fmt;

use crate::cli::{Commands, ConfigCommands};
use crate::config::StaticConfig;
use crate::errors::LinkVaultError;
use crate::runtime::{graceful_shutdown, prepare_startup};

#[derive(Debug)]
pub enum CliError {
    /// Error returned by the allocation core or the store
    Service(LinkVaultError),
    /// Store or service could not be constructed
    Startup(String),
    CommandError(String),
}

impl CliError {
    pub fn format_simple(&self) -> String {
        match self {
            CliError::Service(err) => err.format_simple(),
            CliError::Startup(msg) => format!("Startup error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::Service(err) => err.format_colored(),
            CliError::Startup(msg) => {
                format!("{} {}", "Startup error:".red().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<LinkVaultError> for CliError {
    fn from(err: LinkVaultError) -> Self {
        CliError::Service(err)
    }
}

/// Run a clap-parsed command against the configured store
pub async fn run_cli_command(cmd: Commands, config: &StaticConfig) -> Result<(), CliError> {
    // Generating a config file must work even when the store is unreachable
    if let Commands::Config { action } = cmd {
        let ConfigCommands::Generate { output_path, force } = action;
        return commands::config_generate(output_path, force);
    }

    let ctx = prepare_startup(config)
        .await
        .map_err(|e| CliError::Startup(format!("{:#}", e)))?;
    let service = ctx.shorten_service.clone();

    let result = match cmd {
        Commands::Shorten { url, alias, owner } => {
            commands::shorten(&service, url, alias, owner).await
        }
        Commands::Resolve { code } => commands::resolve(&service, &code).await,
        Commands::Show { code } => commands::show(&service, &code).await,
        Commands::Delete { code } => commands::delete(&service, &code).await,
        Commands::Config { .. } => unreachable!("handled above"),
    };

    drop(service);
    graceful_shutdown(ctx).await;
    result
}
