//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

use crate::config::StorageBackend;

/// linkvault - allocate and resolve short links
#[derive(Parser, Debug)]
#[command(name = "linkvault")]
#[command(version)]
#[command(about = "Allocate and resolve short links", long_about = None)]
pub struct Cli {
    /// Configuration file (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    /// Override storage.backend (database, memory, redis)
    #[arg(long, global = true)]
    pub backend: Option<StorageBackend>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Shorten a URL
    ///
    /// Without --alias a random code is generated.
    Shorten {
        /// Target URL (http:// or https://)
        url: String,

        /// Reserve this exact code instead of a random one
        #[arg(long, short = 'a')]
        alias: Option<String>,

        /// Owner reference stored with the link
        #[arg(long)]
        owner: Option<String>,
    },

    /// Print the target URL for a short code
    Resolve { code: String },

    /// Show the full record for a short code
    Show { code: String },

    /// Delete a short code
    Delete { code: String },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a configuration file populated with defaults
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shorten_with_alias() {
        let cli = Cli::try_parse_from([
            "linkvault",
            "shorten",
            "https://example.com",
            "--alias",
            "promo",
            "--owner",
            "42",
        ])
        .unwrap();

        match cli.command {
            Commands::Shorten { url, alias, owner } => {
                assert_eq!(url, "https://example.com");
                assert_eq!(alias.as_deref(), Some("promo"));
                assert_eq!(owner.as_deref(), Some("42"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "linkvault",
            "resolve",
            "abc123",
            "--backend",
            "memory",
            "-c",
            "custom.toml",
        ])
        .unwrap();

        assert_eq!(cli.backend, Some(StorageBackend::Memory));
        assert_eq!(cli.config.as_deref(), Some("custom.toml"));
    }

    #[test]
    fn test_unknown_backend_rejected() {
        assert!(Cli::try_parse_from(["linkvault", "--backend", "sled", "show", "x"]).is_err());
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["linkvault"]).is_err());
    }
}
