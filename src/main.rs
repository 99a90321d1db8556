use clap::Parser;
use tracing::debug;

use linkvault::cli::Cli;
use linkvault::config::StaticConfig;
use linkvault::interfaces::cli::run_cli_command;
use linkvault::system::init_logging;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = match StaticConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            std::process::exit(1);
        }
    };
    if let Some(backend) = cli.backend {
        config.storage.backend = backend;
    }

    let log_guard = match init_logging(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {:#}", e);
            std::process::exit(1);
        }
    };
    debug!("Running command: {:?}", cli.command);

    if let Err(e) = run_cli_command(cli.command, &config).await {
        eprintln!("{}", e.format_colored());
        // Flush pending log lines before exiting
        drop(log_guard);
        std::process::exit(1);
    }
}
