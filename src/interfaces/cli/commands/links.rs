//! Link commands: shorten, resolve, show, delete

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::services::{ShortenRequest, ShortenService};
use crate::utils::validate_url;

pub async fn shorten(
    service: &ShortenService,
    url: String,
    alias: Option<String>,
    owner: Option<String>,
) -> Result<(), CliError> {
    let long_url = validate_url(&url)?.to_string();
    let generated = alias.as_deref().is_none_or(str::is_empty);

    let record = service
        .shorten(ShortenRequest {
            long_url,
            custom_alias: alias,
            owner_id: owner,
        })
        .await?;

    if generated {
        println!(
            "{} Generated random code: {}",
            "ℹ".bold().blue(),
            record.short_code.magenta()
        );
    }
    println!(
        "{} Added short link: {} -> {}",
        "✓".bold().green(),
        record.short_code.cyan(),
        record.long_url.blue().underline()
    );
    Ok(())
}

/// Prints only the URL so the output can be piped
pub async fn resolve(service: &ShortenService, code: &str) -> Result<(), CliError> {
    let long_url = service.resolve(code).await?;
    println!("{}", long_url);
    Ok(())
}

pub async fn show(service: &ShortenService, code: &str) -> Result<(), CliError> {
    let record = service.lookup(code).await?;

    println!("{} {}", "Code:   ".bold(), record.short_code.cyan());
    println!("{} {}", "Target: ".bold(), record.long_url.blue().underline());
    println!(
        "{} {}",
        "Created:".bold(),
        record.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    if let Some(owner) = &record.owner_id {
        println!("{} {}", "Owner:  ".bold(), owner);
    }
    Ok(())
}

pub async fn delete(service: &ShortenService, code: &str) -> Result<(), CliError> {
    service.delete(code).await?;
    println!("{} Deleted short link: {}", "✓".bold().green(), code.cyan());
    Ok(())
}
