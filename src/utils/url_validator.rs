//! Long URL checks for input surfaces
//!
//! The allocation core only rejects empty URLs; surfaces that accept URLs
//! from people run them through here first.

use url::Url;

use crate::errors::{LinkVaultError, Result};

const ALLOWED_SCHEMES: &[&str] = &["http", "https"];

/// Parse `raw` and require an http(s) scheme and a host.
///
/// Returns the trimmed input unchanged (not the normalized form), so the
/// stored URL is exactly what was submitted.
pub fn validate_url(raw: &str) -> Result<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LinkVaultError::invalid_url("URL cannot be empty"));
    }

    let parsed = Url::parse(trimmed)
        .map_err(|e| LinkVaultError::invalid_url(format!("'{}': {}", trimmed, e)))?;

    if !ALLOWED_SCHEMES.contains(&parsed.scheme()) {
        return Err(LinkVaultError::invalid_url(format!(
            "Scheme '{}:' is not allowed; use http:// or https://",
            parsed.scheme()
        )));
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(LinkVaultError::invalid_url(format!(
            "'{}' has no host",
            trimmed
        )));
    }

    Ok(trimmed)
}
