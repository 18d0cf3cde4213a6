//! Default configuration from environment variables.
//!
//! - `ASSAY_TIMEOUT_MS`: default request timeout in milliseconds.
//! - `ASSAY_DEFAULT_HEADERS`: `name=value` pairs separated by `;`.
//!
//! Unset variables leave the built-in defaults in place.

use assay_domain::{DefaultConfig, DomainError, DomainResult};
use tracing::debug;

/// Variable holding the default timeout.
pub const TIMEOUT_VAR: &str = "ASSAY_TIMEOUT_MS";

/// Variable holding the default headers.
pub const HEADERS_VAR: &str = "ASSAY_DEFAULT_HEADERS";

/// Builds a [`DefaultConfig`] from the process environment.
///
/// # Errors
///
/// Returns [`DomainError::InvalidConfig`] if a variable is set but malformed.
pub fn config_from_env() -> DomainResult<DefaultConfig> {
    config_from_lookup(|name| std::env::var(name).ok())
}

/// Builds a [`DefaultConfig`] from an arbitrary variable lookup.
///
/// # Errors
///
/// Returns [`DomainError::InvalidConfig`] if a variable is set but malformed.
pub fn config_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> DomainResult<DefaultConfig> {
    let mut config = DefaultConfig::new();

    if let Some(raw) = lookup(TIMEOUT_VAR) {
        let timeout_ms = raw.trim().parse::<i64>().map_err(|e| {
            DomainError::invalid_config(format!("{TIMEOUT_VAR}='{raw}' is not an integer: {e}"))
        })?;
        config.set_default_timeout(timeout_ms)?;
    }

    if let Some(raw) = lookup(HEADERS_VAR) {
        config.set_default_headers(parse_headers(&raw)?);
    }

    debug!(
        timeout_ms = config.timeout_ms(),
        headers = config.headers().len(),
        "loaded default config"
    );
    Ok(config)
}

fn parse_headers(raw: &str) -> DomainResult<Vec<(String, String)>> {
    raw.split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.split_once('=') {
            Some((name, value)) if !name.trim().is_empty() => {
                Ok((name.trim().to_string(), value.trim().to_string()))
            }
            _ => Err(DomainError::invalid_config(format!(
                "{HEADERS_VAR} entry '{entry}' must be name=value"
            ))),
        })
        .collect()
}
