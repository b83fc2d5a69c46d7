//! Crawler-mode input validation.
//!
//! `reqwest::Url` follows the WHATWG parser, which is lenient in ways the
//! service is not: it silently percent-encodes spaces (fine) but also skips
//! extra slashes after a special scheme, so `https:///path` parses with host
//! `path`. The authority is therefore checked on the raw string before the
//! parser sees it.

use super::validation::ValidationResult;
use crate::error::AnyparserError;
use reqwest::Url;
use tracing::debug;

const SUPPORTED_SCHEMES: [&str; 2] = ["http", "https"];

/// Check that `candidate` is an absolute http(s) URL with a non-empty host.
///
/// On success the candidate is returned verbatim as the only element.
pub fn validate_url(candidate: &str) -> ValidationResult<String> {
    match check_url(candidate) {
        Ok(()) => ValidationResult::Valid {
            files: vec![candidate.to_string()],
        },
        Err(reason) => {
            debug!("Rejected URL '{}': {}", candidate, reason);
            ValidationResult::Invalid {
                error: AnyparserError::InvalidUrl {
                    url: candidate.to_string(),
                    reason,
                },
            }
        }
    }
}

fn check_url(candidate: &str) -> Result<(), String> {
    if candidate.trim().is_empty() {
        return Err("URL is empty".to_string());
    }
    // The parser strips surrounding whitespace but the form sends the raw value.
    if candidate != candidate.trim() {
        return Err("URL has leading or trailing whitespace".to_string());
    }

    let parsed = Url::parse(candidate).map_err(|e| format!("Could not parse URL: {e}"))?;

    let scheme = parsed.scheme();
    if !SUPPORTED_SCHEMES.contains(&scheme) {
        return Err(format!(
            "Invalid scheme '{scheme}'. Only http and https are supported."
        ));
    }

    if raw_authority(candidate).is_empty() || parsed.host_str().map_or(true, str::is_empty) {
        return Err("URL has no host".to_string());
    }

    Ok(())
}

/// The text between `scheme://` and the next `/`, `?` or `#`.
fn raw_authority(candidate: &str) -> &str {
    let rest = match candidate.split_once("://") {
        Some((_, rest)) => rest,
        None => return "",
    };
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    &rest[..end]
}
