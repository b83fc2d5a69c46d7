//! Request orchestration: raw input and options in, [`ParsedOption`] out.
//!
//! ## Steps
//!
//! 1. Merge explicit options with the environment and defaults.
//! 2. Pick the mode from the resolved model. The crawler takes exactly one
//!    URL; every other model takes one or more file paths.
//! 3. Validate the input for that mode, loading files in document mode.
//! 4. Validate the merged options.
//!
//! The first failure ends the request; nothing partial is returned.

use crate::config::{build_options, AnyparserOption, Environment};
use crate::error::AnyparserError;
use crate::options::{ParseInput, ParseSource, ParsedOption};
use crate::pipeline::load::{load_files, FileLoader, LockingFileLoader};
use crate::pipeline::option::validate_option;
use crate::pipeline::path::validate_path;
use crate::pipeline::url::validate_url;
use tracing::{debug, info};

/// Validate `input` against `options` and load any files it names.
pub async fn validate_and_parse(
    input: impl Into<ParseInput>,
    options: Option<&AnyparserOption>,
    env: &Environment,
) -> Result<ParsedOption, AnyparserError> {
    validate_and_parse_with(&LockingFileLoader, input, options, env).await
}

/// [`validate_and_parse`] with a caller-supplied [`FileLoader`].
pub async fn validate_and_parse_with<L: FileLoader>(
    loader: &L,
    input: impl Into<ParseInput>,
    options: Option<&AnyparserOption>,
    env: &Environment,
) -> Result<ParsedOption, AnyparserError> {
    // ── Step 1: Merge options ────────────────────────────────────────────
    let merged = build_options(options, env);
    debug!("Merged options: {:?}", merged);

    // ── Step 2–3: Validate input for the selected mode ───────────────────
    let input = input.into();
    let source = if merged.is_crawler() {
        info!("Crawler mode");
        let candidate = crawl_target(input)?;
        let url = validate_url(&candidate)
            .into_result()?
            .into_iter()
            .next()
            .unwrap_or(candidate);
        ParseSource::Url(url)
    } else {
        let paths = validate_path(input).into_result()?;
        info!("Document mode: {} file(s)", paths.len());
        ParseSource::Files(load_files(loader, &paths).await?)
    };

    // ── Step 4: Validate options ─────────────────────────────────────────
    let options = validate_option(&merged)?;

    Ok(ParsedOption { source, options })
}

/// The crawler accepts exactly one start URL.
fn crawl_target(input: ParseInput) -> Result<String, AnyparserError> {
    match input {
        ParseInput::Single(raw) => raw.into_os_string().into_string().map_err(|raw| {
            AnyparserError::InvalidUrl {
                url: raw.to_string_lossy().into_owned(),
                reason: "URL is not valid UTF-8".to_string(),
            }
        }),
        ParseInput::Multiple(list) => Err(AnyparserError::InvalidUrl {
            url: list
                .iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join(", "),
            reason: format!("Crawler mode takes exactly one URL, got {}", list.len()),
        }),
    }
}
