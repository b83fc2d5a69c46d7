//! Option validation: turn a merged [`OptionSet`] into typed options.
//!
//! Rules run in a fixed order and the first violation is returned; errors
//! are not aggregated. The order is API URL, API key, format, model, OCR
//! languages, OCR preset, then the crawler fields.

use crate::config::{CrawlStrategy, Model, OcrPreset, OptionSet, OutputFormat, TraversalScope};
use crate::error::AnyparserError;
use crate::languages::OcrLanguage;
use crate::options::ValidatedOptions;
use reqwest::Url;
use std::str::FromStr;
use tracing::debug;

/// Validate every field of `options`, returning the typed equivalent.
pub fn validate_option(options: &OptionSet) -> Result<ValidatedOptions, AnyparserError> {
    let api_url = validate_api_url(options.api_url.as_deref())?;
    let api_key = validate_api_key(options.api_key.as_deref())?;

    let format: OutputFormat = options.format.parse()?;
    let model: Model = options.model.parse()?;

    let ocr_language = options
        .ocr_language
        .as_ref()
        .map(|codes| {
            codes
                .iter()
                .map(|code| code.parse::<OcrLanguage>())
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?;
    let ocr_preset: Option<OcrPreset> = parse_opt(options.ocr_preset.as_deref())?;
    let strategy: Option<CrawlStrategy> = parse_opt(options.strategy.as_deref())?;
    let traversal_scope: Option<TraversalScope> = parse_opt(options.traversal_scope.as_deref())?;

    debug!(
        "Options valid: format={}, model={}, ocr_languages={}",
        options.format,
        options.model,
        ocr_language.as_ref().map_or(0, Vec::len)
    );

    Ok(ValidatedOptions {
        api_url,
        api_key: api_key.to_string(),
        format,
        model,
        image: options.image,
        table: options.table,
        ocr_language,
        ocr_preset,
        max_depth: options.max_depth,
        max_executions: options.max_executions,
        strategy,
        traversal_scope,
    })
}

/// The API URL must be present and an absolute http(s) URL.
pub fn validate_api_url(api_url: Option<&str>) -> Result<Url, AnyparserError> {
    let raw = match api_url.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return Err(AnyparserError::ApiUrlRequired),
    };

    let invalid = || AnyparserError::InvalidApiUrl {
        url: raw.to_string(),
    };
    let url = Url::parse(raw).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(invalid());
    }
    Ok(url)
}

/// The API key must be present and usable as a bearer token.
pub fn validate_api_key(api_key: Option<&str>) -> Result<&str, AnyparserError> {
    let key = match api_key {
        Some(k) if !k.is_empty() => k,
        _ => return Err(AnyparserError::ApiKeyRequired),
    };
    if key.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(AnyparserError::InvalidApiKeyFormat);
    }
    Ok(key)
}

fn parse_opt<T>(raw: Option<&str>) -> Result<Option<T>, AnyparserError>
where
    T: FromStr<Err = AnyparserError>,
{
    raw.map(str::parse).transpose()
}
