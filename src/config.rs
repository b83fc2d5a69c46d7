//! Option types and option resolution.
//!
//! A request is configured through [`AnyparserOption`], built via its
//! [`AnyparserOptionBuilder`]. Every field is optional: [`build_options`]
//! fills gaps from an [`Environment`] snapshot and then from hardcoded
//! defaults, producing an [`OptionSet`]. The option set is still unvalidated
//! (enumerated fields are plain strings); [`crate::pipeline::option`] turns
//! it into typed [`crate::options::ValidatedOptions`] or rejects it.
//!
//! The environment is an explicit value rather than a global lookup so the
//! same resolution can be replayed deterministically in tests.

use std::collections::HashMap;
use std::fmt;

/// Environment variable holding the service base URL.
pub const ENV_API_URL: &str = "ANYPARSER_API_URL";
/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "ANYPARSER_API_KEY";
/// Base URL used when neither an explicit option nor the environment sets one.
pub const DEFAULT_API_URL: &str = "https://anyparserapi.com";

/// Caller-supplied options for a parse request.
///
/// Enumerated fields are stored as wire codes so that values coming from
/// untyped sources (CLI flags, config files) are validated in one place.
/// The builder setters accept either the typed enums or raw strings.
///
/// # Example
/// ```rust
/// use anyparser_core::{AnyparserOption, Model, OcrLanguage, OcrPreset};
///
/// let option = AnyparserOption::builder()
///     .api_key("sk-test")
///     .model(Model::Ocr)
///     .ocr_language([OcrLanguage::Japanese])
///     .ocr_preset(OcrPreset::Scan)
///     .build();
/// assert_eq!(option.model.as_deref(), Some("ocr"));
/// ```
#[derive(Clone, Default, PartialEq)]
pub struct AnyparserOption {
    /// Service base URL. Falls back to `ANYPARSER_API_URL`, then [`DEFAULT_API_URL`].
    pub api_url: Option<String>,
    /// Bearer token. Falls back to `ANYPARSER_API_KEY`; there is no default.
    pub api_key: Option<String>,
    /// Response format: `json`, `markdown`, `html` or `text`. Default: `json`.
    pub format: Option<String>,
    /// Processing model: `text`, `ocr` or `crawler`. Default: `text`.
    pub model: Option<String>,
    /// Extract embedded images. Default: true.
    pub image: Option<bool>,
    /// Extract tables. Default: true.
    pub table: Option<bool>,
    /// OCR language codes, e.g. `["eng", "spa"]`.
    pub ocr_language: Option<Vec<String>>,
    /// OCR preset, e.g. `document`.
    pub ocr_preset: Option<String>,
    /// Crawler: maximum link depth from the start URL.
    pub max_depth: Option<u32>,
    /// Crawler: maximum number of pages fetched.
    pub max_executions: Option<u32>,
    /// Crawler: frontier order, `FIFO` or `LIFO`.
    pub strategy: Option<String>,
    /// Crawler: which links are followed, `subtree` or `domain`.
    pub traversal_scope: Option<String>,
}

impl fmt::Debug for AnyparserOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyparserOption")
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("format", &self.format)
            .field("model", &self.model)
            .field("image", &self.image)
            .field("table", &self.table)
            .field("ocr_language", &self.ocr_language)
            .field("ocr_preset", &self.ocr_preset)
            .field("max_depth", &self.max_depth)
            .field("max_executions", &self.max_executions)
            .field("strategy", &self.strategy)
            .field("traversal_scope", &self.traversal_scope)
            .finish()
    }
}

impl AnyparserOption {
    /// Create a new builder for `AnyparserOption`.
    pub fn builder() -> AnyparserOptionBuilder {
        AnyparserOptionBuilder {
            option: Self::default(),
        }
    }
}

/// Builder for [`AnyparserOption`].
#[derive(Debug)]
pub struct AnyparserOptionBuilder {
    option: AnyparserOption,
}

impl AnyparserOptionBuilder {
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.option.api_url = Some(url.into());
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.option.api_key = Some(key.into());
        self
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.option.format = Some(format.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.option.model = Some(model.into());
        self
    }

    pub fn image(mut self, v: bool) -> Self {
        self.option.image = Some(v);
        self
    }

    pub fn table(mut self, v: bool) -> Self {
        self.option.table = Some(v);
        self
    }

    pub fn ocr_language<I, L>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        self.option.ocr_language = Some(languages.into_iter().map(Into::into).collect());
        self
    }

    pub fn ocr_preset(mut self, preset: impl Into<String>) -> Self {
        self.option.ocr_preset = Some(preset.into());
        self
    }

    pub fn max_depth(mut self, n: u32) -> Self {
        self.option.max_depth = Some(n);
        self
    }

    pub fn max_executions(mut self, n: u32) -> Self {
        self.option.max_executions = Some(n);
        self
    }

    pub fn strategy(mut self, strategy: impl Into<String>) -> Self {
        self.option.strategy = Some(strategy.into());
        self
    }

    pub fn traversal_scope(mut self, scope: impl Into<String>) -> Self {
        self.option.traversal_scope = Some(scope.into());
        self
    }

    pub fn build(self) -> AnyparserOption {
        self.option
    }
}

// ── Environment ──────────────────────────────────────────────────────────

/// Snapshot of the environment variables the library reads.
///
/// Blank values are treated as unset so that `ANYPARSER_API_URL=""` falls
/// back to the default host instead of failing validation.
#[derive(Clone, Default, PartialEq)]
pub struct Environment {
    api_url: Option<String>,
    api_key: Option<String>,
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Environment {
    /// Capture the current process environment.
    pub fn from_process() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a snapshot from explicit `(name, value)` pairs.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: HashMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::from_lookup(|name| vars.get(name).cloned())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |v: String| if v.trim().is_empty() { None } else { Some(v) };
        Self {
            api_url: lookup(ENV_API_URL).and_then(non_blank),
            api_key: lookup(ENV_API_KEY).and_then(non_blank),
        }
    }

    pub fn api_url(&self) -> Option<&str> {
        self.api_url.as_deref()
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
}

// ── Merged option set ────────────────────────────────────────────────────

/// Options after merging explicit values, environment and defaults.
///
/// Not yet validated: `api_url`/`api_key` may be missing and enumerated
/// fields may hold unknown codes.
#[derive(Clone, PartialEq)]
pub struct OptionSet {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub format: String,
    pub model: String,
    pub image: bool,
    pub table: bool,
    pub ocr_language: Option<Vec<String>>,
    pub ocr_preset: Option<String>,
    pub max_depth: Option<u32>,
    pub max_executions: Option<u32>,
    pub strategy: Option<String>,
    pub traversal_scope: Option<String>,
}

impl fmt::Debug for OptionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionSet")
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("format", &self.format)
            .field("model", &self.model)
            .field("image", &self.image)
            .field("table", &self.table)
            .field("ocr_language", &self.ocr_language)
            .field("ocr_preset", &self.ocr_preset)
            .field("max_depth", &self.max_depth)
            .field("max_executions", &self.max_executions)
            .field("strategy", &self.strategy)
            .field("traversal_scope", &self.traversal_scope)
            .finish()
    }
}

impl OptionSet {
    /// True when the request targets the crawler instead of uploaded files.
    pub fn is_crawler(&self) -> bool {
        self.model == Model::Crawler.as_str()
    }
}

/// Merge explicit options with the environment and hardcoded defaults.
///
/// Precedence per field: explicit value > environment variable > default.
/// Crawler-only fields are dropped unless the resolved model is `crawler`.
pub fn build_options(explicit: Option<&AnyparserOption>, env: &Environment) -> OptionSet {
    let fallback = AnyparserOption::default();
    let explicit = explicit.unwrap_or(&fallback);

    let model = explicit
        .model
        .clone()
        .unwrap_or_else(|| Model::default().to_string());
    let crawler = model == Model::Crawler.as_str();
    let crawl_only = |v: Option<u32>| if crawler { v } else { None };
    let crawl_only_str = |v: &Option<String>| if crawler { v.clone() } else { None };
    // Blank explicit values defer to the environment, as blank variables do.
    let non_blank = |v: &Option<String>| v.clone().filter(|s| !s.trim().is_empty());

    OptionSet {
        api_url: non_blank(&explicit.api_url)
            .or_else(|| env.api_url().map(str::to_string))
            .or_else(|| Some(DEFAULT_API_URL.to_string())),
        api_key: non_blank(&explicit.api_key)
            .or_else(|| env.api_key().map(str::to_string)),
        format: explicit
            .format
            .clone()
            .unwrap_or_else(|| OutputFormat::default().to_string()),
        image: explicit.image.unwrap_or(true),
        table: explicit.table.unwrap_or(true),
        ocr_language: explicit.ocr_language.clone(),
        ocr_preset: explicit.ocr_preset.clone(),
        max_depth: crawl_only(explicit.max_depth),
        max_executions: crawl_only(explicit.max_executions),
        strategy: crawl_only_str(&explicit.strategy),
        traversal_scope: crawl_only_str(&explicit.traversal_scope),
        model,
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

closed_enum! {
    /// Shape of the service response.
    ///
    /// Only `json` is decoded into typed results; the other formats are
    /// returned to the caller as text.
    pub enum OutputFormat, error = InvalidFormat {
        Json => "json",
        Markdown => "markdown",
        Html => "html",
        Text => "text",
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Json
    }
}

closed_enum! {
    /// Processing model requested from the service.
    pub enum Model, error = InvalidModel {
        /// Text extraction from uploaded documents (default).
        Text => "text",
        /// Optical character recognition on uploaded scans and images.
        Ocr => "ocr",
        /// Crawl a website starting from a single URL.
        Crawler => "crawler",
    }
}

impl Default for Model {
    fn default() -> Self {
        Model::Text
    }
}

closed_enum! {
    /// Tuning preset for the OCR model.
    pub enum OcrPreset, error = InvalidOcrPreset {
        Document => "document",
        Handwriting => "handwriting",
        Scan => "scan",
        Receipt => "receipt",
        Magazine => "magazine",
        Invoice => "invoice",
        BusinessCard => "business-card",
        Passport => "passport",
        DriverLicense => "driver-license",
        IdentityCard => "identity-card",
        LicensePlate => "license-plate",
        MedicalReport => "medical-report",
        BankStatement => "bank-statement",
    }
}

closed_enum! {
    /// Order in which the crawler visits discovered links.
    pub enum CrawlStrategy, error = InvalidStrategy {
        /// Breadth-first.
        Fifo => "FIFO",
        /// Depth-first.
        Lifo => "LIFO",
    }
}

closed_enum! {
    /// Which discovered links the crawler is allowed to follow.
    pub enum TraversalScope, error = InvalidTraversalScope {
        /// Only URLs below the start URL's path.
        Subtree => "subtree",
        /// Any URL on the start URL's host.
        Domain => "domain",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::languages::OcrLanguage;

    fn env_with_key() -> Environment {
        Environment::from_vars([(ENV_API_KEY, "test-api-key-12345")])
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let opts = build_options(None, &env_with_key());
        assert_eq!(opts.api_url.as_deref(), Some(DEFAULT_API_URL));
        assert_eq!(opts.api_key.as_deref(), Some("test-api-key-12345"));
        assert_eq!(opts.format, "json");
        assert_eq!(opts.model, "text");
        assert!(opts.image);
        assert!(opts.table);
        assert_eq!(opts.ocr_language, None);
        assert_eq!(opts.ocr_preset, None);
    }

    #[test]
    fn environment_overrides_defaults() {
        let env = Environment::from_vars([
            (ENV_API_URL, "https://test-api.example.com"),
            (ENV_API_KEY, "test-key-123"),
        ]);
        let opts = build_options(None, &env);
        assert_eq!(opts.api_url.as_deref(), Some("https://test-api.example.com"));
        assert_eq!(opts.api_key.as_deref(), Some("test-key-123"));
    }

    #[test]
    fn explicit_overrides_environment() {
        let env = Environment::from_vars([
            (ENV_API_URL, "https://env.example.com"),
            (ENV_API_KEY, "env-key"),
        ]);
        let explicit = AnyparserOption::builder()
            .api_url("https://custom.example.com")
            .api_key("explicit-key")
            .build();
        let opts = build_options(Some(&explicit), &env);
        assert_eq!(opts.api_url.as_deref(), Some("https://custom.example.com"));
        assert_eq!(opts.api_key.as_deref(), Some("explicit-key"));
    }

    #[test]
    fn explicit_format_overrides_default_without_env() {
        let explicit = AnyparserOption::builder().format(OutputFormat::Markdown).build();
        let opts = build_options(Some(&explicit), &Environment::default());
        assert_eq!(opts.format, "markdown");
        assert_eq!(opts.api_key, None);
    }

    #[test]
    fn custom_options_are_carried_through() {
        let explicit = AnyparserOption::builder()
            .model(Model::Ocr)
            .image(false)
            .table(false)
            .ocr_language([OcrLanguage::English])
            .ocr_preset(OcrPreset::Document)
            .build();
        let opts = build_options(Some(&explicit), &env_with_key());
        assert_eq!(opts.model, "ocr");
        assert!(!opts.image);
        assert!(!opts.table);
        assert_eq!(opts.ocr_language, Some(vec!["eng".to_string()]));
        assert_eq!(opts.ocr_preset.as_deref(), Some("document"));
    }

    #[test]
    fn crawler_fields_dropped_outside_crawler_mode() {
        let explicit = AnyparserOption::builder()
            .max_depth(3)
            .strategy(CrawlStrategy::Lifo)
            .build();
        let opts = build_options(Some(&explicit), &env_with_key());
        assert_eq!(opts.max_depth, None);
        assert_eq!(opts.strategy, None);

        let explicit = AnyparserOption::builder()
            .model(Model::Crawler)
            .max_depth(3)
            .max_executions(10)
            .strategy(CrawlStrategy::Lifo)
            .traversal_scope(TraversalScope::Subtree)
            .build();
        let opts = build_options(Some(&explicit), &env_with_key());
        assert!(opts.is_crawler());
        assert_eq!(opts.max_depth, Some(3));
        assert_eq!(opts.max_executions, Some(10));
        assert_eq!(opts.strategy.as_deref(), Some("LIFO"));
        assert_eq!(opts.traversal_scope.as_deref(), Some("subtree"));
    }

    #[test]
    fn blank_environment_values_are_unset() {
        let env = Environment::from_vars([(ENV_API_URL, "  "), (ENV_API_KEY, "")]);
        assert_eq!(env.api_url(), None);
        assert_eq!(env.api_key(), None);
        let opts = build_options(None, &env);
        assert_eq!(opts.api_url.as_deref(), Some(DEFAULT_API_URL));
    }

    #[test]
    fn blank_explicit_values_defer_to_environment() {
        let env = Environment::from_vars([
            (ENV_API_URL, "https://env.example.com"),
            (ENV_API_KEY, "env-key"),
        ]);
        let option = AnyparserOption::builder().api_url("").api_key("   ").build();
        let opts = build_options(Some(&option), &env);
        assert_eq!(opts.api_url.as_deref(), Some("https://env.example.com"));
        assert_eq!(opts.api_key.as_deref(), Some("env-key"));

        let opts = build_options(Some(&option), &Environment::default());
        assert_eq!(opts.api_url.as_deref(), Some(DEFAULT_API_URL));
        assert_eq!(opts.api_key, None);
    }

    #[test]
    fn debug_redacts_api_key() {
        let option = AnyparserOption::builder().api_key("super-secret").build();
        let dbg = format!("{option:?}");
        assert!(!dbg.contains("super-secret"));
        let dbg = format!("{:?}", build_options(Some(&option), &Environment::default()));
        assert!(!dbg.contains("super-secret"));
    }

    #[test]
    fn enum_codes_round_trip_through_strings() {
        assert_eq!("LIFO".parse::<CrawlStrategy>().unwrap(), CrawlStrategy::Lifo);
        assert_eq!("business-card".parse::<OcrPreset>().unwrap(), OcrPreset::BusinessCard);
        assert_eq!(String::from(TraversalScope::Domain), "domain");
        assert!("lifo".parse::<CrawlStrategy>().is_err());
    }
}
