//! The client facade: validate, encode, send, decode.
//!
//! This is the top-level orchestrator that calls into each [`crate::pipeline`]
//! stage in order and hands the encoded body to a [`Transport`].

use crate::config::{AnyparserOption, Environment};
use crate::error::AnyparserError;
use crate::options::ParseInput;
use crate::output::ParseOutput;
use crate::pipeline::decode::decode_response;
use crate::pipeline::form::{build_form, content_type, generate_boundary};
use crate::transport::{HttpTransport, Transport, TransportRequest};
use crate::validate::validate_and_parse;
use std::path::Path;
use tracing::{debug, info};

/// Path of the parse endpoint, relative to the API URL.
pub const PARSE_PATH: &str = "/parse/v1";

/// Client for the Anyparser service.
///
/// Holds the caller's options, an [`Environment`] snapshot used to fill
/// gaps in them, and the transport requests go through. Every `parse` call
/// resolves and validates options afresh, so one client can serve many
/// inputs.
///
/// # Example
/// ```rust,no_run
/// use anyparser_core::{Anyparser, AnyparserOption, ParseOutput};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// // API key taken from ANYPARSER_API_KEY
/// let parser = Anyparser::new(AnyparserOption::default())?;
/// if let ParseOutput::Results(results) = parser.parse("docs/sample.docx").await? {
///     for result in &results {
///         println!("{}", result.markdown());
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Anyparser<T: Transport = HttpTransport> {
    options: AnyparserOption,
    env: Environment,
    transport: T,
}

impl Anyparser<HttpTransport> {
    /// Client over HTTP, reading fallbacks from the process environment.
    pub fn new(options: AnyparserOption) -> Result<Self, AnyparserError> {
        Ok(Self::with_transport(options, HttpTransport::new()?))
    }
}

impl<T: Transport> Anyparser<T> {
    /// Client over a caller-supplied transport.
    pub fn with_transport(options: AnyparserOption, transport: T) -> Self {
        Self {
            options,
            env: Environment::from_process(),
            transport,
        }
    }

    /// Replace the environment snapshot used to fill unset options.
    pub fn with_environment(mut self, env: Environment) -> Self {
        self.env = env;
        self
    }

    pub fn options(&self) -> &AnyparserOption {
        &self.options
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Parse one file, several files, or (with the crawler model) one URL.
    ///
    /// Returns text for the `markdown`, `html` and `text` formats and typed
    /// results for `json`.
    pub async fn parse(&self, input: impl Into<ParseInput>) -> Result<ParseOutput, AnyparserError> {
        // ── Step 1: Validate input and options, load files ───────────────
        let parsed = validate_and_parse(input, Some(&self.options), &self.env).await?;
        let format = parsed.options.format;

        // ── Step 2: Encode ───────────────────────────────────────────────
        let boundary = generate_boundary();
        let body = build_form(&parsed, &boundary);
        match parsed.files() {
            Some(files) => info!(
                "Uploading {} file(s) as {} with model {}",
                files.len(),
                format,
                parsed.options.model
            ),
            None => info!("Crawling {}", parsed.url().unwrap_or_default()),
        }

        // ── Step 3: Send ─────────────────────────────────────────────────
        let request = TransportRequest {
            method: "POST".to_string(),
            base_url: parsed.options.api_url.clone(),
            path: PARSE_PATH.to_string(),
            headers: vec![
                ("Content-Type".to_string(), content_type(&boundary)),
                (
                    "Authorization".to_string(),
                    format!("Bearer {}", parsed.options.api_key),
                ),
            ],
            body,
        };
        let response = self.transport.send(request).await?;
        debug!("Received HTTP {} ({} bytes)", response.status, response.body.len());

        // ── Step 4: Decode ───────────────────────────────────────────────
        decode_response(response.status, &response.body, format)
    }

    /// Parse and write the markdown (or raw text) to `output_path`.
    ///
    /// The file is written to a sibling temp file first and renamed into
    /// place, so readers never observe a partial write.
    pub async fn parse_to_file(
        &self,
        input: impl Into<ParseInput>,
        output_path: impl AsRef<Path>,
    ) -> Result<ParseOutput, AnyparserError> {
        let output = self.parse(input).await?;
        let path = output_path.as_ref();
        let write_failed = |source| AnyparserError::OutputWriteFailed {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(write_failed)?;
        }

        let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = path.with_file_name(tmp_name);

        tokio::fs::write(&tmp_path, output.to_markdown())
            .await
            .map_err(write_failed)?;
        tokio::fs::rename(&tmp_path, path)
            .await
            .map_err(write_failed)?;

        info!("Wrote {}", path.display());
        Ok(output)
    }

    /// Synchronous wrapper around [`Anyparser::parse`].
    ///
    /// Creates a temporary tokio runtime internally, so it must not be
    /// called from within an async context.
    pub fn parse_sync(&self, input: impl Into<ParseInput>) -> Result<ParseOutput, AnyparserError> {
        tokio::runtime::Runtime::new()
            .map_err(|e| AnyparserError::Internal(format!("Failed to create tokio runtime: {e}")))?
            .block_on(self.parse(input))
    }
}
