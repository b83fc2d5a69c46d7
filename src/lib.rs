//! # anyparser-core
//!
//! Client for the Anyparser service: upload documents (or point the crawler
//! at a URL) and get back Markdown, HTML, plain text, or typed JSON results.
//!
//! ## Why this crate?
//!
//! The service itself does the parsing, OCR and crawling. What a client has
//! to get right is everything before the request leaves the machine: option
//! precedence, closed-set validation with precise error messages, reading
//! files safely while other processes may be writing them, and a byte-exact
//! multipart body. On the way back it has to map several JSON shapes
//! (document results, per-page breakdowns, crawl results with nested
//! directive trees) onto types a caller can match on.
//!
//! ## Pipeline Overview
//!
//! ```text
//! input + options
//!  │
//!  ├─ 1. Resolve   explicit options > environment > defaults
//!  ├─ 2. Validate  crawler: one http(s) URL / documents: every path exists
//!  ├─ 3. Load      lock + read each file concurrently, all-or-nothing
//!  ├─ 4. Options   closed-set checks, first violation wins
//!  ├─ 5. Encode    multipart/form-data with a random boundary
//!  ├─ 6. Send      POST {api_url}/parse/v1 with a bearer token
//!  └─ 7. Decode    text, or typed document / crawl results
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use anyparser_core::{Anyparser, AnyparserOption, ParseOutput};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // API key from ANYPARSER_API_KEY, API URL from ANYPARSER_API_URL or the default.
//!     let parser = Anyparser::new(AnyparserOption::default())?;
//!     match parser.parse(["a.pdf", "b.docx"]).await? {
//!         ParseOutput::Results(results) => {
//!             for r in &results {
//!                 println!("{}: {} chars", r.rid(), r.total_characters());
//!             }
//!         }
//!         ParseOutput::Text(text) => println!("{text}"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `anyparser` binary (clap + anyhow + indicatif + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! anyparser-core = { version = "1", default-features = false }
//! ```

#[macro_use]
mod macros;

// ── Modules ──────────────────────────────────────────────────────────────

pub mod client;
pub mod config;
pub mod error;
pub mod languages;
pub mod options;
pub mod output;
pub mod pipeline;
pub mod transport;
pub mod validate;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use client::{Anyparser, PARSE_PATH};
pub use config::{
    build_options, AnyparserOption, AnyparserOptionBuilder, CrawlStrategy, Environment, Model,
    OcrPreset, OptionSet, OutputFormat, TraversalScope, DEFAULT_API_URL, ENV_API_KEY, ENV_API_URL,
};
pub use error::{AnyparserError, ErrorKind};
pub use languages::OcrLanguage;
pub use options::{ParseInput, ParseSource, ParsedOption, UploadedFile, ValidatedOptions};
pub use output::{
    CrawlDirective, CrawlItem, CrawlResult, DirectiveKind, ParseOutput, ParsedResult, PdfPage,
    PdfResult, RobotsDirective,
};
pub use pipeline::form::generate_boundary;
pub use pipeline::validation::ValidationResult;
pub use transport::{HttpTransport, Transport, TransportRequest, TransportResponse};
pub use validate::validate_and_parse;
