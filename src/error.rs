//! Error types for the anyparser-core library.
//!
//! Every failure is fatal for the `parse()` call that produced it: validation
//! and loading are all-or-nothing, and nothing is retried internally. The
//! variants are grouped by the stage that raises them, and
//! [`AnyparserError::kind`] folds them into the coarse taxonomy callers
//! usually branch on (not-found, locked, invalid URL, invalid option,
//! transport).

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the anyparser-core library.
#[derive(Debug, Error)]
pub enum AnyparserError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// No input paths were supplied, or the only one was blank.
    #[error("No files provided")]
    NoFilesProvided,

    /// A referenced path does not exist (or vanished before it was read).
    #[error("File does not exist: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// The path exists but another process holds an exclusive lock on it.
    #[error("File {} is locked by another process", path.display())]
    FileLocked { path: PathBuf },

    /// The file was locked successfully but reading it failed.
    #[error("Failed to read '{}': {source}", path.display())]
    FileReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── URL errors ────────────────────────────────────────────────────────
    /// Crawler-mode input is not an absolute http(s) URL with a host.
    #[error("The URL '{url}' is invalid: {reason}")]
    InvalidUrl { url: String, reason: String },

    // ── Option errors ─────────────────────────────────────────────────────
    #[error("API URL is required")]
    ApiUrlRequired,

    #[error("Invalid API URL: '{url}'")]
    InvalidApiUrl { url: String },

    #[error("API key is required but not provided.\nSet ANYPARSER_API_KEY or pass an explicit api_key.")]
    ApiKeyRequired,

    #[error("Invalid API key format")]
    InvalidApiKeyFormat,

    #[error("Invalid format: \"{value}\" (expected json, markdown, html or text)")]
    InvalidFormat { value: String },

    #[error("Invalid model: \"{value}\" (expected text, ocr or crawler)")]
    InvalidModel { value: String },

    #[error("Invalid OCR language: \"{value}\"")]
    InvalidOcrLanguage { value: String },

    #[error("Invalid OCR preset: \"{value}\"")]
    InvalidOcrPreset { value: String },

    #[error("Invalid crawl strategy: \"{value}\" (expected FIFO or LIFO)")]
    InvalidStrategy { value: String },

    #[error("Invalid traversal scope: \"{value}\" (expected subtree or domain)")]
    InvalidTraversalScope { value: String },

    // ── Transport errors ──────────────────────────────────────────────────
    /// The service answered with a non-success status.
    #[error("HTTP {status}: {snippet}")]
    HttpStatus { status: u16, snippet: String },

    /// The request never produced a response (DNS, TLS, connection reset).
    #[error("Request to '{url}' failed: {reason}")]
    RequestFailed { url: String, reason: String },

    /// The request exceeded the transport timeout.
    #[error("Request to '{url}' timed out after {secs}s\nIncrease --timeout.")]
    RequestTimeout { url: String, secs: u64 },

    // ── Response errors ───────────────────────────────────────────────────
    /// A JSON response did not match the result schema.
    #[error("Invalid response from service: {detail}")]
    InvalidResponse { detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output file.
    #[error("Failed to write output file '{}': {source}", path.display())]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse classification of an [`AnyparserError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Locked,
    InvalidUrl,
    InvalidOption,
    Transport,
    Io,
    Internal,
}

impl AnyparserError {
    /// The taxonomy bucket this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        use AnyparserError::*;
        match self {
            NoFilesProvided | FileNotFound { .. } => ErrorKind::NotFound,
            FileLocked { .. } => ErrorKind::Locked,
            InvalidUrl { .. } => ErrorKind::InvalidUrl,
            ApiUrlRequired
            | InvalidApiUrl { .. }
            | ApiKeyRequired
            | InvalidApiKeyFormat
            | InvalidFormat { .. }
            | InvalidModel { .. }
            | InvalidOcrLanguage { .. }
            | InvalidOcrPreset { .. }
            | InvalidStrategy { .. }
            | InvalidTraversalScope { .. } => ErrorKind::InvalidOption,
            HttpStatus { .. }
            | RequestFailed { .. }
            | RequestTimeout { .. }
            | InvalidResponse { .. } => ErrorKind::Transport,
            FileReadFailed { .. } | OutputWriteFailed { .. } => ErrorKind::Io,
            Internal(_) => ErrorKind::Internal,
        }
    }
}
