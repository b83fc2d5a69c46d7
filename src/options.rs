//! Request-side value types produced by validation.
//!
//! [`ParsedOption`] is the single artefact the request pipeline hands to the
//! form encoder. Its [`ParseSource`] makes the files-XOR-URL invariant a
//! type-level fact: a crawler request can only ever carry a URL and a
//! document request can only ever carry files.

use crate::config::{CrawlStrategy, Model, OcrPreset, OutputFormat, TraversalScope};
use crate::languages::OcrLanguage;
use reqwest::Url;
use std::fmt;
use std::path::{Path, PathBuf};

/// A file loaded into memory, ready to be encoded into the request body.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub filename: String,
    pub contents: Vec<u8>,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            contents: contents.into(),
        }
    }
}

impl fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedFile")
            .field("filename", &self.filename)
            .field("contents", &format_args!("<{} bytes>", self.contents.len()))
            .finish()
    }
}

/// What the caller asked to parse: one path/URL, or a list of paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseInput {
    Single(PathBuf),
    Multiple(Vec<PathBuf>),
}

impl ParseInput {
    /// Flatten into a list; a single entry becomes a one-element list.
    pub fn into_paths(self) -> Vec<PathBuf> {
        match self {
            ParseInput::Single(p) => vec![p],
            ParseInput::Multiple(ps) => ps,
        }
    }
}

impl From<&str> for ParseInput {
    fn from(s: &str) -> Self {
        ParseInput::Single(PathBuf::from(s))
    }
}

impl From<String> for ParseInput {
    fn from(s: String) -> Self {
        ParseInput::Single(PathBuf::from(s))
    }
}

impl From<&String> for ParseInput {
    fn from(s: &String) -> Self {
        ParseInput::Single(PathBuf::from(s))
    }
}

impl From<&Path> for ParseInput {
    fn from(p: &Path) -> Self {
        ParseInput::Single(p.to_path_buf())
    }
}

impl From<PathBuf> for ParseInput {
    fn from(p: PathBuf) -> Self {
        ParseInput::Single(p)
    }
}

impl From<&PathBuf> for ParseInput {
    fn from(p: &PathBuf) -> Self {
        ParseInput::Single(p.clone())
    }
}

impl<T: AsRef<Path>> From<Vec<T>> for ParseInput {
    fn from(items: Vec<T>) -> Self {
        ParseInput::Multiple(items.iter().map(|p| p.as_ref().to_path_buf()).collect())
    }
}

impl<T: AsRef<Path>> From<&[T]> for ParseInput {
    fn from(items: &[T]) -> Self {
        ParseInput::Multiple(items.iter().map(|p| p.as_ref().to_path_buf()).collect())
    }
}

impl<T: AsRef<Path>, const N: usize> From<[T; N]> for ParseInput {
    fn from(items: [T; N]) -> Self {
        ParseInput::Multiple(items.iter().map(|p| p.as_ref().to_path_buf()).collect())
    }
}

/// The payload of a request: uploaded files or a crawl start URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseSource {
    Files(Vec<UploadedFile>),
    Url(String),
}

/// Options that passed validation, with every enumerated field typed.
#[derive(Clone, PartialEq)]
pub struct ValidatedOptions {
    pub api_url: Url,
    pub api_key: String,
    pub format: OutputFormat,
    pub model: Model,
    pub image: bool,
    pub table: bool,
    pub ocr_language: Option<Vec<OcrLanguage>>,
    pub ocr_preset: Option<OcrPreset>,
    pub max_depth: Option<u32>,
    pub max_executions: Option<u32>,
    pub strategy: Option<CrawlStrategy>,
    pub traversal_scope: Option<TraversalScope>,
}

impl fmt::Debug for ValidatedOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedOptions")
            .field("api_url", &self.api_url.as_str())
            .field("api_key", &"<redacted>")
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

/// A fully validated request: what to send and how.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedOption {
    pub source: ParseSource,
    pub options: ValidatedOptions,
}

impl ParsedOption {
    /// Uploaded files, or `None` for a crawler request.
    pub fn files(&self) -> Option<&[UploadedFile]> {
        match &self.source {
            ParseSource::Files(files) => Some(files),
            ParseSource::Url(_) => None,
        }
    }

    /// Crawl start URL, or `None` for a document request.
    pub fn url(&self) -> Option<&str> {
        match &self.source {
            ParseSource::Url(url) => Some(url),
            ParseSource::Files(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_inputs_become_one_element_lists() {
        assert_eq!(ParseInput::from("a.txt").into_paths(), vec![PathBuf::from("a.txt")]);
        assert_eq!(
            ParseInput::from(Path::new("b.pdf")).into_paths(),
            vec![PathBuf::from("b.pdf")]
        );
    }

    #[test]
    fn list_inputs_keep_order() {
        let input = ParseInput::from(vec!["one.pdf", "two.docx"]);
        assert_eq!(
            input.into_paths(),
            vec![PathBuf::from("one.pdf"), PathBuf::from("two.docx")]
        );
        assert_eq!(ParseInput::from(Vec::<String>::new()).into_paths(), Vec::<PathBuf>::new());
    }

    #[test]
    fn uploaded_file_debug_hides_contents() {
        let file = UploadedFile::new("test.txt", b"test content".to_vec());
        assert_eq!(file.filename, "test.txt");
        assert_eq!(file.contents, b"test content");
        let dbg = format!("{file:?}");
        assert!(dbg.contains("<12 bytes>"), "got: {dbg}");
        assert!(!dbg.contains("test content"));
    }
}
