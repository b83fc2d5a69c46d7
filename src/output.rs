//! Typed results returned by the service.
//!
//! A JSON response is an array in which every element is either a document
//! result ([`PdfResult`]) or a crawl result ([`CrawlResult`]). The two are
//! told apart once, at decode time, by the presence of `start_url`; callers
//! then match on [`ParsedResult`] instead of probing fields.
//!
//! Every field is defaulted when absent or `null`, so partial payloads from
//! older service versions still decode.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// What a parse returns: raw text for non-JSON formats, typed results otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParseOutput {
    Text(String),
    Results(Vec<ParsedResult>),
}

impl ParseOutput {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParseOutput::Text(text) => Some(text),
            ParseOutput::Results(_) => None,
        }
    }

    pub fn results(&self) -> Option<&[ParsedResult]> {
        match self {
            ParseOutput::Results(results) => Some(results),
            ParseOutput::Text(_) => None,
        }
    }

    /// Text for writing to a file: the raw body, or the concatenated
    /// markdown of every result separated by blank lines.
    pub fn to_markdown(&self) -> String {
        match self {
            ParseOutput::Text(text) => text.clone(),
            ParseOutput::Results(results) => results
                .iter()
                .map(ParsedResult::markdown)
                .collect::<Vec<_>>()
                .join("\n\n"),
        }
    }
}

/// One element of a JSON response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParsedResult {
    Document(PdfResult),
    Crawl(CrawlResult),
}

impl ParsedResult {
    pub fn rid(&self) -> &str {
        match self {
            ParsedResult::Document(doc) => &doc.rid,
            ParsedResult::Crawl(crawl) => &crawl.rid,
        }
    }

    pub fn markdown(&self) -> &str {
        match self {
            ParsedResult::Document(doc) => &doc.markdown,
            ParsedResult::Crawl(crawl) => &crawl.markdown,
        }
    }

    pub fn total_characters(&self) -> u64 {
        match self {
            ParsedResult::Document(doc) => doc.total_characters,
            ParsedResult::Crawl(crawl) => crawl.total_characters,
        }
    }

    pub fn as_document(&self) -> Option<&PdfResult> {
        match self {
            ParsedResult::Document(doc) => Some(doc),
            ParsedResult::Crawl(_) => None,
        }
    }

    pub fn as_crawl(&self) -> Option<&CrawlResult> {
        match self {
            ParsedResult::Crawl(crawl) => Some(crawl),
            ParsedResult::Document(_) => None,
        }
    }
}

impl<'de> Deserialize<'de> for ParsedResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        let is_crawl = match &value {
            serde_json::Value::Object(map) => map.contains_key("start_url"),
            other => {
                return Err(de::Error::custom(format!(
                    "expected a result object, found {}",
                    json_kind(other)
                )))
            }
        };

        if is_crawl {
            CrawlResult::deserialize(value)
                .map(ParsedResult::Crawl)
                .map_err(de::Error::custom)
        } else {
            PdfResult::deserialize(value)
                .map(ParsedResult::Document)
                .map_err(de::Error::custom)
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

// ── Document results ─────────────────────────────────────────────────────

/// Result for one uploaded file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfResult {
    #[serde(deserialize_with = "null_as_default")]
    pub rid: String,
    #[serde(deserialize_with = "null_as_default")]
    pub original_filename: String,
    #[serde(deserialize_with = "null_as_default")]
    pub checksum: String,
    #[serde(deserialize_with = "null_as_default")]
    pub markdown: String,
    #[serde(deserialize_with = "lenient_uint")]
    pub total_characters: u64,
    #[serde(deserialize_with = "lenient_uint")]
    pub total_items: u64,
    /// Per-page breakdown; empty for formats the service does not paginate.
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<PdfPage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfPage {
    #[serde(deserialize_with = "lenient_uint")]
    pub page_number: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub markdown: String,
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(deserialize_with = "null_as_default")]
    pub images: Vec<String>,
}

// ── Crawl results ────────────────────────────────────────────────────────

/// Result of crawling from a single start URL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlResult {
    #[serde(deserialize_with = "null_as_default")]
    pub rid: String,
    #[serde(deserialize_with = "null_as_default")]
    pub start_url: String,
    #[serde(deserialize_with = "lenient_uint")]
    pub total_characters: u64,
    #[serde(deserialize_with = "lenient_uint")]
    pub total_items: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub markdown: String,
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<CrawlItem>,
    pub robots_directive: Option<RobotsDirective>,
}

/// One fetched page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlItem {
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "lenient_uint")]
    pub status_code: u16,
    pub status_message: Option<String>,
    pub title: Option<String>,
    /// Milliseconds waited before fetching this page.
    #[serde(deserialize_with = "lenient_uint")]
    pub politeness_delay: u64,
    #[serde(deserialize_with = "lenient_uint")]
    pub total_characters: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub markdown: String,
    pub directive: Option<CrawlDirective>,
    /// Timestamp as sent by the service (RFC 3339).
    pub crawled_at: Option<String>,
}

/// An indexing directive attached to a page.
///
/// `Combined` directives merge the meta-tag and header directives found on
/// the page; the merged inputs are kept in `underlying`, which may itself
/// contain further combined directives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlDirective {
    /// `None` when the service sent no type or `null`.
    #[serde(rename = "type")]
    pub kind: Option<DirectiveKind>,
    #[serde(deserialize_with = "lenient_int")]
    pub priority: i64,
    pub name: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub noindex: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub nofollow: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub underlying: Vec<CrawlDirective>,
}

impl CrawlDirective {
    pub fn is_combined(&self) -> bool {
        self.kind == Some(DirectiveKind::Combined)
    }
}

/// Where a directive came from. Unknown types are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DirectiveKind {
    Meta,
    Header,
    Combined,
    Other(String),
}

impl DirectiveKind {
    pub fn as_str(&self) -> &str {
        match self {
            DirectiveKind::Meta => "Meta",
            DirectiveKind::Header => "Header",
            DirectiveKind::Combined => "Combined",
            DirectiveKind::Other(s) => s,
        }
    }
}

impl From<String> for DirectiveKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Meta" => DirectiveKind::Meta,
            "Header" => DirectiveKind::Header,
            "Combined" => DirectiveKind::Combined,
            _ => DirectiveKind::Other(s),
        }
    }
}

impl From<DirectiveKind> for String {
    fn from(kind: DirectiveKind) -> Self {
        match kind {
            DirectiveKind::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The robots.txt rules that applied to the crawl.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotsDirective {
    #[serde(deserialize_with = "null_as_default")]
    pub user_agent: String,
    #[serde(deserialize_with = "null_as_default")]
    pub allow: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub disallow: Vec<String>,
    /// Seconds; robots.txt allows fractional values.
    pub crawl_delay: Option<f64>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Counts and timings. Whole floats such as `100.0` are accepted and
/// fractional values are truncated; `null` gives zero.
fn lenient_uint<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + TryFrom<u64>,
{
    let Some(number) = Option::<serde_json::Number>::deserialize(deserializer)? else {
        return Ok(T::default());
    };
    let value = number
        .as_u64()
        .or_else(|| {
            number
                .as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f as u64)
        })
        .ok_or_else(|| de::Error::custom(format!("expected a non-negative number, found {number}")))?;
    T::try_from(value).map_err(|_| de::Error::custom(format!("number {number} is out of range")))
}

fn lenient_int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(number) = Option::<serde_json::Number>::deserialize(deserializer)? else {
        return Ok(0);
    };
    number
        .as_i64()
        .or_else(|| number.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
        .ok_or_else(|| de::Error::custom(format!("number {number} is out of range")))
}
