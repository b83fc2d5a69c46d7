//! Response decoding: status and body in, [`ParseOutput`] out.

use crate::config::OutputFormat;
use crate::error::AnyparserError;
use crate::output::{ParseOutput, ParsedResult};
use tracing::{debug, info};

/// Longest slice of an error body carried into [`AnyparserError::HttpStatus`].
const SNIPPET_CHARS: usize = 500;

/// Decode a response received for a request made with `format`.
///
/// Any status other than 200 is an error carrying the status and the start
/// of the body. Non-JSON formats are returned as text; JSON bodies must be
/// an array of result objects.
pub fn decode_response(
    status: u16,
    body: &[u8],
    format: OutputFormat,
) -> Result<ParseOutput, AnyparserError> {
    if status != 200 {
        return Err(AnyparserError::HttpStatus {
            status,
            snippet: snippet(body),
        });
    }

    if format != OutputFormat::Json {
        let text = String::from_utf8_lossy(body).into_owned();
        debug!("Decoded {} response: {} chars", format, text.len());
        return Ok(ParseOutput::Text(text));
    }

    let results: Vec<ParsedResult> =
        serde_json::from_slice(body).map_err(|e| AnyparserError::InvalidResponse {
            detail: e.to_string(),
        })?;

    let crawls = results.iter().filter(|r| r.as_crawl().is_some()).count();
    info!(
        "Decoded {} result(s) ({} document, {} crawl)",
        results.len(),
        results.len() - crawls,
        crawls
    );
    Ok(ParseOutput::Results(results))
}

fn snippet(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let trimmed = text.trim();
    match trimmed.char_indices().nth(SNIPPET_CHARS) {
        Some((cut, _)) => format!("{}…", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::DirectiveKind;

    #[test]
    fn single_pdf_with_page() {
        let body = br##"[{
            "rid": "test123",
            "original_filename": "test.pdf",
            "checksum": "abc123",
            "markdown": "# Test",
            "total_characters": 100,
            "total_items": 1,
            "items": [{
                "page_number": 1,
                "markdown": "# Page 1",
                "text": "Page 1 content",
                "images": ["image1.png"]
            }]
        }]"##;

        let output = decode_response(200, body, OutputFormat::Json).unwrap();
        let results = output.results().unwrap();
        assert_eq!(results.len(), 1);

        let doc = results[0].as_document().unwrap();
        assert_eq!(doc.rid, "test123");
        assert_eq!(doc.original_filename, "test.pdf");
        assert_eq!(doc.total_items, 1);

        let page = &doc.items[0];
        assert_eq!(page.page_number, 1);
        assert_eq!(page.markdown, "# Page 1");
        assert_eq!(page.text, "Page 1 content");
        assert_eq!(page.images, ["image1.png"]);
    }

    #[test]
    fn multiple_documents_keep_order() {
        let body = br##"[
            {"rid": "test1", "original_filename": "test1.pdf", "checksum": "abc123", "markdown": "# Test 1", "total_characters": 100},
            {"rid": "test2", "original_filename": "test2.pdf", "checksum": "def456", "markdown": "# Test 2", "total_characters": 200}
        ]"##;

        let output = decode_response(200, body, OutputFormat::Json).unwrap();
        let rids: Vec<&str> = output.results().unwrap().iter().map(|r| r.rid()).collect();
        assert_eq!(rids, ["test1", "test2"]);
    }

    #[test]
    fn crawl_with_combined_directive() {
        let body = br##"[{
            "rid": "crawler1",
            "start_url": "https://example.com",
            "total_characters": 1000,
            "total_items": 2,
            "markdown": "# Crawl Results",
            "items": [{
                "url": "https://example.com",
                "status_code": 200,
                "status_message": "OK",
                "politeness_delay": 1000,
                "total_characters": 500,
                "markdown": "# Page 1",
                "directive": {
                    "type": "Combined",
                    "priority": 0,
                    "name": null,
                    "noindex": false,
                    "nofollow": false,
                    "underlying": [
                        {"type": "Meta", "priority": 1, "name": "robots", "noindex": false, "nofollow": false}
                    ]
                },
                "title": "Example Page",
                "crawled_at": "2024-03-20T12:00:00Z"
            }],
            "robots_directive": {
                "user_agent": "*",
                "allow": ["/"],
                "disallow": ["/private"],
                "crawl_delay": 1
            }
        }]"##;

        let output = decode_response(200, body, OutputFormat::Json).unwrap();
        let crawl = output.results().unwrap()[0].as_crawl().unwrap();
        assert_eq!(crawl.rid, "crawler1");
        assert_eq!(crawl.start_url, "https://example.com");
        assert_eq!(crawl.total_items, 2);
        assert_eq!(crawl.items.len(), 1);

        let item = &crawl.items[0];
        assert_eq!(item.status_code, 200);
        assert_eq!(item.title.as_deref(), Some("Example Page"));
        let directive = item.directive.as_ref().unwrap();
        assert_eq!(directive.kind, Some(DirectiveKind::Combined));
        assert_eq!(directive.underlying.len(), 1);
        assert_eq!(directive.underlying[0].kind, Some(DirectiveKind::Meta));
        assert!(directive.underlying[0].underlying.is_empty());

        let robots = crawl.robots_directive.as_ref().unwrap();
        assert_eq!(robots.user_agent, "*");
        assert_eq!(robots.allow, ["/"]);
        assert_eq!(robots.disallow, ["/private"]);
        assert_eq!(robots.crawl_delay, Some(1.0));
    }

    #[test]
    fn untyped_directive_keeps_the_rest_of_the_response() {
        let body = br#"[
            {"rid": "doc", "markdown": "kept"},
            {"rid": "c", "start_url": "https://example.com", "items": [
                {"url": "https://example.com", "politeness_delay": 1.5,
                 "directive": {"type": null, "priority": 0}}
            ]}
        ]"#;

        let output = decode_response(200, body, OutputFormat::Json).unwrap();
        let results = output.results().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].markdown(), "kept");
        let item = &results[1].as_crawl().unwrap().items[0];
        assert_eq!(item.directive.as_ref().unwrap().kind, None);
        assert_eq!(item.politeness_delay, 1);
    }

    #[test]
    fn non_json_formats_pass_text_through() {
        for format in [OutputFormat::Markdown, OutputFormat::Html, OutputFormat::Text] {
            let output = decode_response(200, b"Plain text response", format).unwrap();
            assert_eq!(output.as_text(), Some("Plain text response"));
        }
    }

    #[test]
    fn non_200_carries_status_and_snippet() {
        let err = decode_response(400, b"Bad Request", OutputFormat::Json).unwrap_err();
        assert!(matches!(err, AnyparserError::HttpStatus { status: 400, .. }));
        let msg = err.to_string();
        assert!(msg.contains("HTTP 400"), "{msg}");
        assert!(msg.contains("Bad Request"), "{msg}");

        // Status is checked before the format.
        let err = decode_response(503, b"", OutputFormat::Text).unwrap_err();
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn long_error_bodies_are_truncated_on_char_boundaries() {
        let body = "é".repeat(SNIPPET_CHARS * 2);
        match decode_response(500, body.as_bytes(), OutputFormat::Json) {
            Err(AnyparserError::HttpStatus { snippet, .. }) => {
                assert_eq!(snippet.chars().count(), SNIPPET_CHARS + 1);
                assert!(snippet.ends_with('…'));
            }
            other => panic!("expected HttpStatus, got {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_an_invalid_response() {
        for body in [&b"not json"[..], b"{\"rid\": \"x\"}", b"[1, 2]"] {
            assert!(matches!(
                decode_response(200, body, OutputFormat::Json),
                Err(AnyparserError::InvalidResponse { .. })
            ));
        }
    }

    #[test]
    fn empty_array_is_no_results() {
        let output = decode_response(200, b"[]", OutputFormat::Json).unwrap();
        assert_eq!(output.results().map(<[_]>::len), Some(0));
    }
}
