//! multipart/form-data encoding of a validated request.
//!
//! The part names are a compatibility contract with the service: option
//! fields are sent under camelCase names (`ocr_language` → `ocrLanguage`,
//! `max_depth` → `maxDepth`) and every file is sent as a `files` part.
//! Encoding is pure; given the same boundary the same bytes come out, which
//! is what makes the encoder testable without a server.

use crate::options::{ParseSource, ParsedOption, UploadedFile};
use std::path::Path;
use tracing::debug;
use uuid::Uuid;

const CRLF: &[u8] = b"\r\n";

/// Generate a boundary that will not collide with file contents in practice.
pub fn generate_boundary() -> String {
    format!("----AnyparserBoundary{}", Uuid::new_v4().simple())
}

/// `Content-Type` header value for a body built with `boundary`.
pub fn content_type(boundary: &str) -> String {
    format!("multipart/form-data; boundary={boundary}")
}

/// Serialise `parsed` into a multipart body delimited by `boundary`.
///
/// Text parts come first in a fixed order (`format`, `model`, `image`,
/// `table`, `ocrLanguage`, `ocrPreset`, `url`, `maxDepth`, `maxExecutions`,
/// `strategy`, `traversalScope`), each only when the field is present,
/// followed by one part per uploaded file.
pub fn build_form(parsed: &ParsedOption, boundary: &str) -> Vec<u8> {
    let opts = &parsed.options;
    let mut body = Vec::new();

    write_field(&mut body, boundary, "format", opts.format.as_str());
    write_field(&mut body, boundary, "model", opts.model.as_str());
    write_field(&mut body, boundary, "image", bool_str(opts.image));
    write_field(&mut body, boundary, "table", bool_str(opts.table));

    if let Some(languages) = &opts.ocr_language {
        let joined = languages
            .iter()
            .map(|l| l.as_str())
            .collect::<Vec<_>>()
            .join(",");
        write_field(&mut body, boundary, "ocrLanguage", &joined);
    }
    if let Some(preset) = opts.ocr_preset {
        write_field(&mut body, boundary, "ocrPreset", preset.as_str());
    }

    if let ParseSource::Url(url) = &parsed.source {
        write_field(&mut body, boundary, "url", url);
    }
    if let Some(depth) = opts.max_depth {
        write_field(&mut body, boundary, "maxDepth", &depth.to_string());
    }
    if let Some(executions) = opts.max_executions {
        write_field(&mut body, boundary, "maxExecutions", &executions.to_string());
    }
    if let Some(strategy) = opts.strategy {
        write_field(&mut body, boundary, "strategy", strategy.as_str());
    }
    if let Some(scope) = opts.traversal_scope {
        write_field(&mut body, boundary, "traversalScope", scope.as_str());
    }

    if let ParseSource::Files(files) = &parsed.source {
        for file in files {
            write_file(&mut body, boundary, file);
        }
    }

    body.extend_from_slice(format!("--{boundary}--").as_bytes());
    body.extend_from_slice(CRLF);

    debug!("Encoded multipart body: {} bytes", body.len());
    body
}

fn bool_str(v: bool) -> &'static str {
    if v {
        "true"
    } else {
        "false"
    }
}

fn write_field(body: &mut Vec<u8>, boundary: &str, name: &str, value: &str) {
    body.extend_from_slice(format!("--{boundary}").as_bytes());
    body.extend_from_slice(CRLF);
    body.extend_from_slice(format!("Content-Disposition: form-data; name=\"{name}\"").as_bytes());
    body.extend_from_slice(CRLF);
    body.extend_from_slice(CRLF);
    body.extend_from_slice(value.as_bytes());
    body.extend_from_slice(CRLF);
}

fn write_file(body: &mut Vec<u8>, boundary: &str, file: &UploadedFile) {
    body.extend_from_slice(format!("--{boundary}").as_bytes());
    body.extend_from_slice(CRLF);
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"files\"; filename=\"{}\"",
            escape_quoted(&file.filename)
        )
        .as_bytes(),
    );
    body.extend_from_slice(CRLF);
    body.extend_from_slice(format!("Content-Type: {}", mime_type(&file.filename)).as_bytes());
    body.extend_from_slice(CRLF);
    body.extend_from_slice(CRLF);
    body.extend_from_slice(&file.contents);
    body.extend_from_slice(CRLF);
}

/// Percent-escape the characters that would break a quoted header parameter.
fn escape_quoted(value: &str) -> String {
    value
        .replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// MIME type guessed from the filename extension.
///
/// Covers the document, image and text formats the service accepts;
/// anything else is sent as `application/octet-stream`.
pub fn mime_type(filename: &str) -> &'static str {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        Some("md" | "markdown") => "text/markdown",
        Some("html" | "htm") => "text/html",
        Some("csv") => "text/csv",
        Some("tsv") => "text/tab-separated-values",
        Some("xml") => "application/xml",
        Some("json") => "application/json",
        Some("rtf") => "application/rtf",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("xls") => "application/vnd.ms-excel",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        Some("ppt") => "application/vnd.ms-powerpoint",
        Some("pptx") => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        Some("odt") => "application/vnd.oasis.opendocument.text",
        Some("ods") => "application/vnd.oasis.opendocument.spreadsheet",
        Some("odp") => "application/vnd.oasis.opendocument.presentation",
        Some("epub") => "application/epub+zip",
        Some("eml") => "message/rfc822",
        Some("zip") => "application/zip",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("tif" | "tiff") => "image/tiff",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
