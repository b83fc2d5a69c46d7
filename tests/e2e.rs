//! End-to-end tests against the live Anyparser service.
//!
//! They upload small generated files and make real API calls, so they are
//! gated behind `E2E_ENABLED` and need `ANYPARSER_API_KEY` (and optionally
//! `ANYPARSER_API_URL`) in the environment.
//!
//! Run with:
//!   E2E_ENABLED=1 ANYPARSER_API_KEY=... cargo test --test e2e -- --nocapture

use anyparser_core::{Anyparser, AnyparserOption, Model, OutputFormat, ParseOutput, ENV_API_KEY};
use std::path::PathBuf;
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

// ── Test helpers ─────────────────────────────────────────────────────────────

/// Skip this test unless E2E_ENABLED and an API key are set.
macro_rules! e2e_skip_unless_ready {
    () => {{
        if std::env::var("E2E_ENABLED").is_err() {
            println!("SKIP: set E2E_ENABLED=1 to run e2e tests");
            return;
        }
        if std::env::var(ENV_API_KEY).map_or(true, |k| k.trim().is_empty()) {
            println!("SKIP: {} is not set", ENV_API_KEY);
            return;
        }
    }};
}

/// Route library logs to the test output; visible with `--nocapture`.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("anyparser_core=debug")),
        )
        .with_test_writer()
        .try_init();
}

fn sample(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_single_text_file_json() {
    e2e_skip_unless_ready!();
    init_tracing();
    let dir = TempDir::new().unwrap();
    let path = sample(&dir, "hello.txt", "Hello, Anyparser!\n\nThis is a test document.");

    let parser = Anyparser::new(AnyparserOption::default()).unwrap();
    let output = parser.parse(&path).await.unwrap();

    let results = output.results().expect("json results");
    assert_eq!(results.len(), 1);
    let doc = results[0].as_document().expect("document result");
    println!("rid={} chars={}", doc.rid, doc.total_characters);
    assert_eq!(doc.original_filename, "hello.txt");
    assert!(!doc.markdown.trim().is_empty());
}

#[tokio::test]
async fn test_multiple_files_markdown() {
    e2e_skip_unless_ready!();
    init_tracing();
    let dir = TempDir::new().unwrap();
    let a = sample(&dir, "a.md", "# First\n\nalpha");
    let b = sample(&dir, "b.md", "# Second\n\nbeta");

    let options = AnyparserOption::builder().format(OutputFormat::Markdown).build();
    let parser = Anyparser::new(options).unwrap();
    let output = parser.parse(vec![a, b]).await.unwrap();

    match output {
        ParseOutput::Text(text) => {
            println!("{text}");
            assert!(!text.trim().is_empty());
        }
        other => panic!("expected text output, got {other:?}"),
    }
}

#[tokio::test]
async fn test_crawler_single_page() {
    e2e_skip_unless_ready!();
    init_tracing();
    let options = AnyparserOption::builder()
        .model(Model::Crawler)
        .max_depth(1)
        .max_executions(1)
        .strategy("LIFO")
        .traversal_scope("subtree")
        .build();
    let parser = Anyparser::new(options).unwrap();

    let output = parser.parse("https://anyparser.com").await.unwrap();
    let results = output.results().expect("json results");
    let crawl = results[0].as_crawl().expect("crawl result");
    println!(
        "start_url={} items={} robots={:?}",
        crawl.start_url,
        crawl.items.len(),
        crawl.robots_directive
    );
    assert!(!crawl.items.is_empty());
}
