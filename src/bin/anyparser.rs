//! CLI binary for anyparser-core.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `AnyparserOption` and prints results.

use anyhow::{Context, Result};
use anyparser_core::{
    Anyparser, AnyparserOption, CrawlDirective, CrawlResult, DirectiveKind, HttpTransport,
    ParseInput, ParseOutput, ParsedResult, PdfResult,
};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Parse a document to JSON results (summary on stderr, markdown on stdout)
  anyparser docs/sample.docx

  # Several files at once, markdown written to a file
  anyparser a.pdf b.docx c.xlsx --format markdown -o combined.md

  # OCR a scan in Japanese with the scan preset
  anyparser --model ocr --ocr-language jpn --ocr-preset scan receipt.png

  # Crawl a site, depth-first, staying below the start path
  anyparser --model crawler --max-depth 50 --max-executions 2 \
            --strategy LIFO --traversal-scope subtree https://anyparser.com

  # Machine-readable output
  anyparser --json report.pdf > report.json

ENVIRONMENT VARIABLES:
  ANYPARSER_API_KEY   API key (used when --api-key is not given)
  ANYPARSER_API_URL   API base URL (default: https://anyparserapi.com)
  RUST_LOG            Override the log filter (e.g. anyparser_core=debug)
"#;

/// Parse documents and crawl websites with the Anyparser API.
#[derive(Parser, Debug)]
#[command(
    name = "anyparser",
    version,
    about = "Parse documents and crawl websites with the Anyparser API",
    long_about = "Upload local documents (PDF, Office, images, text) to the Anyparser service \
and print the extracted Markdown, or crawl a website starting from a single URL with \
--model crawler.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// File paths to upload, or one URL with --model crawler.
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Write the markdown (or raw text) to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Response format: json, markdown, html, text.
    #[arg(long)]
    format: Option<String>,

    /// Processing model: text, ocr, crawler.
    #[arg(long)]
    model: Option<String>,

    /// Do not extract embedded images.
    #[arg(long)]
    no_image: bool,

    /// Do not extract tables.
    #[arg(long)]
    no_table: bool,

    /// OCR language codes, comma-separated (e.g. eng,spa).
    #[arg(long, value_delimiter = ',')]
    ocr_language: Option<Vec<String>>,

    /// OCR preset (document, scan, receipt, invoice, …).
    #[arg(long)]
    ocr_preset: Option<String>,

    /// Crawler: maximum link depth from the start URL.
    #[arg(long)]
    max_depth: Option<u32>,

    /// Crawler: maximum number of pages to fetch.
    #[arg(long)]
    max_executions: Option<u32>,

    /// Crawler: FIFO (breadth-first) or LIFO (depth-first).
    #[arg(long)]
    strategy: Option<String>,

    /// Crawler: subtree or domain.
    #[arg(long)]
    traversal_scope: Option<String>,

    /// API base URL. Falls back to ANYPARSER_API_URL.
    #[arg(long)]
    api_url: Option<String>,

    /// API key. Falls back to ANYPARSER_API_KEY.
    #[arg(long)]
    api_key: Option<String>,

    /// Print the full response as JSON instead of markdown.
    #[arg(long)]
    json: bool,

    /// Request timeout in seconds.
    #[arg(long, env = "ANYPARSER_TIMEOUT", default_value_t = 300)]
    timeout: u64,

    /// Disable the spinner.
    #[arg(long)]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The spinner replaces INFO-level library logs unless -v is given.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build client ─────────────────────────────────────────────────────
    let options = build_options(&cli);
    let transport =
        HttpTransport::with_timeout(cli.timeout).context("Failed to set up HTTP client")?;
    let parser = Anyparser::with_transport(options, transport);
    let input = to_input(&cli.inputs);

    let spinner = show_progress.then(|| start_spinner(&cli.inputs));
    let started = Instant::now();

    // ── Run ──────────────────────────────────────────────────────────────
    let result = match cli.output {
        Some(ref path) => parser.parse_to_file(input, path).await,
        None => parser.parse(input).await,
    };
    if let Some(ref bar) = spinner {
        bar.finish_and_clear();
    }
    let output = result.context("Parse failed")?;
    let elapsed = started.elapsed();

    if cli.json {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
        println!("{json}");
        return Ok(());
    }

    if !cli.quiet {
        if let ParseOutput::Results(ref results) = output {
            print_summaries(results);
        }
    }

    match cli.output {
        Some(ref path) => {
            if !cli.quiet {
                eprintln!(
                    "{}  {} chars  {}ms  →  {}",
                    green("✔"),
                    total_chars(&output),
                    elapsed.as_millis(),
                    bold(&path.display().to_string()),
                );
            }
        }
        None => {
            let markdown = output.to_markdown();
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(markdown.as_bytes())
                .context("Failed to write to stdout")?;
            if !markdown.ends_with('\n') {
                handle.write_all(b"\n").ok();
            }
            if !cli.quiet {
                eprintln!("{}  {}ms", green("✔"), elapsed.as_millis());
            }
        }
    }

    Ok(())
}

/// Map CLI args to `AnyparserOption`. Unset flags stay unset so the
/// library can fall back to the environment and its defaults.
fn build_options(cli: &Cli) -> AnyparserOption {
    let mut builder = AnyparserOption::builder();

    if let Some(ref v) = cli.api_url {
        builder = builder.api_url(v);
    }
    if let Some(ref v) = cli.api_key {
        builder = builder.api_key(v);
    }
    if let Some(ref v) = cli.format {
        builder = builder.format(v);
    }
    if let Some(ref v) = cli.model {
        builder = builder.model(v);
    }
    if cli.no_image {
        builder = builder.image(false);
    }
    if cli.no_table {
        builder = builder.table(false);
    }
    if let Some(ref langs) = cli.ocr_language {
        builder = builder.ocr_language(langs.iter().map(|l| l.trim().to_string()));
    }
    if let Some(ref v) = cli.ocr_preset {
        builder = builder.ocr_preset(v);
    }
    if let Some(n) = cli.max_depth {
        builder = builder.max_depth(n);
    }
    if let Some(n) = cli.max_executions {
        builder = builder.max_executions(n);
    }
    if let Some(ref v) = cli.strategy {
        builder = builder.strategy(v);
    }
    if let Some(ref v) = cli.traversal_scope {
        builder = builder.traversal_scope(v);
    }

    builder.build()
}

/// One argument is sent as a single input so the crawler can accept it.
fn to_input(inputs: &[String]) -> ParseInput {
    match inputs {
        [only] => ParseInput::from(only),
        many => ParseInput::from(many),
    }
}

fn start_spinner(inputs: &[String]) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}  {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
    );
    bar.set_prefix("Parsing");
    bar.set_message(match inputs {
        [only] => only.clone(),
        many => format!("{} inputs", many.len()),
    });
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}

fn total_chars(output: &ParseOutput) -> u64 {
    match output {
        ParseOutput::Text(text) => text.chars().count() as u64,
        ParseOutput::Results(results) => results.iter().map(ParsedResult::total_characters).sum(),
    }
}

// ── Summaries ────────────────────────────────────────────────────────────────

fn print_summaries(results: &[ParsedResult]) {
    for result in results {
        match result {
            ParsedResult::Document(doc) => print_document(doc),
            ParsedResult::Crawl(crawl) => print_crawl(crawl),
        }
    }
}

fn print_document(doc: &PdfResult) {
    eprintln!("{} {}", cyan("◆"), bold(&doc.original_filename));
    eprintln!("  Checksum:          {}", dim(&doc.checksum));
    eprintln!("  Total characters:  {}", doc.total_characters);
    if !doc.items.is_empty() {
        eprintln!("  Pages:             {}", doc.items.len());
    }
}

fn print_crawl(crawl: &CrawlResult) {
    eprintln!("{} {}", cyan("◆"), bold(&crawl.start_url));
    eprintln!("  Total characters:  {}", crawl.total_characters);
    eprintln!("  Total items:       {}", crawl.total_items);
    if let Some(ref robots) = crawl.robots_directive {
        eprintln!(
            "  Robots:            user-agent {}  allow {:?}  disallow {:?}{}",
            robots.user_agent,
            robots.allow,
            robots.disallow,
            robots
                .crawl_delay
                .map(|d| format!("  delay {d}s"))
                .unwrap_or_default()
        );
    }
    for item in &crawl.items {
        eprintln!(
            "  {} {:<50}  {}  {}",
            green("✓"),
            item.url,
            dim(&format!("{} {}", item.status_code, item.status_message.as_deref().unwrap_or(""))),
            item.title.as_deref().unwrap_or(""),
        );
        eprintln!(
            "      {}",
            dim(&format!(
                "{} chars  politeness {}ms{}",
                item.total_characters,
                item.politeness_delay,
                item.directive.as_ref().map(describe_directive).unwrap_or_default()
            ))
        );
    }
}

fn describe_directive(directive: &CrawlDirective) -> String {
    let mut flags = Vec::new();
    if directive.noindex {
        flags.push("noindex");
    }
    if directive.nofollow {
        flags.push("nofollow");
    }
    let flags = if flags.is_empty() {
        String::new()
    } else {
        format!(" {}", flags.join(","))
    };
    let kind = directive
        .kind
        .as_ref()
        .map_or("untyped", DirectiveKind::as_str);
    format!("  directive {kind}{flags}")
}
