//! CLI entry point for the NEO Feed Rater tool.
//!
//! Provides subcommands for fetching a date range from NASA's NeoWs feed
//! and for analyzing an already-downloaded feed document offline.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use neo_feed_rater::{
    analyzer::summarize,
    fetch::{BasicClient, NeoClient, auth::UrlParam},
    model::DateRange,
    output::{append_counts, print_json},
    parser::parse_feed,
    store::SessionStore,
};
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "neo_feed_rater")]
#[command(about = "A tool to browse NASA's near-earth-object feed", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the feed for a date range and analyze it
    Fetch {
        /// Start date (YYYY-MM-DD); defaults to the last fetched range
        #[arg(short, long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD); defaults to the last fetched range
        #[arg(short, long)]
        end: Option<String>,

        /// CSV file to append the per-day counts to
        #[arg(short, long, default_value = "counts.csv")]
        output: String,

        /// JSON file remembering the last fetched range
        #[arg(long, default_value = ".neo_session.json")]
        session_file: String,
    },
    /// Analyze an already-downloaded feed JSON document
    Analyze {
        /// Path to the feed JSON file
        #[arg(value_name = "FILE")]
        source: String,

        /// CSV file to append the per-day counts to
        #[arg(short, long, default_value = "counts.csv")]
        output: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/neo_feed_rater.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("neo_feed_rater.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch {
            start,
            end,
            output,
            session_file,
        } => {
            fetch_and_analyze(start, end, &output, &session_file).await?;
        }
        Commands::Analyze { source, output } => {
            let bytes = std::fs::read(&source)
                .with_context(|| format!("failed to read feed file '{source}'"))?;
            let feed = parse_feed(&bytes)?;
            let summary = summarize(&feed);

            print_json(&summary)?;
            append_counts(&output, &summary.daily_counts)?;

            info!(
                element_count = feed.element_count,
                dates = summary.daily_counts.len(),
                "Feed file analyzed"
            );
        }
    }

    Ok(())
}

/// Resolves the date range, fetches the feed, and writes every output.
///
/// With no `--start`/`--end`, the range stored by the previous successful
/// fetch is reused; supplying only one of the two flags is left for the
/// feed client to reject as an incomplete range.
async fn fetch_and_analyze(
    start: Option<String>,
    end: Option<String>,
    output: &str,
    session_file: &str,
) -> Result<()> {
    let store = SessionStore::new(session_file);

    let range = match (start, end) {
        (None, None) => store
            .last_range()
            .context("no --start/--end given and no range stored from a previous fetch")?,
        (start, end) => DateRange::new(start.unwrap_or_default(), end.unwrap_or_default()),
    };

    let api_key = std::env::var("NASA_API_KEY").unwrap_or_else(|_| "DEMO_KEY".to_string());
    let client = NeoClient::new(UrlParam::api_key(BasicClient::new(), api_key));

    let feed = client.fetch(&range).await?;
    let summary = summarize(&feed);

    print_json(&summary)?;
    append_counts(output, &summary.daily_counts)?;

    // Only a successful fetch updates the remembered range.
    store.remember_range(&range)?;

    info!(
        element_count = feed.element_count,
        dates = summary.daily_counts.len(),
        "Feed processed successfully"
    );

    Ok(())
}
