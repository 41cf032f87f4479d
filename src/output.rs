//! Output formatting and persistence for feed analysis results.
//!
//! Supports pretty-printing, JSON serialization, and CSV append of the
//! per-day count series.

use anyhow::Result;
use tracing::{debug, info};

use crate::analyzer::{DailyCount, FeedSummary};
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// Logs a feed summary using Rust's debug pretty-print format.
pub fn print_pretty(summary: &FeedSummary) {
    debug!("{:#?}", summary);
}

/// Logs a feed summary as pretty-printed JSON.
pub fn print_json(summary: &FeedSummary) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}

/// Appends the per-day count series as rows to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_counts(path: &str, counts: &[DailyCount]) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, rows = counts.len(), "Appending CSV records");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    for count in counts {
        writer.serialize(count)?;
    }
    writer.flush()?;

    Ok(())
}
