//! Last-used date range persistence.
//!
//! A plain JSON object on disk, keyed `startDate` / `endDate`:
//! ```json
//! {
//!   "startDate": "2024-01-01",
//!   "endDate": "2024-01-07"
//! }
//! ```
//! Written after every successful fetch so the next session can pre-fill
//! the range. This store is write-mostly and never consulted by the feed
//! client itself.

use anyhow::Result;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::model::DateRange;

pub const START_DATE_KEY: &str = "startDate";
pub const END_DATE_KEY: &str = "endDate";

pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Sets one key, keeping any other entries in the file. A missing or
    /// unreadable file starts over from an empty map.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.read();
        entries.insert(key.to_string(), value.to_string());
        std::fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;
        Ok(())
    }

    /// Records `range` as the last successfully fetched range.
    pub fn remember_range(&self, range: &DateRange) -> Result<()> {
        self.set(START_DATE_KEY, &range.start)?;
        self.set(END_DATE_KEY, &range.end)
    }

    /// Returns the stored range, if a previous session saved one.
    pub fn last_range(&self) -> Option<DateRange> {
        let entries = self.read();
        let start = entries.get(START_DATE_KEY)?;
        let end = entries.get(END_DATE_KEY)?;
        Some(DateRange::new(start, end))
    }

    fn read(&self) -> HashMap<String, String> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => HashMap::new(),
        }
    }
}
