use thiserror::Error;

/// Failure modes for a single feed fetch.
///
/// Decode problems inside individual records (a missing or non-numeric
/// velocity, say) are not fetch failures; those values come back as `None`
/// on the model and the affected object is simply excluded from the extrema
/// scans.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The caller supplied an empty, malformed, or reversed date range.
    /// Raised before any network I/O happens.
    #[error("both start and end dates are required in YYYY-MM-DD form")]
    MissingDateRange,

    /// The feed API answered but rejected the request (bad key, range too
    /// wide, etc). Carries the upstream message verbatim for display.
    #[error("feed API rejected the request: {0}")]
    Upstream(String),

    /// Network-level failure: connection error, timeout, non-2xx status,
    /// or an unreadable response body.
    #[error("network request failed: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Transport(err.to_string())
    }
}
