//! Error types for the job search client.
//!
//! None of these reach UI code as failures: the search client converts every
//! variant into an empty result set and keeps the error only as a diagnostic.

use std::time::Duration;
use thiserror::Error;

/// Everything that can go wrong while fetching one page of listings.
#[derive(Error, Debug)]
pub enum SearchError {
    /// App id or app key is not configured.
    #[error("Search API credentials unavailable (set ADZUNA_APP_ID and ADZUNA_APP_KEY)")]
    MissingCredentials,

    /// Connection, DNS or TLS failure.
    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The request did not complete in time.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The API answered with a non-2xx status.
    #[error("API returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The body was not the JSON shape we expect.
    #[error("Malformed response body: {0}")]
    Decode(String),
}

impl SearchError {
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            SearchError::Timeout(timeout)
        } else if err.is_decode() {
            SearchError::Decode(err.to_string())
        } else {
            SearchError::Transport(err)
        }
    }

    /// Short category name used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            SearchError::MissingCredentials => "configuration",
            SearchError::Transport(_) | SearchError::Timeout(_) => "transport",
            SearchError::Http { .. } | SearchError::Decode(_) => "protocol",
        }
    }
}
