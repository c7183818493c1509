//! Error types for configuration and GitHub API access.
//!
//! Neither kind is recoverable: both propagate to `main`, which prints the
//! message and exits without printing a partial report.

use thiserror::Error;

/// Timestamp format accepted for the window bounds.
pub const DATE_FORMAT_HINT: &str = "RFC3339 (example: 2006-01-02T15:04:05-08:00)";

/// Missing or malformed runtime input.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{var} is not set")]
    Missing { var: &'static str },

    #[error("{var} is empty")]
    Empty { var: &'static str },

    #[error(
        "Failed to parse {var} ({value:?}). Please make sure that it is in {hint}",
        hint = DATE_FORMAT_HINT
    )]
    InvalidDate {
        var: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Failure talking to the GitHub API.
#[derive(Error, Debug)]
pub enum GithubError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("GET {url} returned {status}: {body}")]
    Status { url: String, status: u16, body: String },

    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}
