//! Error types for fetching launch pages.
//!
//! Two kinds of failure exist: the transport could not deliver a response
//! body, or the body did not decode into a page.  A fetch task that panics
//! is reported as a third, `interrupted`.  All are folded into a
//! single "request failed" flag at the data-source boundary; the kind is
//! only kept around for logging.

use thiserror::Error;

/// Failure reported by a [`Transport`](crate::source::Transport).
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP client failed (connection, TLS, timeout, ...).
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status code.
    #[error("server responded with status {0}")]
    Status(u16),

    /// The request body could not be serialized.
    #[error("could not encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// Any other adapter-specific failure.
    #[error("{0}")]
    Other(String),
}

/// Failure of one complete fetch cycle (transport + decode).
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    #[error("could not decode response: {0}")]
    Decoding(#[from] serde_json::Error),

    /// The fetch task panicked or was cancelled before it finished.
    #[error("fetch interrupted: {0}")]
    Interrupted(#[from] tokio::task::JoinError),
}

impl FetchError {
    /// Short label used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport(_) => "transport",
            FetchError::Decoding(_) => "decoding",
            FetchError::Interrupted(_) => "interrupted",
        }
    }
}
