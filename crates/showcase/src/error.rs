//! Error types for the scrape pipeline.

use std::path::PathBuf;

use thiserror::Error;

use crate::transport::TransportError;

/// Errors that can abort a scrape run.
///
/// No variant is retried or swallowed inside the pipeline; every failure
/// surfaces to the orchestrator's caller.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Missing or invalid credential/configuration. Raised before any
    /// network call is made.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// A discussion-page or repository-metadata query failed. Raised before
    /// any destructive filesystem operation.
    #[error("transport error: {message}")]
    Transport { message: String },

    /// Output directory removal/creation or a record write failed. The
    /// output directory may be left partially replaced.
    #[error("persistence error at {}: {message}", path.display())]
    Persistence { path: PathBuf, message: String },
}

impl ScrapeError {
    /// Create a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a transport error.
    #[inline]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a persistence error for a path.
    #[inline]
    pub fn persistence(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Persistence {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl From<TransportError> for ScrapeError {
    fn from(e: TransportError) -> Self {
        Self::Transport {
            message: e.to_string(),
        }
    }
}

/// Extract a short error message suitable for display.
///
/// Takes the first line of an error message, which is useful for errors
/// that include backtraces or multi-line details.
#[inline]
pub fn short_error_message(e: &impl std::error::Error) -> String {
    let full = e.to_string();
    full.lines().next().unwrap_or(&full).to_string()
}

/// Result type for scrape operations.
pub type Result<T> = std::result::Result<T, ScrapeError>;
