//! Acquisition error types.

use thiserror::Error;

/// Errors raised while fetching records from the media server.
#[derive(Debug, Error)]
pub enum QueryError {
    /// HTTP transport error (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("GraphQL query failed with status {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body text.
        message: String,
    },

    /// The endpoint answered 429 Too Many Requests.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// A well-formed response carried GraphQL `errors`.
    #[error("GraphQL query failed: {}", messages.join("; "))]
    GraphQl {
        /// One message per reported error.
        messages: Vec<String>,
    },

    /// The response body could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// The response decoded but a required field was missing.
    #[error("response is missing '{0}'")]
    MissingData(String),
}

/// Coarse failure classes used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    /// The request itself failed or was refused.
    Transport,
    /// The server reported application-level errors.
    Protocol,
    /// The response did not have the expected shape.
    Payload,
}

impl QueryError {
    #[must_use]
    pub const fn category(&self) -> FailureCategory {
        match self {
            Self::Http(_) | Self::Api { .. } | Self::RateLimited { .. } => {
                FailureCategory::Transport
            }
            Self::GraphQl { .. } => FailureCategory::Protocol,
            Self::Parse(_) | Self::MissingData(_) => FailureCategory::Payload,
        }
    }
}
