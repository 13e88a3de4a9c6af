//! Client-level error type.

use thiserror::Error;

/// Errors returned by a client call that never produced an HTTP reply.
///
/// A reply with any status code is *not* an error at this layer; the engine
/// decides what a status means. The variant drives retry behaviour:
/// - `Retryable` — connect failures and timeouts.
/// - `Fatal`     — everything else.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Transient failure; the caller may try again.
    #[error("retryable transport error: {0}")]
    Retryable(String),

    /// Permanent failure; retrying will not help.
    #[error("fatal transport error: {0}")]
    Fatal(String),
}

impl ClientError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClientError::Retryable(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            ClientError::Retryable(err.to_string())
        } else {
            ClientError::Fatal(err.to_string())
        }
    }
}
