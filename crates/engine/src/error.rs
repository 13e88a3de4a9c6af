//! Engine-level error types.

use clients::ClientError;
use thiserror::Error;

use crate::Step;

/// Every way a handshake run can end early.
#[derive(Debug, Error)]
pub enum HandshakeError {
    // ------ Registration response ------

    /// The generate endpoint answered with something other than 200.
    #[error("generateWebhook returned non-200: {status}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("empty response body from generateWebhook")]
    EmptyBody,

    /// The body was not a JSON object.
    #[error("malformed response body from generateWebhook: {0}")]
    MalformedBody(String),

    /// `webhook` or `accessToken` absent (or not a string).
    #[error("missing webhook or accessToken in response: {body}")]
    MissingFields { body: String },

    // ------ Transport ------

    /// A client call failed without producing a reply.
    #[error("{step} call failed: {source}")]
    Transport {
        step: Step,
        #[source]
        source: ClientError,
    },

    /// A retryable failure persisted through every configured retry.
    #[error("{step} call exceeded retry limit after {attempts} attempts: {message}")]
    RetryExhausted {
        step: Step,
        attempts: u32,
        message: String,
    },
}
