//! The capability traits the handshake engine depends on.

use async_trait::async_trait;

use crate::{ClientError, RegistrationPayload, SubmissionPayload};

/// Raw result of a POST that reached the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }
}

/// Exchanges an identity for a webhook grant.
///
/// Implementations return whatever the server answered; interpreting the
/// status and body is the engine's job.
#[async_trait]
pub trait RegistrationClient: Send + Sync {
    async fn register(&self, payload: &RegistrationPayload) -> Result<HttpReply, ClientError>;
}

/// Posts the final query to a webhook.
#[async_trait]
pub trait SubmissionClient: Send + Sync {
    /// `access_token` must be sent verbatim as the `Authorization` header.
    async fn submit(
        &self,
        webhook_url: &str,
        access_token: &str,
        payload: &SubmissionPayload,
    ) -> Result<HttpReply, ClientError>;
}
