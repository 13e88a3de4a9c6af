//! reqwest-backed implementation of both client traits.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, RequestBuilder};
use tracing::debug;

use crate::{
    ClientError, HttpReply, RegistrationClient, RegistrationPayload, SubmissionClient,
    SubmissionPayload,
};

/// Endpoint that hands out a webhook and access token.
pub const DEFAULT_GENERATE_URL: &str =
    "https://bfhldevapigw.healthrx.co.in/hiring/generateWebhook/JAVA";

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(20);

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Transport settings for [`HttpClient`].
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Where the registration POST goes.
    pub generate_url: String,
    pub connect_timeout: Duration,
    /// Applies to each read from the socket, not the whole exchange.
    pub read_timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            generate_url: DEFAULT_GENERATE_URL.to_string(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            read_timeout: DEFAULT_READ_TIMEOUT,
            user_agent: concat!("webhook-handshake/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// HttpClient
// ---------------------------------------------------------------------------

/// Talks to the grading service over HTTP.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpConfig,
}

impl HttpClient {
    pub fn new(config: HttpConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| ClientError::Fatal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Send the request and buffer the whole reply body.
    async fn execute(request: RequestBuilder) -> Result<HttpReply, ClientError> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(status, body_len = body.len(), "received reply");
        Ok(HttpReply { status, body })
    }
}

#[async_trait]
impl RegistrationClient for HttpClient {
    async fn register(&self, payload: &RegistrationPayload) -> Result<HttpReply, ClientError> {
        debug!(url = %self.config.generate_url, "POST registration");
        let request = self
            .client
            .post(&self.config.generate_url)
            .header(ACCEPT, "application/json")
            .json(payload);
        Self::execute(request).await
    }
}

#[async_trait]
impl SubmissionClient for HttpClient {
    async fn submit(
        &self,
        webhook_url: &str,
        access_token: &str,
        payload: &SubmissionPayload,
    ) -> Result<HttpReply, ClientError> {
        debug!(url = %webhook_url, "POST submission");
        let request = self
            .client
            .post(webhook_url)
            .header(AUTHORIZATION, access_token)
            .json(payload);
        Self::execute(request).await
    }
}
