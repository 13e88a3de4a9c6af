//! Handshake orchestration.
//!
//! `HandshakeRunner` drives one linear run:
//! 1. Registers the identity and validates the returned grant.
//! 2. Selects the query variant from the registration number.
//! 3. Posts the query to the webhook with the access token as `Authorization`.
//!
//! Any failure ends the run; there is no way back to an earlier stage.
//! Retryable transport errors are retried only when `max_retries > 0`.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use clients::{ClientError, HttpReply, RegistrationClient, SubmissionClient, SubmissionPayload};
use tracing::{debug, info, instrument, warn};

use crate::registration::parse_grant;
use crate::{
    select_query, HandshakeError, HandshakeOutcome, Identity, Stage, Step, SubmissionResult,
};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Tuning knobs for the runner.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Retries after the first attempt for a retryable failure. 0 disables retry.
    pub max_retries: u32,
    /// Base delay for exponential back-off between retries.
    pub retry_base_delay: Duration,
    /// Post the query here instead of the webhook from the grant.
    pub submit_url: Option<String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            max_retries: 0,
            retry_base_delay: Duration::from_millis(500),
            submit_url: None,
        }
    }
}

// ---------------------------------------------------------------------------
// HandshakeRunner
// ---------------------------------------------------------------------------

/// Runs the register → select → submit flow against injected clients.
pub struct HandshakeRunner {
    registration: Arc<dyn RegistrationClient>,
    submission: Arc<dyn SubmissionClient>,
    config: RunnerConfig,
}

impl HandshakeRunner {
    pub fn new(
        registration: Arc<dyn RegistrationClient>,
        submission: Arc<dyn SubmissionClient>,
        config: RunnerConfig,
    ) -> Self {
        Self { registration, submission, config }
    }

    /// Run the handshake for `identity`.
    ///
    /// A submission answered with a non-2xx status still counts as a completed
    /// run; the status is carried in the outcome.
    ///
    /// # Errors
    /// Returns `HandshakeError` for a rejected or incomplete registration
    /// reply, transport failures, or retry exhaustion.
    #[instrument(skip(self, identity), fields(reg_no = %identity.reg_no))]
    pub async fn run(&self, identity: &Identity) -> Result<HandshakeOutcome, HandshakeError> {
        info!(stage = %Stage::Start, "registering");

        // ------------------------------------------------------------------
        // START → REGISTERED
        // ------------------------------------------------------------------
        let payload = identity.to_payload();
        let reply = self
            .call_with_retry(Step::Registration, || self.registration.register(&payload))
            .await?;
        let grant = parse_grant(&reply)?;

        info!(
            stage = %Stage::Registered,
            webhook = %grant.webhook,
            access_token = %grant.redacted_token(),
            "received webhook grant"
        );

        // ------------------------------------------------------------------
        // REGISTERED → QUERY_SELECTED
        // ------------------------------------------------------------------
        let query = select_query(&identity.reg_no);
        info!(stage = %Stage::QuerySelected, query = query.label(), "selected query");

        // ------------------------------------------------------------------
        // QUERY_SELECTED → SUBMITTED
        // ------------------------------------------------------------------
        let target = self
            .config
            .submit_url
            .clone()
            .unwrap_or_else(|| grant.webhook.clone());
        if target != grant.webhook {
            debug!(target = %target, "submit URL overridden");
        }

        let submission_payload = SubmissionPayload {
            final_query: query.sql().to_string(),
        };
        let reply = self
            .call_with_retry(Step::Submission, || {
                self.submission.submit(&target, &grant.access_token, &submission_payload)
            })
            .await?;

        let submission = SubmissionResult {
            status: reply.status,
            body: reply.body,
        };
        if submission.is_success() {
            info!(stage = %Stage::Submitted, status = submission.status, "query submitted");
        } else {
            warn!(
                stage = %Stage::Submitted,
                status = submission.status,
                "webhook answered with a non-success status"
            );
        }

        Ok(HandshakeOutcome {
            grant,
            query,
            submitted_to: target,
            submission,
        })
    }

    // -----------------------------------------------------------------------
    // Internal: a single client call with retry logic.
    // -----------------------------------------------------------------------

    async fn call_with_retry<F, Fut>(
        &self,
        step: Step,
        mut call: F,
    ) -> Result<HttpReply, HandshakeError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<HttpReply, ClientError>>,
    {
        let mut attempts = 0u32;

        loop {
            match call().await {
                Ok(reply) => return Ok(reply),

                Err(ClientError::Retryable(msg)) if self.config.max_retries > 0 => {
                    attempts += 1;
                    if attempts > self.config.max_retries {
                        return Err(HandshakeError::RetryExhausted {
                            step,
                            attempts,
                            message: msg,
                        });
                    }

                    let delay = self
                        .config
                        .retry_base_delay
                        .saturating_mul(2u32.saturating_pow(attempts - 1));

                    warn!(
                        "{} retryable error (attempt {}/{}), retrying in {:?}: {}",
                        step, attempts, self.config.max_retries, delay, msg
                    );

                    tokio::time::sleep(delay).await;
                }

                Err(source) => return Err(HandshakeError::Transport { step, source }),
            }
        }
    }
}
