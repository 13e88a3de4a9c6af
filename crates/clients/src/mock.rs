//! Test doubles for [`RegistrationClient`] and [`SubmissionClient`].
//!
//! Both mocks record every call they receive so tests can assert on what
//! would have gone over the wire, or that nothing did.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::{
    ClientError, HttpReply, RegistrationClient, RegistrationPayload, SubmissionClient,
    SubmissionPayload,
};

/// Behaviour injected into a mock at construction time.
#[derive(Debug, Clone)]
pub enum MockBehaviour {
    /// Always answer with this reply.
    Reply(HttpReply),
    /// Always fail with this error.
    Fail(ClientError),
    /// Fail `times` times, then answer with `reply`.
    FailThenReply {
        error: ClientError,
        times: usize,
        reply: HttpReply,
    },
}

impl MockBehaviour {
    /// Outcome for the call at position `attempt` (0-indexed).
    fn outcome(&self, attempt: usize) -> Result<HttpReply, ClientError> {
        match self {
            MockBehaviour::Reply(reply) => Ok(reply.clone()),
            MockBehaviour::Fail(err) => Err(err.clone()),
            MockBehaviour::FailThenReply { error, times, reply } => {
                if attempt < *times {
                    Err(error.clone())
                } else {
                    Ok(reply.clone())
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

pub struct MockRegistrationClient {
    pub behaviour: MockBehaviour,
    /// Every payload seen, in call order.
    pub calls: Arc<Mutex<Vec<RegistrationPayload>>>,
}

impl MockRegistrationClient {
    pub fn new(behaviour: MockBehaviour) -> Self {
        Self {
            behaviour,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answer with `status` and `body` on every call.
    pub fn replying(status: u16, body: impl Into<String>) -> Self {
        Self::new(MockBehaviour::Reply(HttpReply::new(status, body)))
    }

    pub fn failing(error: ClientError) -> Self {
        Self::new(MockBehaviour::Fail(error))
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl RegistrationClient for MockRegistrationClient {
    async fn register(&self, payload: &RegistrationPayload) -> Result<HttpReply, ClientError> {
        let attempt = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(payload.clone());
            calls.len() - 1
        };
        self.behaviour.outcome(attempt)
    }
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// One recorded call to [`MockSubmissionClient::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionCall {
    pub webhook_url: String,
    pub access_token: String,
    pub payload: SubmissionPayload,
}

pub struct MockSubmissionClient {
    pub behaviour: MockBehaviour,
    pub calls: Arc<Mutex<Vec<SubmissionCall>>>,
}

impl MockSubmissionClient {
    pub fn new(behaviour: MockBehaviour) -> Self {
        Self {
            behaviour,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn replying(status: u16, body: impl Into<String>) -> Self {
        Self::new(MockBehaviour::Reply(HttpReply::new(status, body)))
    }

    pub fn failing(error: ClientError) -> Self {
        Self::new(MockBehaviour::Fail(error))
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Snapshot of the recorded calls.
    pub fn recorded(&self) -> Vec<SubmissionCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubmissionClient for MockSubmissionClient {
    async fn submit(
        &self,
        webhook_url: &str,
        access_token: &str,
        payload: &SubmissionPayload,
    ) -> Result<HttpReply, ClientError> {
        let attempt = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(SubmissionCall {
                webhook_url: webhook_url.to_owned(),
                access_token: access_token.to_owned(),
                payload: payload.clone(),
            });
            calls.len() - 1
        };
        self.behaviour.outcome(attempt)
    }
}
