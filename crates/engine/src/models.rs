//! Core domain models for a handshake run.
//!
//! Everything here lives for one process run; nothing is persisted.

use std::fmt;

use clients::RegistrationPayload;

use crate::QueryVariant;

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Who is registering. Supplied once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub reg_no: String,
    pub email: String,
}

impl Identity {
    pub fn new(
        name: impl Into<String>,
        reg_no: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            reg_no: reg_no.into(),
            email: email.into(),
        }
    }

    /// Wire body for the registration call.
    pub fn to_payload(&self) -> RegistrationPayload {
        RegistrationPayload {
            name: self.name.clone(),
            reg_no: self.reg_no.clone(),
            email: self.email.clone(),
        }
    }

    /// Names of the fields that are empty or whitespace-only.
    pub fn blank_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("reg_no", &self.reg_no),
            ("email", &self.email),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }
}

// ---------------------------------------------------------------------------
// WebhookGrant
// ---------------------------------------------------------------------------

/// The `webhook` / `accessToken` pair returned by registration.
#[derive(Clone, PartialEq, Eq)]
pub struct WebhookGrant {
    pub webhook: String,
    pub access_token: String,
}

impl WebhookGrant {
    pub fn redacted_token(&self) -> String {
        redact_token(&self.access_token)
    }
}

/// Token form safe for logs: a prefix of at most 4 characters, never more
/// than half the token, followed by the length.
pub fn redact_token(token: &str) -> String {
    let len = token.chars().count();
    let prefix: String = token.chars().take((len / 2).min(4)).collect();
    format!("{prefix}… ({len} chars)")
}

impl fmt::Debug for WebhookGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookGrant")
            .field("webhook", &self.webhook)
            .field("access_token", &self.redacted_token())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// SubmissionResult
// ---------------------------------------------------------------------------

/// What the webhook answered. Only ever printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    pub status: u16,
    pub body: String,
}

impl SubmissionResult {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// ---------------------------------------------------------------------------
// Stage / Step
// ---------------------------------------------------------------------------

/// Position in the linear run: START → REGISTERED → QUERY_SELECTED → SUBMITTED.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    Registered,
    QuerySelected,
    Submitted,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::Registered => write!(f, "registered"),
            Self::QuerySelected => write!(f, "query_selected"),
            Self::Submitted => write!(f, "submitted"),
        }
    }
}

/// The network call in flight when something went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Registration,
    Submission,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registration => write!(f, "registration"),
            Self::Submission => write!(f, "submission"),
        }
    }
}

// ---------------------------------------------------------------------------
// HandshakeOutcome
// ---------------------------------------------------------------------------

/// Everything a completed run produced.
#[derive(Debug, Clone)]
pub struct HandshakeOutcome {
    pub grant: WebhookGrant,
    pub query: QueryVariant,
    /// URL the query was actually posted to.
    pub submitted_to: String,
    pub submission: SubmissionResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_mirrors_identity() {
        let identity = Identity::new("Ada", "REG-0045", "ada@example.com");
        let payload = identity.to_payload();
        assert_eq!(payload.name, "Ada");
        assert_eq!(payload.reg_no, "REG-0045");
        assert_eq!(payload.email, "ada@example.com");
    }

    #[test]
    fn blank_fields_lists_empty_values() {
        let identity = Identity::new("Ada", "  ", "");
        assert_eq!(identity.blank_fields(), vec!["reg_no", "email"]);
        assert!(Identity::new("a", "1", "e").blank_fields().is_empty());
    }

    #[test]
    fn token_is_redacted_in_debug_output() {
        let grant = WebhookGrant {
            webhook: "https://x".into(),
            access_token: "eyJhbGciOiJIUzI1NiJ9.secret".into(),
        };
        let debug = format!("{grant:?}");
        assert!(debug.contains("eyJh"));
        assert!(!debug.contains("secret"));
        assert_eq!(grant.redacted_token(), "eyJh… (27 chars)");
    }

    #[test]
    fn short_tokens_reveal_at_most_half() {
        assert_eq!(redact_token("tok"), "t… (3 chars)");
        assert_eq!(redact_token("abcd"), "ab… (4 chars)");
        assert_eq!(redact_token("x"), "… (1 chars)");
        assert_eq!(redact_token(""), "… (0 chars)");
    }
}
