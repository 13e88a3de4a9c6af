//! `engine` crate — domain models, query selection, response validation, and
//! the handshake orchestrator.

pub mod models;
pub mod error;
pub mod query;
pub mod registration;
pub mod runner;

pub use models::{HandshakeOutcome, Identity, Stage, Step, SubmissionResult, WebhookGrant};
pub use error::HandshakeError;
pub use query::{last_two_digits, select_query, QueryVariant};
pub use registration::parse_grant;
pub use runner::{HandshakeRunner, RunnerConfig};
