//! `clients` crate — the two outbound capabilities of a handshake run.
//!
//! The engine talks to the grading service only through
//! [`RegistrationClient`] and [`SubmissionClient`]. [`HttpClient`] is the
//! reqwest-backed implementation of both; [`mock`] holds test doubles.

pub mod error;
pub mod http;
pub mod mock;
pub mod payload;
pub mod traits;

pub use error::ClientError;
pub use http::{HttpClient, HttpConfig};
pub use payload::{RegistrationPayload, SubmissionPayload};
pub use traits::{HttpReply, RegistrationClient, SubmissionClient};
