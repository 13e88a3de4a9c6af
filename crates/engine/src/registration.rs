//! Interpreting the generate endpoint's reply.
//!
//! Checks run in order: status must be exactly 200, the body must be
//! non-blank, it must be a JSON object, and both `webhook` and
//! `accessToken` must be string fields. The first failing check wins.

use clients::HttpReply;
use serde_json::{Map, Value};

use crate::models::redact_token;
use crate::{HandshakeError, WebhookGrant};

const WEBHOOK_FIELD: &str = "webhook";
const ACCESS_TOKEN_FIELD: &str = "accessToken";

/// Turn a registration reply into a [`WebhookGrant`].
///
/// # Errors
/// - [`HandshakeError::UnexpectedStatus`] if the status is not 200.
/// - [`HandshakeError::EmptyBody`] if the body is blank.
/// - [`HandshakeError::MalformedBody`] if the body is not a JSON object.
/// - [`HandshakeError::MissingFields`] if either field is absent.
pub fn parse_grant(reply: &HttpReply) -> Result<WebhookGrant, HandshakeError> {
    if reply.status != 200 {
        return Err(HandshakeError::UnexpectedStatus {
            status: reply.status,
            body: reply.body.clone(),
        });
    }

    if reply.body.trim().is_empty() {
        return Err(HandshakeError::EmptyBody);
    }

    let json: Value = serde_json::from_str(&reply.body)
        .map_err(|e| HandshakeError::MalformedBody(e.to_string()))?;
    let object = json.as_object().ok_or_else(|| {
        HandshakeError::MalformedBody(format!("expected a JSON object, got {json}"))
    })?;

    let field = |key: &str| object.get(key).and_then(Value::as_str).map(str::to_owned);

    match (field(WEBHOOK_FIELD), field(ACCESS_TOKEN_FIELD)) {
        (Some(webhook), Some(access_token)) => Ok(WebhookGrant { webhook, access_token }),
        _ => Err(HandshakeError::MissingFields {
            body: masked_body(object.clone()),
        }),
    }
}

/// The reply body with any string `accessToken` redacted.
fn masked_body(mut object: Map<String, Value>) -> String {
    if let Some(token) = object.get_mut(ACCESS_TOKEN_FIELD) {
        if let Some(raw) = token.as_str() {
            *token = Value::String(redact_token(raw));
        }
    }
    Value::Object(object).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(body: &str) -> HttpReply {
        HttpReply::new(200, body)
    }

    #[test]
    fn well_formed_reply_yields_grant() {
        let grant = parse_grant(&ok(r#"{"webhook":"https://x","accessToken":"tok"}"#))
            .expect("should parse");
        assert_eq!(grant.webhook, "https://x");
        assert_eq!(grant.access_token, "tok");
    }

    #[test]
    fn extra_fields_are_ignored() {
        let grant = parse_grant(&ok(
            r#"{"webhook":"https://x","accessToken":"tok","expiresIn":3600}"#,
        ))
        .expect("should parse");
        assert_eq!(grant.access_token, "tok");
    }

    #[test]
    fn non_200_is_rejected_even_if_body_is_valid() {
        let reply = HttpReply::new(201, r#"{"webhook":"https://x","accessToken":"tok"}"#);
        assert!(matches!(
            parse_grant(&reply),
            Err(HandshakeError::UnexpectedStatus { status: 201, .. })
        ));
    }

    #[test]
    fn server_error_keeps_body_for_diagnostics() {
        let reply = HttpReply::new(503, "maintenance");
        match parse_grant(&reply) {
            Err(HandshakeError::UnexpectedStatus { status, body }) => {
                assert_eq!(status, 503);
                assert_eq!(body, "maintenance");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn blank_body_is_empty() {
        assert!(matches!(parse_grant(&ok("")), Err(HandshakeError::EmptyBody)));
        assert!(matches!(parse_grant(&ok("  \n")), Err(HandshakeError::EmptyBody)));
    }

    #[test]
    fn invalid_json_is_malformed() {
        assert!(matches!(
            parse_grant(&ok("<html>oops</html>")),
            Err(HandshakeError::MalformedBody(_))
        ));
    }

    #[test]
    fn non_object_json_is_malformed() {
        assert!(matches!(
            parse_grant(&ok(r#"["https://x","tok"]"#)),
            Err(HandshakeError::MalformedBody(_))
        ));
    }

    #[test]
    fn missing_access_token_is_rejected() {
        assert!(matches!(
            parse_grant(&ok(r#"{"webhook":"https://x"}"#)),
            Err(HandshakeError::MissingFields { .. })
        ));
    }

    #[test]
    fn missing_webhook_is_rejected() {
        assert!(matches!(
            parse_grant(&ok(r#"{"accessToken":"tok"}"#)),
            Err(HandshakeError::MissingFields { .. })
        ));
    }

    #[test]
    fn non_string_fields_count_as_missing() {
        assert!(matches!(
            parse_grant(&ok(r#"{"webhook":"https://x","accessToken":null}"#)),
            Err(HandshakeError::MissingFields { .. })
        ));
        assert!(matches!(
            parse_grant(&ok(r#"{"webhook":42,"accessToken":"tok"}"#)),
            Err(HandshakeError::MissingFields { .. })
        ));
    }

    #[test]
    fn missing_fields_diagnostic_redacts_token() {
        let err = parse_grant(&ok(r#"{"accessToken":"supersecrettoken123"}"#))
            .expect_err("webhook is missing");

        let message = err.to_string();
        assert!(!message.contains("supersecrettoken123"), "token leaked: {message}");
        assert!(!format!("{err:?}").contains("supersecrettoken123"));
        assert!(message.contains("supe… (19 chars)"), "got {message}");
    }
}
