//! JSON bodies sent to the grading service.

use serde::Serialize;

/// Body of the `generateWebhook` POST.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationPayload {
    pub name: String,
    #[serde(rename = "regNo")]
    pub reg_no: String,
    pub email: String,
}

/// Body of the webhook submission POST.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionPayload {
    #[serde(rename = "finalQuery")]
    pub final_query: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn registration_payload_uses_camel_case_reg_no() {
        let payload = RegistrationPayload {
            name: "Ada".into(),
            reg_no: "REG12345".into(),
            email: "ada@example.com".into(),
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({ "name": "Ada", "regNo": "REG12345", "email": "ada@example.com" })
        );
    }

    #[test]
    fn submission_payload_has_single_final_query_field() {
        let payload = SubmissionPayload { final_query: "SELECT 1;".into() };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({ "finalQuery": "SELECT 1;" })
        );
    }
}
