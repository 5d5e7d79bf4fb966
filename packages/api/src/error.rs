//! # Uniform request error
//!
//! Every failure of a request, whatever its cause, ends up as an [`ApiError`]
//! carrying a human-readable message ([`ApiError::detail`]) that the UI shows
//! in a snackbar or next to the form that caused it.
//!
//! The server answers errors with a JSON envelope. Two shapes occur:
//!
//! - `{"detail": "Du er allerede påmeldt"}`: a single message;
//! - `{"title": ["Dette feltet er påkrevd."], ...}`: field validation errors.
//!
//! Both are folded into `detail`; field errors are also kept per field so forms
//! can show them inline.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The server's message envelope. Also the success body of endpoints that
/// only acknowledge (delete, notify, activate, ...).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestResponse {
    #[serde(default)]
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-success status or a non-JSON body.
    #[error("{detail}")]
    Response {
        status: u16,
        detail: String,
        fields: BTreeMap<String, String>,
    },
    /// The request never got an answer.
    #[error("network error: {0}")]
    Network(String),
    /// A success answer did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("invalid request url: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Build the error for a failed response from its status and raw body.
    pub fn from_response(status: u16, status_text: &str, body: &str) -> Self {
        let mut fields = BTreeMap::new();
        let detail = match serde_json::from_str::<serde_json::Value>(body) {
            Ok(serde_json::Value::Object(map)) => {
                let detail = map
                    .get("detail")
                    .and_then(|d| d.as_str())
                    .map(str::to_string);
                for (field, value) in map.iter().filter(|(k, _)| k.as_str() != "detail") {
                    if let Some(message) = first_message(value) {
                        fields.insert(field.clone(), message);
                    }
                }
                detail.or_else(|| {
                    fields
                        .iter()
                        .next()
                        .map(|(field, message)| format!("{field}: {message}"))
                })
            }
            _ => None,
        };
        let detail = detail
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| fallback_detail(status, status_text));
        ApiError::Response {
            status,
            detail,
            fields,
        }
    }

    /// Message to show the user.
    pub fn detail(&self) -> String {
        match self {
            ApiError::Response { detail, .. } => detail.clone(),
            ApiError::Network(_) => "Kunne ikke kontakte serveren".to_string(),
            ApiError::Decode(_) | ApiError::InvalidUrl(_) => {
                "Noe gikk galt, prøv igjen senere".to_string()
            }
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Response { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Validation message for one form field, if the server sent one.
    pub fn field(&self, name: &str) -> Option<&str> {
        match self {
            ApiError::Response { fields, .. } => fields.get(name).map(String::as_str),
            _ => None,
        }
    }

    /// Whether this is a message the server meant for the user (shown inline)
    /// rather than a failure (shown as a generic toast).
    pub fn is_expected(&self) -> bool {
        match self {
            ApiError::Response { status, fields, .. } => {
                matches!(*status, 400 | 409 | 422)
                    || ((400..500).contains(status) && !fields.is_empty())
            }
            _ => false,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

fn first_message(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Array(items) => items.iter().find_map(first_message),
        serde_json::Value::Object(map) => map.values().find_map(first_message),
        _ => None,
    }
}

fn fallback_detail(status: u16, status_text: &str) -> String {
    if status_text.is_empty() {
        format!("Forespørselen feilet ({status})")
    } else {
        status_text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_envelope() {
        let err = ApiError::from_response(400, "Bad Request", r#"{"detail": "Du er allerede påmeldt"}"#);
        assert_eq!(err.detail(), "Du er allerede påmeldt");
        assert_eq!(err.status(), Some(400));
        assert!(err.is_expected());
    }

    #[test]
    fn test_field_errors() {
        let err = ApiError::from_response(
            400,
            "Bad Request",
            r#"{"title": ["Dette feltet er påkrevd."], "limit": ["Må være et tall."]}"#,
        );
        assert_eq!(err.field("title"), Some("Dette feltet er påkrevd."));
        assert_eq!(err.field("limit"), Some("Må være et tall."));
        // First field (ordered) becomes the summary
        assert_eq!(err.detail(), "limit: Må være et tall.");
    }

    #[test]
    fn test_non_json_body_uses_status_text() {
        let err = ApiError::from_response(502, "Bad Gateway", "<html>oops</html>");
        assert_eq!(err.detail(), "Bad Gateway");
        assert!(!err.is_expected());
    }

    #[test]
    fn test_missing_status_text() {
        let err = ApiError::from_response(500, "", "");
        assert_eq!(err.detail(), "Forespørselen feilet (500)");
    }

    #[test]
    fn test_classification() {
        assert!(ApiError::from_response(401, "Unauthorized", "{}").is_unauthorized());
        assert!(ApiError::from_response(404, "Not Found", "{}").is_not_found());
        assert!(!ApiError::from_response(404, "Not Found", "{}").is_expected());
        assert!(!ApiError::Network("timeout".into()).is_expected());
        assert_eq!(ApiError::Network("timeout".into()).detail(), "Kunne ikke kontakte serveren");
    }
}
