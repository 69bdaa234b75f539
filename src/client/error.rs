//! Client Error Types

use thiserror::Error;

/// Errors that can occur when talking to the analytics API
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport or connection failure, including timeouts
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a non-2xx status
    #[error("API error {status}: {message}")]
    Http { status: u16, message: String },

    /// The body was not the JSON shape we expected
    #[error("Decode error: {0}")]
    Decode(String),

    /// Rejected before sending
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

impl ClientError {
    /// Whether the backend reported the resource as missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Http { status: 404, .. })
    }

    /// Classify a reqwest failure
    pub(crate) fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Network("request timed out".to_string())
        } else if e.is_connect() {
            ClientError::Network(format!("service unavailable: {}", e))
        } else if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Network(e.to_string())
        }
    }

    /// Build an HTTP error from a status and raw body.
    ///
    /// The backend wraps errors as `{"detail": "..."}`; fall back to the
    /// raw text, then to the canonical reason phrase.
    pub(crate) fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let detail = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string));

        let message = match detail {
            Some(d) => d,
            None if !body.trim().is_empty() => body.trim().to_string(),
            None => status.canonical_reason().unwrap_or("Unknown error").to_string(),
        };

        ClientError::Http {
            status: status.as_u16(),
            message,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_not_found_detection() {
        let err = ClientError::from_status(StatusCode::NOT_FOUND, r#"{"detail": "Event not found"}"#);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "API error 404: Event not found");

        let err = ClientError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "API error 500: Internal Server Error");
    }

    #[test]
    fn test_plain_text_body_kept() {
        let err = ClientError::from_status(StatusCode::BAD_GATEWAY, "upstream down\n");
        match err {
            ClientError::Http { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "upstream down");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
