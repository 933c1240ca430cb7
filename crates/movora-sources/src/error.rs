use thiserror::Error;

/// Longest slice of an error response body kept in a [`TransportError`]
const MAX_ERROR_BODY: usize = 200;

/// Failure of a single provider request.
///
/// Callers above the gateway treat every variant the same way; the split
/// only exists to make log lines useful.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to {endpoint} failed: {source}")]
    Network {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// `body` is kept for `Debug` only; the display form never carries content.
    #[error("{endpoint} returned HTTP {status}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("could not decode {endpoint} response: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

impl TransportError {
    pub fn status(endpoint: impl Into<String>, status: u16, body: &str) -> Self {
        let body: String = body.chars().take(MAX_ERROR_BODY).collect();
        TransportError::Status {
            endpoint: endpoint.into(),
            status,
            body,
        }
    }

    pub fn endpoint(&self) -> &str {
        match self {
            TransportError::Network { endpoint, .. }
            | TransportError::Status { endpoint, .. }
            | TransportError::Decode { endpoint, .. } => endpoint,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_body_is_truncated() {
        let body = "x".repeat(1000);
        let err = TransportError::status("/movie/popular", 500, &body);
        match &err {
            TransportError::Status { body, status, .. } => {
                assert_eq!(body.len(), MAX_ERROR_BODY);
                assert_eq!(*status, 500);
            }
            other => panic!("unexpected variant: {:?}", other),
        }
        assert_eq!(err.endpoint(), "/movie/popular");
    }

    #[test]
    fn test_status_display_omits_body() {
        let err = TransportError::status("/movie/550", 401, r#"{"status_message":"Invalid API key"}"#);
        assert_eq!(err.to_string(), "/movie/550 returned HTTP 401");
        assert!(format!("{:?}", err).contains("Invalid API key"));
    }
}
