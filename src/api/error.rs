use std::fmt;

/// Every failure the API client can report, normalized to one shape.
///
/// Callers that only need to show the failure use [`ApiError::message`];
/// the variants exist for the few places that must tell them apart
/// (the delete tolerance in the coordinator).
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Client could not be constructed (bad base URL, TLS setup).
    Config(String),
    /// No response: DNS, refused connection, timeout, reset mid-body.
    Network(String),
    /// The backend answered with a non-2xx status.
    Http { status: u16, body: String },
    /// The response body was not the JSON we expected.
    Parse(String),
}

impl ApiError {
    /// One human-readable line describing the failure.
    pub fn message(&self) -> String {
        match self {
            ApiError::Config(msg) => format!("Client configuration error: {msg}"),
            ApiError::Network(msg) => format!("Could not reach the server: {msg}"),
            ApiError::Http { status, body } if body.trim().is_empty() => {
                format!("Request failed with HTTP {status}")
            }
            ApiError::Http { status, body } => {
                format!("Request failed with HTTP {status}: {}", body.trim())
            }
            ApiError::Parse(msg) => format!("Unexpected response from server: {msg}"),
        }
    }

    /// True when the failure happened below HTTP (no status was seen, or the
    /// body could not be read). Such failures may hide a completed request.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Network(_) | ApiError::Parse(_))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Parse(err.to_string())
        } else if err.is_builder() {
            ApiError::Config(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::Http {
                status: status.as_u16(),
                body: String::new(),
            }
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Parse(err.to_string())
    }
}
