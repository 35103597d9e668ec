use thiserror::Error;

/// Maximum characters to include in error message body for debugging.
pub(crate) const MAX_ERROR_BODY_CHARS: usize = 200;

/// Errors that can occur when using the geocoding client.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// Conflicting or incomplete client configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Invalid request argument, detected before any network activity.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Signing secret is not valid URL-safe base64.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// HTTP/network layer error from reqwest.
    #[error("HTTP request failed: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Failure reported by a custom [`Transport`](crate::transport::Transport).
    #[error("transport error: {0}")]
    Transport(String),

    /// Unexpected HTTP response status.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Response body is not the expected JSON.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The geocoding API reported a non-success status.
    #[error("API error [{status}]: {}", .message.as_deref().unwrap_or("no error message"))]
    Api {
        status: String,
        message: Option<String>,
    },
}

impl GeocodeError {
    /// Returns `true` if the error came from the transport layer.
    ///
    /// Covers connection failures, timeouts and non-success HTTP statuses.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            GeocodeError::HttpClient(_) | GeocodeError::Transport(_) | GeocodeError::Http(_)
        )
    }

    /// Returns `true` if the response body could not be deserialized.
    pub fn is_parse(&self) -> bool {
        matches!(self, GeocodeError::Parse(_))
    }

    /// Returns the API status code if this is an API error.
    pub fn api_status(&self) -> Option<&str> {
        match self {
            GeocodeError::Api { status, .. } => Some(status),
            _ => None,
        }
    }
}

/// A specialized Result type for geocoding operations.
pub type Result<T> = std::result::Result<T, GeocodeError>;

/// Truncates a string to at most `max_chars` characters on a valid UTF-8 boundary.
pub(crate) fn truncate_str(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
