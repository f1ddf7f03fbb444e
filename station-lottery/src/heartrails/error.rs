//! HeartRails client error types.

use crate::lottery::ProviderError;

/// Errors from the HeartRails HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum HeartRailsError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The API answered 200 with an error message in the body
    #[error("API reported: {0}")]
    Reported(String),

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },
}

impl From<HeartRailsError> for ProviderError {
    fn from(err: HeartRailsError) -> Self {
        match err {
            HeartRailsError::Json { message, .. } => ProviderError::Malformed(message),
            other => ProviderError::Unavailable(other.to_string()),
        }
    }
}
