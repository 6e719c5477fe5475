//! Error handling for the trends module

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrendsError {
    /// Failed to decode a JSON payload from the provider
    #[error("Decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Reqwest error, typically related to network issues or request failures.
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("HTTP error with status {status}: {message}")]
    Http { status: u16, message: String },

    /// The payload parsed but did not have the expected shape.
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl TrendsError {
    pub async fn from_response(response: reqwest::Response) -> TrendsError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response text".to_string());

        TrendsError::Http { status, message }
    }

    /// Whether the provider is throttling us.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, TrendsError::Http { status: 429, .. })
    }
}
