use crate::logging::LogLevel;
use crate::trends::error::TrendsError;

#[derive(Debug, Clone)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Log level for a failed provider call. Only affects how the event is shown.
    pub fn classify_fetch_error(&self, error: &TrendsError) -> LogLevel {
        match error {
            // Non-critical: throttling and temporary server issues
            TrendsError::Http { status, .. } if *status == 429 => LogLevel::Warn,
            TrendsError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,

            // Network issues - usually temporary
            TrendsError::Reqwest(_) => LogLevel::Warn,

            // Critical: rejected requests, malformed responses
            TrendsError::Http { .. } => LogLevel::Error,
            TrendsError::Decode(_) | TrendsError::Malformed(_) => LogLevel::Error,
        }
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new()
    }
}
