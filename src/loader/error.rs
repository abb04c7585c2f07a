//! Initial load error types

use thiserror::Error;

/// Errors that can occur fetching scheduler collections
#[derive(Error, Debug)]
pub enum LoadError {
    /// Scheduler API could not be reached
    #[error("Scheduler API unavailable at {0}")]
    Unavailable(String),

    /// Request failed
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success response
    #[error("API error {status} on {resource}: {message}")]
    ApiError {
        resource: &'static str,
        status: u16,
        message: String,
    },

    /// Request timed out
    #[error("Request timeout fetching {0}")]
    Timeout(&'static str),

    /// Response body did not match the expected shape
    #[error("Invalid {resource} payload: {message}")]
    Decode {
        resource: &'static str,
        message: String,
    },

    /// Load was cancelled before completing
    #[error("Initial load cancelled")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LoadError::ApiError {
            resource: "days",
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "API error 500 on days: boom");
        assert_eq!(
            LoadError::Timeout("appointments").to_string(),
            "Request timeout fetching appointments"
        );
    }
}
