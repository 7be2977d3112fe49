use thiserror::Error;

/// Shown when the backend gives no usable message.
pub const GENERIC_NETWORK_MESSAGE: &str = "Network error";

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connect failure, timeout, ...).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered but reported failure.
    #[error("Backend error (HTTP {status}): {}", .message.as_deref().unwrap_or("no message"))]
    Backend {
        status: u16,
        message: Option<String>,
    },

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Message suitable for an alert, falling back to `fallback` when the
    /// backend supplied none.
    pub fn user_message_or(&self, fallback: &str) -> String {
        match self {
            ApiError::Transport(_) => GENERIC_NETWORK_MESSAGE.to_string(),
            ApiError::Backend {
                message: Some(msg), ..
            } if !msg.trim().is_empty() => msg.clone(),
            ApiError::InvalidRequest(msg) => msg.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn user_message(&self) -> String {
        self.user_message_or(GENERIC_NETWORK_MESSAGE)
    }

    /// Whether a later identical read might succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Transport(_) => true,
            ApiError::Backend { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_message_wins() {
        let err = ApiError::Backend {
            status: 400,
            message: Some("Invalid submission id".into()),
        };
        assert_eq!(err.user_message_or("fallback"), "Invalid submission id");
        assert!(!err.is_transient());
    }

    #[test]
    fn test_blank_backend_message_falls_back() {
        let err = ApiError::Backend {
            status: 502,
            message: Some("  ".into()),
        };
        assert_eq!(err.user_message_or("Could not submit solution."), "Could not submit solution.");
        assert!(err.is_transient());

        let err = ApiError::Backend {
            status: 404,
            message: None,
        };
        assert_eq!(err.user_message(), GENERIC_NETWORK_MESSAGE);
    }
}
