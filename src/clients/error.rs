use thiserror::Error;

/// Failures talking to the reservation backend.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Backend returned {status}: {message}")]
    Backend { status: u16, message: String },
    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Invalid base url: {0}")]
    InvalidBaseUrl(String),
    #[error("Invalid api token: {0}")]
    InvalidToken(String),
}

impl ApiError {
    pub fn backend(status: u16, message: impl Into<String>) -> Self {
        ApiError::Backend {
            status,
            message: message.into(),
        }
    }

    /// Text suitable for showing to the user as-is.
    ///
    /// Backend failures carry a display-ready message of their own; anything
    /// else falls back to the error description.
    pub fn display_message(&self) -> String {
        match self {
            ApiError::Backend { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_message_is_shown_verbatim() {
        let error = ApiError::backend(409, "conflict");
        assert_eq!(error.display_message(), "conflict");
        assert_eq!(error.to_string(), "Backend returned 409: conflict");
    }

    #[test]
    fn other_errors_fall_back_to_description() {
        let error = ApiError::InvalidBaseUrl("relative URL without a base".to_string());
        assert_eq!(error.display_message(), "Invalid base url: relative URL without a base");
    }
}
