//! Error types for ad-copy generation.

/// Errors from an ad-copy producer.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("generation service returned status {status}")]
    Status { status: u16 },

    #[error("generation service returned no ads{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Empty { message: Option<String> },

    #[error("generation timed out after {ms}ms")]
    Timeout { ms: u64 },

    #[error(transparent)]
    Core(#[from] adforge_core::AdforgeError),
}

/// Result type for generation operations.
pub type Result<T> = std::result::Result<T, GenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_message_is_optional() {
        let err = GenError::Empty { message: None };
        assert_eq!(err.to_string(), "generation service returned no ads");

        let err = GenError::Empty {
            message: Some("quota exceeded".to_string()),
        };
        assert!(err.to_string().ends_with(": quota exceeded"));
    }

    #[test]
    fn timeout_names_the_budget() {
        assert!(GenError::Timeout { ms: 250 }.to_string().contains("250ms"));
    }
}
