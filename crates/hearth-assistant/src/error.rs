//! Error types for the assistant.

use hearth_core::error::HearthError;

/// Errors from the assistant pipeline.
///
/// Network and transcription failures are surfaced to the caller; the
/// caller owns any retry affordance. Malformed model replies are NOT an
/// error — the interpreter degrades them to a plain message.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("network error: {0}")]
    Network(String),
    #[error("API error: {0}")]
    Api(String),
    #[error("transcription error: {0}")]
    Transcription(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<HearthError> for AssistantError {
    fn from(err: HearthError) -> Self {
        AssistantError::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AssistantError::Network("connection refused".to_string());
        assert_eq!(err.to_string(), "network error: connection refused");

        let err = AssistantError::Api("no choices in response".to_string());
        assert_eq!(err.to_string(), "API error: no choices in response");

        let err = AssistantError::Transcription("bad audio".to_string());
        assert_eq!(err.to_string(), "transcription error: bad audio");
    }

    #[test]
    fn test_from_hearth_error() {
        let err: AssistantError = HearthError::Storage("disk full".to_string()).into();
        assert!(matches!(err, AssistantError::Storage(_)));
        assert!(err.to_string().contains("disk full"));
    }
}
