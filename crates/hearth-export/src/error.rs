//! Error types for the export builder.

use hearth_core::error::HearthError;

/// Errors from snapshot generation and file export.
///
/// `PersonNotFound` is load-bearing: callers must surface it, not mask it.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("person not found: {0}")]
    PersonNotFound(i64),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<HearthError> for ExportError {
    fn from(err: HearthError) -> Self {
        match err {
            HearthError::Serialization(msg) => ExportError::Serialization(msg),
            HearthError::Io(e) => ExportError::Io(e),
            other => ExportError::Storage(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = ExportError::PersonNotFound(42);
        assert_eq!(err.to_string(), "person not found: 42");
    }

    #[test]
    fn test_from_hearth_storage_error() {
        let err: ExportError = HearthError::Storage("locked".to_string()).into();
        assert!(matches!(err, ExportError::Storage(_)));
    }
}
