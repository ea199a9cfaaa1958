//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Registry image reference does not match the accepted format
    #[error("Invalid image reference: {0}")]
    InvalidImageReference(String),

    /// Remote operation descriptor is unusable
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create an invalid image reference error
    pub fn invalid_image_reference(reference: impl Into<String>) -> Self {
        Self::InvalidImageReference(reference.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_image_reference_message() {
        let err = DomainError::invalid_image_reference("ubuntu:20.04");
        assert_eq!(err.to_string(), "Invalid image reference: ubuntu:20.04");
    }

    #[test]
    fn invalid_operation_message() {
        let err = DomainError::InvalidOperation("empty name".to_string());
        assert_eq!(err.to_string(), "Invalid operation: empty name");
    }

    #[test]
    fn validation_error_message() {
        let err = DomainError::ValidationError("field is required".to_string());
        assert_eq!(err.to_string(), "Validation failed: field is required");
    }
}
