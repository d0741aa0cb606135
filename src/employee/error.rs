//! Employee error classification.

use thiserror::Error;

/// Classified failure of an employee operation.
///
/// Every variant carries the operation that triggered it and a human-readable
/// message. The HTTP layer maps the variant to a status code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmployeeError {
    /// Resource absent, or the upstream answered a lookup with 4xx.
    #[error("{operation}: {message}")]
    NotFound { operation: String, message: String },

    /// Upstream rejected a create with 5xx.
    #[error("{operation}: {message}")]
    CreationFailed { operation: String, message: String },

    /// Upstream rejected a delete with 5xx.
    #[error("{operation}: {message}")]
    DeletionFailed { operation: String, message: String },

    /// Retry budget exhausted while the upstream kept rate limiting.
    #[error("{operation}: {message}")]
    ServiceUnavailable { operation: String, message: String },

    /// Catch-all: empty aggregates, unclassified upstream failures, decode errors.
    #[error("{operation}: {message}")]
    ServiceError { operation: String, message: String },
}

impl EmployeeError {
    pub fn not_found(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotFound {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn creation_failed(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CreationFailed {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn deletion_failed(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DeletionFailed {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn service_unavailable(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn service_error(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ServiceError {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Name of the operation that produced this error.
    pub fn operation(&self) -> &str {
        match self {
            Self::NotFound { operation, .. }
            | Self::CreationFailed { operation, .. }
            | Self::DeletionFailed { operation, .. }
            | Self::ServiceUnavailable { operation, .. }
            | Self::ServiceError { operation, .. } => operation,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::NotFound { message, .. }
            | Self::CreationFailed { message, .. }
            | Self::DeletionFailed { message, .. }
            | Self::ServiceUnavailable { message, .. }
            | Self::ServiceError { message, .. } => message,
        }
    }

    /// Stable label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::CreationFailed { .. } => "creation_failed",
            Self::DeletionFailed { .. } => "deletion_failed",
            Self::ServiceUnavailable { .. } => "service_unavailable",
            Self::ServiceError { .. } => "service_error",
        }
    }
}

/// Result type for employee operations.
pub type EmployeeResult<T> = Result<T, EmployeeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EmployeeError::not_found("get employee by id", "Employee not found with ID: 42");
        assert_eq!(err.to_string(), "get employee by id: Employee not found with ID: 42");
        assert_eq!(err.operation(), "get employee by id");
        assert_eq!(err.message(), "Employee not found with ID: 42");
        assert_eq!(err.kind(), "not_found");
    }

    #[test]
    fn test_kinds_are_distinct() {
        let kinds = [
            EmployeeError::not_found("op", "m").kind(),
            EmployeeError::creation_failed("op", "m").kind(),
            EmployeeError::deletion_failed("op", "m").kind(),
            EmployeeError::service_unavailable("op", "m").kind(),
            EmployeeError::service_error("op", "m").kind(),
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
