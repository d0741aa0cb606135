//! Error responses.
//!
//! # Responsibilities
//! - Map each employee error kind to an HTTP status code
//! - Render the `{status, error, message, operation}` error body
//! - Report input validation and malformed JSON as 400
//!
//! # Design Decisions
//! - This is the only place error kinds become status codes
//! - No retry or recovery happens here

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::employee::EmployeeError;

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: u16,
    pub error: String,
    pub message: String,
    pub operation: Option<String>,
}

/// Errors surfaced by the inbound HTTP layer.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Employee(#[from] EmployeeError),

    #[error("invalid employee input: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("malformed request body: {0}")]
    MalformedBody(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedBody(rejection.body_text())
    }
}

/// Status code for an employee error kind.
pub fn status_for(err: &EmployeeError) -> StatusCode {
    match err {
        EmployeeError::NotFound { .. } => StatusCode::NOT_FOUND,
        EmployeeError::CreationFailed { .. } | EmployeeError::DeletionFailed { .. } => {
            StatusCode::BAD_REQUEST
        }
        EmployeeError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        EmployeeError::ServiceError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Employee(err) => status_for(err),
            Self::Validation(_) | Self::MalformedBody(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Stable label used in the request-failure log line.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Employee(err) => err.kind(),
            Self::Validation(_) => "validation",
            Self::MalformedBody(_) => "malformed_body",
        }
    }

    pub fn body(&self) -> ErrorBody {
        let status = self.status();
        let (message, operation) = match self {
            Self::Employee(err) => (err.message().to_string(), Some(err.operation().to_string())),
            other => (other.to_string(), None),
        };
        ErrorBody {
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Unknown").to_string(),
            message,
            operation,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = %status, kind = self.kind(), error = %self, "Request failed");
        } else {
            tracing::warn!(status = %status, kind = self.kind(), error = %self, "Request rejected");
        }
        (status, Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (EmployeeError::not_found("op", "m"), StatusCode::NOT_FOUND),
            (EmployeeError::creation_failed("op", "m"), StatusCode::BAD_REQUEST),
            (EmployeeError::deletion_failed("op", "m"), StatusCode::BAD_REQUEST),
            (EmployeeError::service_unavailable("op", "m"), StatusCode::SERVICE_UNAVAILABLE),
            (EmployeeError::service_error("op", "m"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            assert_eq!(status_for(&err), expected, "{err:?}");
        }
    }

    #[test]
    fn test_employee_error_body() {
        let err = ApiError::from(EmployeeError::not_found(
            "search employees by name",
            "No employees found with name containing: Zed",
        ));
        assert_eq!(
            err.body(),
            ErrorBody {
                status: 404,
                error: "Not Found".into(),
                message: "No employees found with name containing: Zed".into(),
                operation: Some("search employees by name".into()),
            }
        );
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(
            ApiError::from(EmployeeError::service_unavailable("fetch employees", "429")).kind(),
            "service_unavailable"
        );
        assert_eq!(ApiError::Validation(vec!["x".into()]).kind(), "validation");
        assert_eq!(ApiError::MalformedBody("eof".into()).kind(), "malformed_body");
    }

    #[test]
    fn test_validation_body() {
        let err = ApiError::Validation(vec![
            "name must not be blank".into(),
            "salary must be greater than 0".into(),
        ]);
        let body = err.body();
        assert_eq!(body.status, 400);
        assert_eq!(body.error, "Bad Request");
        assert_eq!(
            body.message,
            "invalid employee input: name must not be blank; salary must be greater than 0"
        );
        assert_eq!(body.operation, None);
    }
}
