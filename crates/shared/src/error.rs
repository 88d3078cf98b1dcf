//! Application-wide error types.
//!
//! These are the outward failure categories. Inner layers keep their own
//! precise error enums and convert at the API boundary.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed request (bad identifier, blank path segment, unreadable body).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Input failed one or more validation rules.
    #[error("Validation error: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// Resource not found, or it cannot be presented as requested.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Caller exceeded the request rate limit.
    #[error("Too many requests: {0}")]
    TooManyRequests(String),

    /// Transaction storage error.
    #[error("Storage error: {0}")]
    Storage(String),

    /// External service error.
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Request took longer than the configured limit.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest(_) | Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::Timeout(_) => 408,
            Self::TooManyRequests(_) => 429,
            Self::ExternalService(_) => 502,
            Self::Storage(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::TooManyRequests(_) => "TOO_MANY_REQUESTS",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::ExternalService(_) => "EXTERNAL_SERVICE_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message without the category prefix, suitable for a response body.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Validation(details) => format!("validation errors: {}", details.join(", ")),
            Self::BadRequest(msg)
            | Self::NotFound(msg)
            | Self::TooManyRequests(msg)
            | Self::Storage(msg)
            | Self::ExternalService(msg)
            | Self::Timeout(msg)
            | Self::Internal(msg) => msg.clone(),
        }
    }

    /// Individual messages carried by a validation error, empty otherwise.
    #[must_use]
    pub fn details(&self) -> &[String] {
        match self {
            Self::Validation(details) => details,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AppError::BadRequest(String::new()).status_code(), 400);
        assert_eq!(AppError::Validation(vec![]).status_code(), 400);
        assert_eq!(AppError::NotFound(String::new()).status_code(), 404);
        assert_eq!(AppError::Timeout(String::new()).status_code(), 408);
        assert_eq!(AppError::TooManyRequests(String::new()).status_code(), 429);
        assert_eq!(AppError::Storage(String::new()).status_code(), 500);
        assert_eq!(AppError::ExternalService(String::new()).status_code(), 502);
        assert_eq!(AppError::Internal(String::new()).status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::BadRequest(String::new()).error_code(), "BAD_REQUEST");
        assert_eq!(
            AppError::Validation(vec![]).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(AppError::NotFound(String::new()).error_code(), "NOT_FOUND");
        assert_eq!(
            AppError::TooManyRequests(String::new()).error_code(),
            "TOO_MANY_REQUESTS"
        );
        assert_eq!(AppError::Storage(String::new()).error_code(), "STORAGE_ERROR");
        assert_eq!(
            AppError::ExternalService(String::new()).error_code(),
            "EXTERNAL_SERVICE_ERROR"
        );
        assert_eq!(AppError::Timeout(String::new()).error_code(), "TIMEOUT");
        assert_eq!(
            AppError::Internal(String::new()).error_code(),
            "INTERNAL_ERROR"
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::BadRequest("msg".into()).to_string(),
            "Bad request: msg"
        );
        assert_eq!(
            AppError::Validation(vec!["first".into(), "second".into()]).to_string(),
            "Validation error: first, second"
        );
        assert_eq!(
            AppError::NotFound("msg".into()).to_string(),
            "Not found: msg"
        );
        assert_eq!(
            AppError::ExternalService("msg".into()).to_string(),
            "External service error: msg"
        );
        assert_eq!(
            AppError::Internal("msg".into()).to_string(),
            "Internal error: msg"
        );
    }

    #[test]
    fn test_error_message_has_no_prefix() {
        assert_eq!(AppError::NotFound("gone".into()).message(), "gone");
        assert_eq!(
            AppError::Validation(vec!["first".into(), "second".into()]).message(),
            "validation errors: first, second"
        );
    }

    #[test]
    fn test_validation_details() {
        let err = AppError::Validation(vec!["a".into(), "b".into()]);
        assert_eq!(err.details(), ["a".to_string(), "b".to_string()]);
        assert!(AppError::NotFound("x".into()).details().is_empty());
    }
}
