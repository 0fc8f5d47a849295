//! Unified application error types for TrackTogether.
//!
//! Every crate maps its internal failures into [`AppError`] so that the
//! `?` operator works across the store, identity, catalog, and service
//! boundaries. The [`ErrorKind`] decides how a caller should react:
//! transient failures may be retried by repeating the user gesture,
//! everything else is final.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// Input validation failed (empty list name, missing title, self-invite).
    Validation,
    /// The referenced entity does not exist.
    NotFound,
    /// A duplicate invitation or membership.
    Conflict,
    /// An illegal state transition (accepting a non-pending invitation).
    State,
    /// The acting user lacks permission for the operation.
    Authorization,
    /// The user is already a member; informational, not a failure.
    AlreadyMember,
    /// An I/O failure that is presumed retryable.
    Transient,
    /// Credentials were rejected or no session is active.
    Authentication,
    /// A configuration error occurred.
    Configuration,
    /// A document could not be encoded or decoded.
    Serialization,
    /// An internal invariant was violated.
    Internal,
}

impl ErrorKind {
    /// Whether repeating the same call may succeed.
    pub fn is_retryable(self) -> bool {
        matches!(self, Self::Transient)
    }

    /// Whether the error represents a real failure rather than an
    /// informational no-op.
    pub fn is_fatal(self) -> bool {
        !matches!(self, Self::AlreadyMember)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation => write!(f, "VALIDATION"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::State => write!(f, "STATE"),
            Self::Authorization => write!(f, "AUTHORIZATION"),
            Self::AlreadyMember => write!(f, "ALREADY_MEMBER"),
            Self::Transient => write!(f, "TRANSIENT"),
            Self::Authentication => write!(f, "AUTHENTICATION"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout TrackTogether.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create an illegal-state error.
    pub fn state(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::State, message)
    }

    /// Create an authorization error.
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authorization, message)
    }

    /// Create an already-member notice.
    pub fn already_member(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AlreadyMember, message)
    }

    /// Create a transient (retryable) error.
    pub fn transient(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transient, message)
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create a serialization error.
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Serialization, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Shorthand for `self.kind.is_retryable()`.
    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Transient, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_kind_tag() {
        let err = AppError::conflict("User is already invited to this list");
        assert_eq!(
            err.to_string(),
            "CONFLICT: User is already invited to this list"
        );
    }

    #[test]
    fn test_only_transient_is_retryable() {
        assert!(ErrorKind::Transient.is_retryable());
        assert!(!ErrorKind::State.is_retryable());
        assert!(!ErrorKind::Conflict.is_retryable());
        assert!(!ErrorKind::Validation.is_retryable());
    }

    #[test]
    fn test_already_member_is_not_fatal() {
        assert!(!AppError::already_member("x").kind.is_fatal());
        assert!(AppError::not_found("x").kind.is_fatal());
    }

    #[test]
    fn test_io_error_maps_to_transient() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out");
        let err: AppError = io.into();
        assert_eq!(err.kind, ErrorKind::Transient);
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_clone_drops_source() {
        let io = std::io::Error::other("boom");
        let err: AppError = io.into();
        let cloned = err.clone();
        assert_eq!(cloned.kind, err.kind);
        assert!(cloned.source.is_none());
    }
}
