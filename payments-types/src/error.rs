//! Error types for the payments records service.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Domain-level errors (malformed or out-of-range input).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid email address: {0:?}")]
    InvalidEmail(String),

    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Invalid currency code {0:?}: expected three letters")]
    InvalidCurrency(String),

    #[error("Amount must be positive, got {0}")]
    NonPositiveAmount(i64),

    #[error("Invalid {kind} number: {reason}")]
    InvalidAccountNumber { kind: &'static str, reason: String },

    #[error("Invalid card security code: expected 3 digits")]
    InvalidCvc,

    #[error("Invalid expiration month {0}: expected 1-12")]
    InvalidExpMonth(u32),

    #[error("Invalid expiration year {0}: must be {min} or later", min = crate::validation::MIN_EXP_YEAR)]
    InvalidExpYear(i32),

    #[error("Invalid limit {0}: expected a positive page size")]
    InvalidLimit(u32),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Corrupt row: {0}")]
    Corrupt(String),
}

/// Machine-readable classification of an [`AppError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed or out-of-range input.
    InvalidArgument,
    /// A referenced entity does not exist or fails an ownership check.
    InvalidReference,
    /// The referenced entity exists but its state forbids the operation.
    InvalidState,
    /// Direct lookup of the requested entity missed.
    NotFound,
    /// The storage collaborator failed.
    Unavailable,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::InvalidReference => "invalid_reference",
            ErrorKind::InvalidState => "invalid_state",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Unavailable => "unavailable",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application-level errors returned by every service operation.
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unavailable: {message}")]
    Unavailable {
        message: String,
        #[source]
        source: RepoError,
    },
}

impl AppError {
    /// Wraps a store failure with a description of what was being attempted.
    pub fn unavailable(message: impl Into<String>, source: RepoError) -> Self {
        AppError::Unavailable {
            message: message.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            AppError::InvalidReference(_) => ErrorKind::InvalidReference,
            AppError::InvalidState(_) => ErrorKind::InvalidState,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::Unavailable { .. } => ErrorKind::Unavailable,
        }
    }

    /// Human-readable message without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            AppError::InvalidArgument(msg)
            | AppError::InvalidReference(msg)
            | AppError::InvalidState(msg)
            | AppError::NotFound(msg) => msg,
            AppError::Unavailable { message, .. } => message,
        }
    }

    /// Reclassifies a miss on a *referenced* entity.
    ///
    /// A direct lookup that misses is `NotFound`; the same miss while
    /// resolving a reference inside a write request is `InvalidReference`.
    pub fn into_reference_error(self) -> Self {
        match self {
            AppError::NotFound(msg) => AppError::InvalidReference(msg),
            other => other,
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError::InvalidArgument(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        AppError::unavailable("Storage unavailable", err)
    }
}
