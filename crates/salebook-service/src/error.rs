//! # Service Error Type
//!
//! Unified error type returned by the write and query services.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Salebook                               │
//! │                                                                         │
//! │  Caller (HTTP layer)              Rust services                         │
//! │  ───────────────────              ─────────────                         │
//! │                                                                         │
//! │  POST /sales                                                            │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  create_sale() -> Result<T, ServiceError>                        │  │
//! │  │         │                                                        │  │
//! │  │  Validation Error? ── ValidationError ──────────► 400            │  │
//! │  │         │                                                        │  │
//! │  │  Missing sale?  ───── CoreError::SaleNotFound ──► 404            │  │
//! │  │         │                                                        │  │
//! │  │  Storage failure? ─── DbError::* ───────────────► 500            │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  { "code": "NOT_FOUND", "message": "Sale not found: 8c1f..." }         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Storage details are logged, not returned: callers see a generic
//! message for every persistence failure.

use serde::Serialize;
use std::fmt;

use salebook_core::{CoreError, ValidationError};
use salebook_db::DbError;

use crate::config::ConfigError;

/// Error returned from service operations.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "Sale must have at least one item"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for service results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Caller-supplied data violates a precondition (400)
    ValidationError,

    /// Referenced sale does not exist (404)
    NotFound,

    /// Storage failure (500)
    PersistenceError,

    /// Invalid configuration at startup (500)
    ConfigError,

    /// A result cannot be computed from stored data (500)
    Internal,
}

impl ErrorCode {
    /// HTTP status the caller should map this code to.
    pub const fn status_code(&self) -> u16 {
        match self {
            ErrorCode::ValidationError => 400,
            ErrorCode::NotFound => 404,
            ErrorCode::PersistenceError | ErrorCode::ConfigError | ErrorCode::Internal => 500,
        }
    }
}

impl ServiceError {
    /// Creates a new service error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ServiceError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ServiceError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a persistence error.
    pub fn persistence(message: impl Into<String>) -> Self {
        ServiceError::new(ErrorCode::PersistenceError, message)
    }

    /// HTTP status the caller should map this error to.
    pub const fn status_code(&self) -> u16 {
        self.code.status_code()
    }

    pub fn is_validation(&self) -> bool {
        self.code == ErrorCode::ValidationError
    }

    pub fn is_not_found(&self) -> bool {
        self.code == ErrorCode::NotFound
    }

    pub fn is_persistence(&self) -> bool {
        self.code == ErrorCode::PersistenceError
    }
}

/// Converts database errors to service errors.
impl From<DbError> for ServiceError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ServiceError::not_found(&entity, &id),
            DbError::EmptySale { .. } => ServiceError::validation(ValidationError::EmptySale.to_string()),
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                ServiceError::persistence("Database connection failed")
            }
            DbError::PoolExhausted => ServiceError::persistence("Database pool exhausted"),
            DbError::TransactionFailed(e) => {
                tracing::error!("Transaction failed: {}", e);
                ServiceError::persistence("Database transaction failed")
            }
            other => {
                // Log the actual error but return a generic message
                tracing::error!("Database operation failed: {}", other);
                ServiceError::persistence("Database operation failed")
            }
        }
    }
}

/// Converts core errors to service errors.
impl From<CoreError> for ServiceError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::SaleNotFound(id) => ServiceError::not_found("Sale", &id),
            CoreError::Overflow { what } => {
                tracing::error!("{} overflowed", what);
                ServiceError::new(ErrorCode::Internal, format!("{} is too large to report", what))
            }
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::validation(err.to_string())
    }
}

impl From<ConfigError> for ServiceError {
    fn from(err: ConfigError) -> Self {
        ServiceError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ServiceError {}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
