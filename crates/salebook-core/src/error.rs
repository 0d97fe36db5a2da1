//! # Error Types
//!
//! Domain-specific error types for salebook-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  salebook-core errors (this file)                                      │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  salebook-db errors (separate crate)                                   │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  salebook-service errors                                               │
//! │  └── ServiceError     - What callers see (400 / 404 / 500)             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ServiceError → caller   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, item index, amounts)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Sale cannot be found.
    ///
    /// ## When This Occurs
    /// - Sale ID doesn't exist in database
    /// - Sale was deleted between reading its header and its items
    #[error("Sale not found: {0}")]
    SaleNotFound(String),

    /// A total over stored sales does not fit in an `i64`.
    ///
    /// ## When This Occurs
    /// - Several large sales recorded on one day (line totals are not
    ///   bounded under the trusted total policy)
    #[error("{what} exceeds the representable range")]
    Overflow { what: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller-supplied data doesn't meet requirements.
/// They are raised before any persistence call is attempted.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A sale was submitted without line items.
    #[error("Sale must have at least one item")]
    EmptySale,

    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Numeric value is out of range (including arithmetic overflow).
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., a date that is not `YYYY-MM-DD`).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Caller-supplied sale total differs from the sum of its item totals.
    ///
    /// ## User Workflow
    /// ```text
    /// items: [1998.00, 25.00]   total_amount: 2000.00
    ///      │
    ///      ▼
    /// Σ items = 2023.00 ≠ 2000.00
    ///      │
    ///      ▼
    /// TotalMismatch { expected_cents: 202300, supplied_cents: 200000 }
    /// ```
    #[error("Sale total {supplied_cents} does not match sum of item totals {expected_cents}")]
    TotalMismatch {
        expected_cents: i64,
        supplied_cents: i64,
    },

    /// Line total differs from quantity × unit price (strict total policy only).
    #[error("Line total {supplied_cents} does not match quantity × unit price {expected_cents}")]
    LineTotalMismatch {
        expected_cents: i64,
        supplied_cents: i64,
    },

    /// A specific line item failed validation (0-based index).
    #[error("Item {index}: {source}")]
    Item {
        index: usize,
        #[source]
        source: Box<ValidationError>,
    },
}

impl ValidationError {
    /// Wraps an error with the index of the offending line item.
    pub fn at_item(self, index: usize) -> Self {
        ValidationError::Item {
            index,
            source: Box::new(self),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sale_message() {
        assert_eq!(
            ValidationError::EmptySale.to_string(),
            "Sale must have at least one item"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "model_name".to_string(),
        };
        assert_eq!(err.to_string(), "model_name is required");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_item_error_carries_index() {
        let err = ValidationError::MustNotBeNegative {
            field: "unit_price".to_string(),
        }
        .at_item(2);
        assert_eq!(err.to_string(), "Item 2: unit_price must not be negative");
        assert!(matches!(err, ValidationError::Item { index: 2, .. }));
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::EmptySale.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(
            core_err.to_string(),
            "Validation error: Sale must have at least one item"
        );
    }
}
