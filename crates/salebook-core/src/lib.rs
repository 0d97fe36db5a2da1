//! # salebook-core: Pure Business Logic for Salebook
//!
//! This crate holds the daily-sales domain as pure code with zero I/O
//! dependencies: the sale aggregate types, integer money, the rules a sale
//! must satisfy before it is persisted, and the daily summary math.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Salebook Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Caller (HTTP layer, dashboard)                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          salebook-service (write + query services)              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ salebook-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ validation│  │  summary  │  │   │
//! │  │   │   Sale    │  │   Money   │  │  NewSale  │  │ DailySum. │  │   │
//! │  │   │ SaleItem  │  │  Σ, ×qty  │  │  rules    │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 salebook-db (Sale Aggregate Store)              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Sale, SaleItem, NewSale, TotalPolicy)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Sale validation rules
//! - [`summary`] - Per-day totals
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use salebook_core::validation::validate_new_sale;
//! use salebook_core::{Money, NewSale, NewSaleItem, TotalPolicy};
//!
//! let today = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
//! let sale = NewSale::new(vec![
//!     NewSaleItem::priced("iPhone 15 Pro", 2, Money::from_major_minor(999, 0)),
//! ]);
//!
//! let validated = validate_new_sale(sale, TotalPolicy::default(), today).unwrap();
//! assert_eq!(validated.total_amount().to_string(), "$1998.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod summary;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use summary::DailySummary;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a line item's model name, in characters.
///
/// Matches the width of the `model_name` column the dashboard has always
/// written to.
pub const MAX_MODEL_NAME_LEN: usize = 255;
