//! # Domain Types
//!
//! Core domain types used throughout Salebook.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Read side (persisted)                  Write side (caller input)       │
//! │  ┌─────────────────────────┐            ┌─────────────────────────┐     │
//! │  │ Sale                    │            │ NewSale                 │     │
//! │  │  header: SaleHeader ────┼── id       │  sale_date?             │     │
//! │  │    sale_date            │            │  total_amount_cents?    │     │
//! │  │    total_amount_cents   │            │  items: [NewSaleItem]   │     │
//! │  │  items: [SaleItem] ─────┼── sale_id  └───────────┬─────────────┘     │
//! │  └─────────────────────────┘                        │ validation        │
//! │                                                     ▼                   │
//! │                                         ┌─────────────────────────┐     │
//! │                                         │ ValidatedSale           │     │
//! │                                         │  (ready to persist)     │     │
//! │                                         └─────────────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A [`Sale`] is always the header with its items attached. The bare
//! [`SaleHeader`] only leaves the database layer to be joined with items.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Sale Header
// =============================================================================

/// The `sales` row: one sale's date and total, without its items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct SaleHeader {
    /// Unique identifier (UUID v4), never reused.
    pub id: String,

    /// Calendar day the sale belongs to.
    #[ts(as = "String")]
    pub sale_date: NaiveDate,

    /// Sale total in cents; equals the sum of item totals at commit time.
    pub total_amount_cents: i64,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// Last time the total was overwritten.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl SaleHeader {
    /// Returns the sale total as Money.
    #[inline]
    pub fn total_amount(&self) -> Money {
        Money::from_cents(self.total_amount_cents)
    }
}

// =============================================================================
// Sale Item
// =============================================================================

/// A line item in a sale.
///
/// Items are owned by exactly one sale and are never updated after
/// creation; deleting the sale deletes its items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct SaleItem {
    pub id: String,
    pub sale_id: String,
    /// 1-based position within the sale.
    pub line_no: i64,
    /// Optional catalog product. Ad-hoc lines only carry a model name.
    pub product_id: Option<String>,
    pub model_name: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    /// Line total as committed. Stored and trusted thereafter.
    pub total_cents: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Sale (aggregate)
// =============================================================================

/// A sale with its items attached. This is the only shape callers see.
///
/// ## Serialization
/// The header fields are flattened, so the JSON matches the dashboard's
/// `{ id, sale_date, total_amount_cents, ..., items: [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Sale {
    #[serde(flatten)]
    pub header: SaleHeader,
    pub items: Vec<SaleItem>,
}

impl Sale {
    /// Joins a header with the items read for it.
    pub fn from_parts(header: SaleHeader, items: Vec<SaleItem>) -> Self {
        Sale { header, items }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.header.id
    }

    #[inline]
    pub fn sale_date(&self) -> NaiveDate {
        self.header.sale_date
    }

    #[inline]
    pub fn total_amount(&self) -> Money {
        self.header.total_amount()
    }

    /// Total quantity across all lines ("items sold"), `None` on overflow.
    pub fn items_sold(&self) -> Option<i64> {
        self.items
            .iter()
            .try_fold(0i64, |acc, item| acc.checked_add(item.quantity))
    }
}

// =============================================================================
// Write-side Input
// =============================================================================

/// One line of a sale as submitted by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewSaleItem {
    #[serde(default)]
    pub product_id: Option<String>,
    pub model_name: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    /// Client-computed line total.
    pub total_cents: i64,
}

impl NewSaleItem {
    /// Builds an ad-hoc line whose total is `quantity × unit_price`.
    pub fn priced(model_name: impl Into<String>, quantity: i64, unit_price: Money) -> Self {
        NewSaleItem {
            product_id: None,
            model_name: model_name.into(),
            quantity,
            unit_price_cents: unit_price.cents(),
            total_cents: unit_price.multiply_quantity(quantity).cents(),
        }
    }

    /// Links the line to a catalog product.
    pub fn with_product(mut self, product_id: impl Into<String>) -> Self {
        self.product_id = Some(product_id.into());
        self
    }

    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

/// A sale as submitted by a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewSale {
    /// Defaults to today when omitted.
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub sale_date: Option<NaiveDate>,

    /// When supplied, must equal the sum of item totals.
    #[serde(default)]
    pub total_amount_cents: Option<i64>,

    pub items: Vec<NewSaleItem>,
}

impl NewSale {
    pub fn new(items: Vec<NewSaleItem>) -> Self {
        NewSale {
            sale_date: None,
            total_amount_cents: None,
            items,
        }
    }

    pub fn on(mut self, sale_date: NaiveDate) -> Self {
        self.sale_date = Some(sale_date);
        self
    }

    pub fn with_total(mut self, total: Money) -> Self {
        self.total_amount_cents = Some(total.cents());
        self
    }
}

/// A sale that passed validation: date resolved, total derived.
///
/// Only [`crate::validation::validate_new_sale`] constructs this, so a
/// value of this type always has at least one item and a total equal to
/// the sum of its item totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSale {
    pub(crate) sale_date: NaiveDate,
    pub(crate) total_amount: Money,
    pub(crate) items: Vec<NewSaleItem>,
}

impl ValidatedSale {
    #[inline]
    pub fn sale_date(&self) -> NaiveDate {
        self.sale_date
    }

    #[inline]
    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    #[inline]
    pub fn items(&self) -> &[NewSaleItem] {
        &self.items
    }
}

// =============================================================================
// Total Policy
// =============================================================================

/// How line totals supplied by callers are treated.
///
/// Callers have always computed `total` themselves, which leaves room for
/// per-line discounts. Whether the server should insist on
/// `quantity × unit_price` is a product decision, so both are available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TotalPolicy {
    /// Line totals are stored as supplied.
    #[default]
    Trusted,
    /// Line totals must equal `quantity × unit_price`.
    Strict,
}

impl TotalPolicy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TotalPolicy::Trusted => "trusted",
            TotalPolicy::Strict => "strict",
        }
    }
}

impl fmt::Display for TotalPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TotalPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trusted" => Ok(TotalPolicy::Trusted),
            "strict" => Ok(TotalPolicy::Strict),
            _ => Err(ValidationError::NotAllowed {
                field: "total_policy".to_string(),
                allowed: vec!["trusted".to_string(), "strict".to_string()],
            }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
