//! # Validation Module
//!
//! Input validation for sales before they reach the database.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Dashboard (TypeScript)                                       │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Write service (Rust)                                         │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: sale rules, run before any persistence call          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── CHECK constraints (quantity > 0, unit price >= 0)                 │
//! │  └── Foreign key constraints (sale_items.sale_id)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use chrono::NaiveDate;
//! use salebook_core::validation::validate_new_sale;
//! use salebook_core::{Money, NewSale, NewSaleItem, TotalPolicy};
//!
//! let today = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
//! let sale = NewSale::new(vec![NewSaleItem::priced("iPhone 15 Pro", 2, Money::from_cents(99900))]);
//!
//! let validated = validate_new_sale(sale, TotalPolicy::Trusted, today).unwrap();
//! assert_eq!(validated.total_amount().cents(), 199800);
//! assert_eq!(validated.sale_date(), today);
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{NewSale, NewSaleItem, TotalPolicy, ValidatedSale};
use crate::MAX_MODEL_NAME_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a line item's model name.
///
/// ## Rules
/// - Must not be blank
/// - At most [`MAX_MODEL_NAME_LEN`] characters after trimming
pub fn validate_model_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "model_name".to_string(),
        });
    }

    if name.chars().count() > MAX_MODEL_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "model_name".to_string(),
            max: MAX_MODEL_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a quantity value. Must be positive.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Example
/// ```rust
/// use salebook_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(99900).is_ok());
/// assert!(validate_price_cents(0).is_ok());     // Free item
/// assert!(validate_price_cents(-100).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "unit_price".to_string(),
        });
    }

    Ok(())
}

/// Validates a sale or line total in cents.
pub fn validate_total_cents(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates an optional catalog reference. Present means non-blank.
pub fn validate_product_reference(product_id: Option<&str>) -> ValidationResult<()> {
    match product_id {
        Some(id) if id.trim().is_empty() => Err(ValidationError::Required {
            field: "product_id".to_string(),
        }),
        _ => Ok(()),
    }
}

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_sale_date(value: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        ValidationError::InvalidFormat {
            field: "sale_date".to_string(),
            reason: "expected YYYY-MM-DD".to_string(),
        }
    })
}

// =============================================================================
// Sale Validators
// =============================================================================

/// Validates one line item.
///
/// Under [`TotalPolicy::Strict`] the line total must equal
/// `quantity × unit_price`; under [`TotalPolicy::Trusted`] it only has to
/// be non-negative.
pub fn validate_item(item: &NewSaleItem, policy: TotalPolicy) -> ValidationResult<()> {
    validate_model_name(&item.model_name)?;
    validate_product_reference(item.product_id.as_deref())?;
    validate_quantity(item.quantity)?;
    validate_price_cents(item.unit_price_cents)?;
    validate_total_cents("total", item.total_cents)?;

    if policy == TotalPolicy::Strict {
        let expected = Money::from_cents(item.unit_price_cents)
            .checked_multiply_quantity(item.quantity)
            .ok_or_else(|| overflow("total"))?;
        if expected.cents() != item.total_cents {
            return Err(ValidationError::LineTotalMismatch {
                expected_cents: expected.cents(),
                supplied_cents: item.total_cents,
            });
        }
    }

    Ok(())
}

/// Validates a submitted sale and resolves its date and total.
///
/// ## Rules
/// ```text
/// items empty?                      → EmptySale
/// any item invalid?                 → Item { index, source }
/// Σ item totals overflows?          → OutOfRange
/// total_amount supplied and ≠ Σ?    → TotalMismatch
/// sale_date omitted?                → today
/// ```
///
/// Item totals are summed, never recomputed from quantity and price.
pub fn validate_new_sale(
    sale: NewSale,
    policy: TotalPolicy,
    today: NaiveDate,
) -> ValidationResult<ValidatedSale> {
    if sale.items.is_empty() {
        return Err(ValidationError::EmptySale);
    }

    let mut items_total = Money::zero();
    for (index, item) in sale.items.iter().enumerate() {
        validate_item(item, policy).map_err(|e| e.at_item(index))?;
        items_total = items_total
            .checked_add(item.total())
            .ok_or_else(|| overflow("total_amount"))?;
    }

    if let Some(supplied) = sale.total_amount_cents {
        validate_total_cents("total_amount", supplied)?;
        if supplied != items_total.cents() {
            return Err(ValidationError::TotalMismatch {
                expected_cents: items_total.cents(),
                supplied_cents: supplied,
            });
        }
    }

    Ok(ValidatedSale {
        sale_date: sale.sale_date.unwrap_or(today),
        total_amount: items_total,
        items: sale.items,
    })
}

fn overflow(field: &str) -> ValidationError {
    ValidationError::OutOfRange {
        field: field.to_string(),
        min: 0,
        max: i64::MAX,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, d).unwrap()
    }

    fn iphone() -> NewSaleItem {
        NewSaleItem::priced("iPhone 15 Pro", 2, Money::from_cents(99900))
    }

    #[test]
    fn test_validate_model_name() {
        assert!(validate_model_name("iPhone 15 Pro").is_ok());
        assert!(validate_model_name("").is_err());
        assert!(validate_model_name("   ").is_err());
        assert!(validate_model_name(&"A".repeat(MAX_MODEL_NAME_LEN)).is_ok());
        assert!(validate_model_name(&"A".repeat(MAX_MODEL_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_quantity_and_price() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());

        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(-1).is_err());
    }

    #[test]
    fn test_validate_product_reference() {
        assert!(validate_product_reference(None).is_ok());
        assert!(validate_product_reference(Some("prod-1")).is_ok());
        assert!(validate_product_reference(Some(" ")).is_err());
    }

    #[test]
    fn test_parse_sale_date() {
        assert_eq!(parse_sale_date("2026-01-15").unwrap(), date(15));
        assert!(parse_sale_date("15/01/2026").is_err());
        assert!(parse_sale_date("2026-02-30").is_err());
    }

    #[test]
    fn test_empty_sale_rejected() {
        let err = validate_new_sale(NewSale::new(vec![]), TotalPolicy::Trusted, date(15))
            .unwrap_err();
        assert!(matches!(err, ValidationError::EmptySale));
    }

    #[test]
    fn test_defaults_date_and_derives_total() {
        let sale = NewSale::new(vec![
            iphone(),
            NewSaleItem::priced("USB-C Cable", 1, Money::from_cents(2500)),
        ]);
        let validated = validate_new_sale(sale, TotalPolicy::Trusted, date(17)).unwrap();
        assert_eq!(validated.sale_date(), date(17));
        assert_eq!(validated.total_amount().cents(), 202300);
        assert_eq!(validated.items().len(), 2);
    }

    #[test]
    fn test_explicit_date_kept() {
        let sale = NewSale::new(vec![iphone()]).on(date(15));
        let validated = validate_new_sale(sale, TotalPolicy::Trusted, date(17)).unwrap();
        assert_eq!(validated.sale_date(), date(15));
    }

    #[test]
    fn test_supplied_total_must_match_items() {
        let ok = NewSale::new(vec![iphone()]).with_total(Money::from_cents(199800));
        assert!(validate_new_sale(ok, TotalPolicy::Trusted, date(15)).is_ok());

        let bad = NewSale::new(vec![iphone()]).with_total(Money::from_cents(199000));
        let err = validate_new_sale(bad, TotalPolicy::Trusted, date(15)).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::TotalMismatch {
                expected_cents: 199800,
                supplied_cents: 199000
            }
        ));
    }

    #[test]
    fn test_item_errors_report_index() {
        let mut broken = iphone();
        broken.quantity = 0;
        let sale = NewSale::new(vec![iphone(), broken]);
        let err = validate_new_sale(sale, TotalPolicy::Trusted, date(15)).unwrap_err();
        match err {
            ValidationError::Item { index, source } => {
                assert_eq!(index, 1);
                assert!(matches!(*source, ValidationError::MustBePositive { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_trusted_policy_keeps_discounted_total() {
        let mut discounted = iphone();
        discounted.total_cents = 189800;
        let sale = NewSale::new(vec![discounted]);
        let validated = validate_new_sale(sale, TotalPolicy::Trusted, date(15)).unwrap();
        assert_eq!(validated.total_amount().cents(), 189800);
    }

    #[test]
    fn test_strict_policy_rejects_line_mismatch() {
        let mut discounted = iphone();
        discounted.total_cents = 189800;
        let err = validate_new_sale(NewSale::new(vec![discounted]), TotalPolicy::Strict, date(15))
            .unwrap_err();
        match err {
            ValidationError::Item { index: 0, source } => assert!(matches!(
                *source,
                ValidationError::LineTotalMismatch {
                    expected_cents: 199800,
                    supplied_cents: 189800
                }
            )),
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(validate_new_sale(NewSale::new(vec![iphone()]), TotalPolicy::Strict, date(15)).is_ok());
    }

    #[test]
    fn test_negative_line_total_rejected() {
        let mut refund = iphone();
        refund.total_cents = -100;
        let err = validate_new_sale(NewSale::new(vec![refund]), TotalPolicy::Trusted, date(15))
            .unwrap_err();
        assert!(matches!(err, ValidationError::Item { index: 0, .. }));
    }

    #[test]
    fn test_total_overflow_rejected() {
        let mut huge = iphone();
        huge.total_cents = i64::MAX;
        let sale = NewSale::new(vec![huge.clone(), huge]);
        let err = validate_new_sale(sale, TotalPolicy::Trusted, date(15)).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { .. }));
    }
}
