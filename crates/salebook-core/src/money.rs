//! # Money Module
//!
//! Amounts are whole cents in an `i64`. Unit prices, line totals, sale
//! totals and day totals all use the same representation, so
//! "sale total == Σ line totals" is an exact integer comparison.
//!
//! ```text
//! unit_price × quantity ──► line total ──Σ──► sale total ──Σ──► day total
//!      (checked)                (checked)                 (checked)
//! ```
//!
//! Caller-supplied quantities and totals are unbounded, so every sum or
//! product taken over them goes through the `checked_*` methods.
//!
//! ## Usage
//! ```rust
//! use salebook_core::money::Money;
//!
//! let unit_price = Money::from_cents(99900); // $999.00
//! let line_total = unit_price.multiply_quantity(2);
//! assert_eq!(line_total.cents(), 199800);
//! assert_eq!(line_total.to_string(), "$1998.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use ts_rs::TS;

/// A monetary amount in cents.
///
/// Serializes as a bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Builds an amount from dollars and cents.
    ///
    /// The sign is carried by `major`: `from_major_minor(-5, 50)` is -$5.50.
    ///
    /// ```rust
    /// use salebook_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(999, 0).cents(), 99900);
    /// assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole dollars, truncated toward zero.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// The 0-99 cents remainder, without sign.
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Line total for `qty` units at this price.
    ///
    /// Only for amounts known to be small (fixtures, seed data). Caller
    /// input goes through [`checked_multiply_quantity`](Self::checked_multiply_quantity).
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// `None` if the product does not fit in an `i64`.
    #[inline]
    pub fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        self.0.checked_mul(qty).map(Money)
    }

    /// `None` if the sum does not fit in an `i64`.
    #[inline]
    pub fn checked_add(&self, other: Money) -> Option<Self> {
        self.0.checked_add(other.0).map(Money)
    }
}

/// `$1998.00`, `-$5.50`. Used in logs and the seed report.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parts() {
        let money = Money::from_cents(1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);

        let negative = Money::from_cents(-550);
        assert_eq!(negative.dollars(), -5);
        assert_eq!(negative.cents_part(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(199800).to_string(), "$1998.00");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_line_and_sale_totals() {
        let line = Money::from_cents(99900).multiply_quantity(2);
        let mut sale = line;
        sale += Money::from_cents(3900);
        assert_eq!(sale.cents(), 203700);

        let day: Money = vec![sale, Money::from_cents(22999)].into_iter().sum();
        assert_eq!(day, sale + Money::from_cents(22999));

        let empty: Money = Vec::<Money>::new().into_iter().sum();
        assert!(empty.is_zero());
        assert_eq!(Money::default(), empty);
    }

    #[test]
    fn test_checked_operations() {
        let price = Money::from_cents(99900);
        assert_eq!(price.checked_multiply_quantity(2), Some(Money::from_cents(199800)));
        assert_eq!(Money::from_cents(i64::MAX).checked_multiply_quantity(2), None);
        assert_eq!(Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)), None);
        assert_eq!(
            price.checked_add(Money::from_cents(100)),
            Some(Money::from_cents(100000))
        );
    }
}
