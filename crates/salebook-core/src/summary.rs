//! # Daily Summary
//!
//! The figures shown above the daily-sales table: how many sales were
//! recorded on a day, what they add up to, and how many units went out.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Sale;

/// Totals for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DailySummary {
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub sale_count: usize,
    /// Σ sale totals for the day.
    pub total_amount_cents: i64,
    /// Σ item quantities for the day.
    pub items_sold: i64,
}

impl DailySummary {
    /// Summarizes the sales that belong to `date`. Sales from other days
    /// are ignored, so callers can pass an unfiltered list.
    ///
    /// Fails with [`CoreError::Overflow`] if the day total or the units
    /// sold do not fit in an `i64`.
    pub fn from_sales(date: NaiveDate, sales: &[Sale]) -> CoreResult<Self> {
        let mut sale_count = 0;
        let mut total = Money::zero();
        let mut items_sold: i64 = 0;

        for sale in sales.iter().filter(|sale| sale.sale_date() == date) {
            sale_count += 1;
            total = total
                .checked_add(sale.total_amount())
                .ok_or_else(|| overflow("Day total"))?;
            items_sold = sale
                .items_sold()
                .and_then(|units| items_sold.checked_add(units))
                .ok_or_else(|| overflow("Items sold"))?;
        }

        Ok(DailySummary {
            date,
            sale_count,
            total_amount_cents: total.cents(),
            items_sold,
        })
    }

    #[inline]
    pub fn total_amount(&self) -> Money {
        Money::from_cents(self.total_amount_cents)
    }
}

fn overflow(what: &str) -> CoreError {
    CoreError::Overflow {
        what: what.to_string(),
    }
}
