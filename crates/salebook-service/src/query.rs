//! # Sale Query Service
//!
//! Reads complete sales: headers joined with their items.
//!
//! ## Fan-out
//! ```text
//! list_sales(date?) ──► [h1, h2, h3]
//!                          │   │   │
//!        find_items_by_sale_id (concurrently, one per header)
//!                          │   │   │
//!                          ▼   ▼   ▼
//!                      try_join_all ──► [Sale1, Sale2, Sale3]
//! ```
//!
//! The join completes only once every item read has finished. The
//! first failure fails the whole call.

use chrono::NaiveDate;
use futures::future::try_join_all;
use tracing::{debug, warn};

use salebook_core::validation::parse_sale_date;
use salebook_core::{CoreError, DailySummary, Sale};
use salebook_db::Database;

use crate::error::ServiceResult;

/// Read side of the daily sales book.
#[derive(Debug, Clone)]
pub struct SaleQueryService {
    db: Database,
}

impl SaleQueryService {
    pub fn new(db: Database) -> Self {
        SaleQueryService { db }
    }

    /// Lists complete sales, newest sale date first.
    ///
    /// With a date, only sales recorded on exactly that day are returned.
    pub async fn get_sales(&self, date: Option<NaiveDate>) -> ServiceResult<Vec<Sale>> {
        debug!(date = ?date, "get_sales");

        let repo = self.db.sales();
        let headers = repo.list_sales(date).await?;
        if headers.is_empty() {
            return Ok(Vec::new());
        }

        let item_sets = try_join_all(
            headers
                .iter()
                .map(|header| repo.find_items_by_sale_id(&header.id)),
        )
        .await?;

        let sales: Vec<Sale> = headers
            .into_iter()
            .zip(item_sets)
            .filter_map(|(header, items)| {
                if items.is_empty() {
                    warn!(id = %header.id, "Sale has no items, omitting");
                    None
                } else {
                    Some(Sale::from_parts(header, items))
                }
            })
            .collect();

        debug!(count = sales.len(), "get_sales done");
        Ok(sales)
    }

    /// Same as [`get_sales`](Self::get_sales) with the date given as
    /// `YYYY-MM-DD` text.
    pub async fn get_sales_on(&self, date: Option<&str>) -> ServiceResult<Vec<Sale>> {
        let date = date.map(parse_sale_date).transpose()?;
        self.get_sales(date).await
    }

    /// Gets one complete sale.
    pub async fn get_sale_by_id(&self, id: &str) -> ServiceResult<Sale> {
        debug!(id = %id, "get_sale_by_id");

        let repo = self.db.sales();
        let header = repo
            .find_sale_by_id(id)
            .await?
            .ok_or_else(|| CoreError::SaleNotFound(id.to_string()))?;

        let items = repo.find_items_by_sale_id(id).await?;
        if items.is_empty() {
            // Deleted between the two reads
            return Err(CoreError::SaleNotFound(id.to_string()).into());
        }

        Ok(Sale::from_parts(header, items))
    }

    /// Day total, sale count and units sold for one calendar day.
    pub async fn get_daily_summary(&self, date: NaiveDate) -> ServiceResult<DailySummary> {
        let sales = self.get_sales(Some(date)).await?;
        Ok(DailySummary::from_sales(date, &sales)?)
    }

    /// Whether the store answers queries.
    pub async fn health_check(&self) -> bool {
        self.db.health_check().await
    }
}
