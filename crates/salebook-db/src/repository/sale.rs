//! # Sale Repository
//!
//! Database operations for sales and sale items. This is the only code
//! that writes to the `sales` and `sale_items` tables.
//!
//! ## Sale Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sale Lifecycle                                    │
//! │                                                                         │
//! │  1. CREATE (one transaction)                                           │
//! │     └── begin_write() → SaleWriter                                     │
//! │     └── insert_sale(date, total) → sale_id                             │
//! │     └── insert_items(sale_id, items)                                   │
//! │     └── commit()  ── refuses a sale without items                      │
//! │         (drop / rollback() → nothing persisted)                        │
//! │                                                                         │
//! │  2. READ                                                               │
//! │     └── find_sale_by_id / list_sales → SaleHeader                      │
//! │     └── find_items_by_sale_id → [SaleItem]                             │
//! │                                                                         │
//! │  3. (OPTIONAL) RETOTAL                                                 │
//! │     └── update_sale_total() → overwrites total, items untouched        │
//! │                                                                         │
//! │  4. (OPTIONAL) DELETE                                                  │
//! │     └── delete_sale() → items removed by ON DELETE CASCADE             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool, Transaction};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use salebook_core::{Money, NewSaleItem, SaleHeader, SaleItem};

const SALE_COLUMNS: &str = "id, sale_date, total_amount_cents, created_at, updated_at";

const ITEM_COLUMNS: &str = "id, sale_id, line_no, product_id, model_name, quantity, \
                            unit_price_cents, total_cents, created_at";

/// Rows per multi-row INSERT. Nine binds per row keeps each statement
/// well under SQLite's bound-parameter limit (32766).
const ITEM_INSERT_BATCH: usize = 500;

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Opens a write transaction for creating sales.
    ///
    /// The returned writer holds one pooled connection until it is
    /// committed, rolled back or dropped. Dropping it rolls back.
    pub async fn begin_write(&self) -> DbResult<SaleWriter> {
        let tx = self.pool.begin().await.map_err(DbError::transaction)?;
        Ok(SaleWriter {
            tx,
            created_at: Utc::now(),
            pending: Vec::new(),
        })
    }

    /// Gets a sale header by ID.
    pub async fn find_sale_by_id(&self, id: &str) -> DbResult<Option<SaleHeader>> {
        debug!(id = %id, "Finding sale");

        let sql = format!("SELECT {SALE_COLUMNS} FROM sales WHERE id = ?1");
        let sale = sqlx::query_as::<_, SaleHeader>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(sale)
    }

    /// Gets all items for a sale, in the order they were created.
    ///
    /// Returns an empty vector for unknown or deleted sales.
    pub async fn find_items_by_sale_id(&self, sale_id: &str) -> DbResult<Vec<SaleItem>> {
        let sql = format!(
            "SELECT {ITEM_COLUMNS} FROM sale_items WHERE sale_id = ?1 ORDER BY created_at, line_no"
        );
        let items = sqlx::query_as::<_, SaleItem>(&sql)
            .bind(sale_id)
            .fetch_all(&self.pool)
            .await?;

        debug!(sale_id = %sale_id, count = items.len(), "Loaded sale items");
        Ok(items)
    }

    /// Lists sale headers, most recent `sale_date` first.
    ///
    /// With a date, only sales recorded on exactly that calendar day are
    /// returned. Sales on the same day are ordered newest first.
    pub async fn list_sales(&self, date: Option<NaiveDate>) -> DbResult<Vec<SaleHeader>> {
        let sales = match date {
            Some(date) => {
                let sql = format!(
                    "SELECT {SALE_COLUMNS} FROM sales WHERE sale_date = ?1 \
                     ORDER BY sale_date DESC, created_at DESC, id"
                );
                sqlx::query_as::<_, SaleHeader>(&sql)
                    .bind(date)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql = format!(
                    "SELECT {SALE_COLUMNS} FROM sales ORDER BY sale_date DESC, created_at DESC, id"
                );
                sqlx::query_as::<_, SaleHeader>(&sql)
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        debug!(date = ?date, count = sales.len(), "Listed sales");
        Ok(sales)
    }

    /// Deletes a sale. Its items go with it (ON DELETE CASCADE).
    ///
    /// ## Returns
    /// `true` if a sale was removed, `false` if the id was unknown.
    pub async fn delete_sale(&self, id: &str) -> DbResult<bool> {
        debug!(id = %id, "Deleting sale");

        let result = sqlx::query("DELETE FROM sales WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Overwrites a sale's total.
    ///
    /// The new total is not checked against the sale's items.
    ///
    /// ## Returns
    /// `true` if a sale was updated, `false` if the id was unknown.
    pub async fn update_sale_total(&self, id: &str, total: Money) -> DbResult<bool> {
        debug!(id = %id, total = %total, "Updating sale total");

        let result = sqlx::query(
            "UPDATE sales SET total_amount_cents = ?2, updated_at = ?3 WHERE id = ?1",
        )
        .bind(id)
        .bind(total.cents())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts stored sales.
    pub async fn count_sales(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Counts stored sale items across all sales.
    pub async fn count_items(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sale_items")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

// =============================================================================
// Sale Writer
// =============================================================================

/// A write transaction over the sale tables.
///
/// ## Atomicity
/// ```text
/// insert_sale ──► insert_items ──► commit      header + items visible
///      │               │
///      └── error ──────┴──► rollback / drop    nothing visible
/// ```
///
/// `commit` refuses to persist any sale inserted through this writer
/// that has no items.
#[derive(Debug)]
pub struct SaleWriter {
    tx: Transaction<'static, Sqlite>,
    created_at: DateTime<Utc>,
    /// Sales inserted in this transaction and how many items each got.
    pending: Vec<(String, usize)>,
}

impl SaleWriter {
    /// Inserts a sale header and returns its new id.
    pub async fn insert_sale(&mut self, sale_date: NaiveDate, total: Money) -> DbResult<String> {
        let id = Uuid::new_v4().to_string();

        debug!(id = %id, sale_date = %sale_date, total = %total, "Inserting sale");

        sqlx::query(
            r#"
            INSERT INTO sales (id, sale_date, total_amount_cents, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?4)
            "#,
        )
        .bind(&id)
        .bind(sale_date)
        .bind(total.cents())
        .bind(self.created_at)
        .execute(&mut *self.tx)
        .await?;

        self.pending.push((id.clone(), 0));
        Ok(id)
    }

    /// Inserts all line items of a sale in a single statement.
    ///
    /// Line numbers continue after any items already inserted for the
    /// sale in this transaction.
    pub async fn insert_items(
        &mut self,
        sale_id: &str,
        items: &[NewSaleItem],
    ) -> DbResult<Vec<SaleItem>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let already = self
            .pending
            .iter()
            .find(|(id, _)| id == sale_id)
            .map(|(_, count)| *count)
            .unwrap_or(0);

        let rows: Vec<SaleItem> = items
            .iter()
            .enumerate()
            .map(|(i, item)| SaleItem {
                id: Uuid::new_v4().to_string(),
                sale_id: sale_id.to_string(),
                line_no: (already + i + 1) as i64,
                product_id: item.product_id.clone(),
                model_name: item.model_name.clone(),
                quantity: item.quantity,
                unit_price_cents: item.unit_price_cents,
                total_cents: item.total_cents,
                created_at: self.created_at,
            })
            .collect();

        debug!(sale_id = %sale_id, count = rows.len(), "Inserting sale items");

        // Every batch runs on the writer's transaction, so a failing batch
        // still rolls back the batches before it.
        for batch in rows.chunks(ITEM_INSERT_BATCH) {
            let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
                "INSERT INTO sale_items ({ITEM_COLUMNS}) "
            ));
            builder.push_values(batch, |mut b, row| {
                b.push_bind(row.id.clone())
                    .push_bind(row.sale_id.clone())
                    .push_bind(row.line_no)
                    .push_bind(row.product_id.clone())
                    .push_bind(row.model_name.clone())
                    .push_bind(row.quantity)
                    .push_bind(row.unit_price_cents)
                    .push_bind(row.total_cents)
                    .push_bind(row.created_at);
            });
            builder.build().execute(&mut *self.tx).await?;
        }

        match self.pending.iter_mut().find(|(id, _)| id == sale_id) {
            Some((_, count)) => *count += rows.len(),
            None => self.pending.push((sale_id.to_string(), rows.len())),
        }

        Ok(rows)
    }

    /// Commits the transaction.
    ///
    /// Fails with [`DbError::EmptySale`] (and rolls back) if a sale
    /// inserted through this writer has no items.
    pub async fn commit(self) -> DbResult<()> {
        if let Some((sale_id, _)) = self.pending.iter().find(|(_, count)| *count == 0) {
            let sale_id = sale_id.clone();
            warn!(sale_id = %sale_id, "Refusing to commit sale without items");
            self.tx.rollback().await.map_err(DbError::transaction)?;
            return Err(DbError::EmptySale { sale_id });
        }

        self.tx.commit().await.map_err(DbError::transaction)?;
        Ok(())
    }

    /// Rolls back everything written through this writer.
    pub async fn rollback(self) -> DbResult<()> {
        self.tx.rollback().await.map_err(DbError::transaction)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
