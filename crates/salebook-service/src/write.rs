//! # Sale Write Service
//!
//! Records, deletes and re-totals sales.
//!
//! ## Create Flow
//! ```text
//! NewSale
//!    │
//!    ▼
//! validate_new_sale ── error ──► ValidationError (nothing written)
//!    │
//!    ▼
//! begin_write ─► insert_sale ─► insert_items ─► commit ─► sale id
//!                     │               │
//!                     └──── error ────┴──► rollback ─► PersistenceError
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use salebook_core::validation::validate_new_sale;
use salebook_core::{Money, NewSale, TotalPolicy, ValidatedSale, ValidationError};
use salebook_db::{Database, DbResult, SaleWriter};

use crate::error::ServiceResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSaleResponse {
    pub sale_id: String,
    pub total_amount_cents: i64,
    pub item_count: usize,
}

/// Acknowledgement for writes that return no data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ack {
    pub message: String,
}

impl Ack {
    fn new(message: impl Into<String>) -> Self {
        Ack {
            message: message.into(),
        }
    }
}

/// Write side of the daily sales book.
#[derive(Debug, Clone)]
pub struct SaleWriteService {
    db: Database,
    policy: TotalPolicy,
}

impl SaleWriteService {
    /// Creates a write service that trusts caller line totals.
    pub fn new(db: Database) -> Self {
        Self::with_policy(db, TotalPolicy::default())
    }

    pub fn with_policy(db: Database, policy: TotalPolicy) -> Self {
        SaleWriteService { db, policy }
    }

    pub fn policy(&self) -> TotalPolicy {
        self.policy
    }

    /// Validates and records a sale with all of its items.
    ///
    /// The header and items are written in one transaction: either the
    /// whole sale becomes visible or none of it does.
    pub async fn create_sale(&self, sale: NewSale) -> ServiceResult<CreateSaleResponse> {
        debug!(items = sale.items.len(), policy = %self.policy, "create_sale");

        let validated = validate_new_sale(sale, self.policy, Utc::now().date_naive())?;

        let mut writer = self.db.sales().begin_write().await?;
        let sale_id = match write_sale(&mut writer, &validated).await {
            Ok(id) => id,
            Err(e) => {
                warn!(error = %e, "Sale write failed, rolling back");
                if let Err(rollback_err) = writer.rollback().await {
                    warn!(error = %rollback_err, "Rollback failed");
                }
                return Err(e.into());
            }
        };
        writer.commit().await?;

        info!(
            sale_id = %sale_id,
            sale_date = %validated.sale_date(),
            total = %validated.total_amount(),
            items = validated.items().len(),
            "Sale created"
        );

        Ok(CreateSaleResponse {
            sale_id,
            total_amount_cents: validated.total_amount().cents(),
            item_count: validated.items().len(),
        })
    }

    /// Deletes a sale and, through the cascade, its items.
    ///
    /// Deleting an id that does not exist is acknowledged too.
    pub async fn delete_sale(&self, id: &str) -> ServiceResult<Ack> {
        debug!(id = %id, "delete_sale");

        if self.db.sales().delete_sale(id).await? {
            info!(id = %id, "Sale deleted");
        } else {
            warn!(id = %id, "Delete requested for unknown sale");
        }

        Ok(Ack::new("Sale deleted"))
    }

    /// Overwrites the stored total of a sale.
    ///
    /// The new total is not checked against the sale's items.
    pub async fn update_sale_total(&self, id: &str, total_amount_cents: i64) -> ServiceResult<Ack> {
        debug!(id = %id, total_amount_cents, "update_sale_total");

        if total_amount_cents < 0 {
            return Err(ValidationError::MustNotBeNegative {
                field: "total_amount".to_string(),
            }
            .into());
        }

        let total = Money::from_cents(total_amount_cents);
        if self.db.sales().update_sale_total(id, total).await? {
            info!(id = %id, total = %total, "Sale total updated");
        } else {
            warn!(id = %id, "Total update requested for unknown sale");
        }

        Ok(Ack::new("Sale updated"))
    }
}

async fn write_sale(writer: &mut SaleWriter, sale: &ValidatedSale) -> DbResult<String> {
    let sale_id = writer
        .insert_sale(sale.sale_date(), sale.total_amount())
        .await?;
    writer.insert_items(&sale_id, sale.items()).await?;
    Ok(sale_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use salebook_core::NewSaleItem;
    use salebook_db::DbConfig;

    async fn setup() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn jan(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, day).unwrap()
    }

    fn item(name: &str, quantity: i64, price_cents: i64) -> NewSaleItem {
        NewSaleItem::priced(name, quantity, Money::from_cents(price_cents))
    }

    async fn counts(db: &Database) -> (i64, i64) {
        (
            db.sales().count_sales().await.unwrap(),
            db.sales().count_items().await.unwrap(),
        )
    }

    #[tokio::test]
    async fn test_create_sale_derives_total() {
        let db = setup().await;
        let service = SaleWriteService::new(db.clone());

        let response = service
            .create_sale(
                NewSale::new(vec![item("Pixel 8", 1, 69900), item("USB-C Cable 1m", 2, 1999)])
                    .on(jan(15)),
            )
            .await
            .unwrap();

        assert_eq!(response.total_amount_cents, 69900 + 3998);
        assert_eq!(response.item_count, 2);

        let header = db
            .sales()
            .find_sale_by_id(&response.sale_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(header.sale_date, jan(15));
        assert_eq!(header.total_amount_cents, 73898);
    }

    #[tokio::test]
    async fn test_create_sale_defaults_to_today() {
        let db = setup().await;
        let service = SaleWriteService::new(db.clone());

        let response = service
            .create_sale(NewSale::new(vec![item("iPhone 15", 1, 79900)]))
            .await
            .unwrap();

        let header = db
            .sales()
            .find_sale_by_id(&response.sale_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(header.sale_date, Utc::now().date_naive());
    }

    #[tokio::test]
    async fn test_empty_items_rejected_without_writing() {
        let db = setup().await;
        let service = SaleWriteService::new(db.clone());

        let err = service
            .create_sale(NewSale::new(vec![]).on(jan(15)))
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(err.message, "Sale must have at least one item");
        assert_eq!(err.status_code(), 400);
        assert_eq!(counts(&db).await, (0, 0));
    }

    #[tokio::test]
    async fn test_mismatched_total_rejected() {
        let db = setup().await;
        let service = SaleWriteService::new(db.clone());

        let err = service
            .create_sale(
                NewSale::new(vec![item("Galaxy S24", 1, 79999)])
                    .on(jan(15))
                    .with_total(Money::from_cents(70000)),
            )
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(counts(&db).await, (0, 0));
    }

    #[tokio::test]
    async fn test_item_failure_leaves_nothing() {
        let db = setup().await;
        sqlx::query(
            r#"
            CREATE TRIGGER fail_boom BEFORE INSERT ON sale_items
            WHEN NEW.model_name = 'boom'
            BEGIN
                SELECT RAISE(ABORT, 'forced failure');
            END
            "#,
        )
        .execute(db.pool())
        .await
        .unwrap();

        let service = SaleWriteService::new(db.clone());
        let err = service
            .create_sale(
                NewSale::new(vec![
                    item("AirPods Pro", 1, 24900),
                    item("boom", 1, 100),
                    item("20W Charger", 1, 1900),
                ])
                .on(jan(15)),
            )
            .await
            .unwrap_err();

        assert!(err.is_persistence());
        assert_eq!(err.status_code(), 500);
        assert_eq!(counts(&db).await, (0, 0));

        // The service is still usable after the rollback
        service
            .create_sale(NewSale::new(vec![item("AirPods Pro", 1, 24900)]).on(jan(15)))
            .await
            .unwrap();
        assert_eq!(counts(&db).await, (1, 1));
    }

    #[tokio::test]
    async fn test_strict_policy_checks_line_totals() {
        let db = setup().await;
        let discounted = NewSaleItem {
            product_id: None,
            model_name: "Silicone Case".to_string(),
            quantity: 2,
            unit_price_cents: 4900,
            total_cents: 8000,
        };

        let strict = SaleWriteService::with_policy(db.clone(), TotalPolicy::Strict);
        let err = strict
            .create_sale(NewSale::new(vec![discounted.clone()]).on(jan(15)))
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(counts(&db).await, (0, 0));

        let trusted = SaleWriteService::new(db.clone());
        assert_eq!(trusted.policy(), TotalPolicy::Trusted);
        let response = trusted
            .create_sale(NewSale::new(vec![discounted]).on(jan(15)))
            .await
            .unwrap();
        assert_eq!(response.total_amount_cents, 8000);
    }

    #[tokio::test]
    async fn test_concurrent_creates() {
        let db = setup().await;
        let service = SaleWriteService::new(db.clone());

        let (a, b) = tokio::join!(
            service.create_sale(NewSale::new(vec![item("Pixel 8 Pro", 1, 99900)]).on(jan(15))),
            service.create_sale(
                NewSale::new(vec![item("Xiaomi 14", 1, 74999), item("20W Charger", 1, 1900)])
                    .on(jan(15))
            ),
        );

        assert_ne!(a.unwrap().sale_id, b.unwrap().sale_id);
        assert_eq!(counts(&db).await, (2, 3));
    }

    #[tokio::test]
    async fn test_create_sale_with_thousands_of_items() {
        let db = setup().await;
        let service = SaleWriteService::new(db.clone());
        let items: Vec<NewSaleItem> = (0..4000).map(|_| item("Tempered Glass Protector", 1, 1)).collect();

        let response = service
            .create_sale(NewSale::new(items).on(jan(15)))
            .await
            .unwrap();

        assert_eq!(response.item_count, 4000);
        assert_eq!(response.total_amount_cents, 4000);
        assert_eq!(counts(&db).await, (1, 4000));
    }

    #[tokio::test]
    async fn test_delete_sale_acknowledges_unknown_id() {
        let db = setup().await;
        let service = SaleWriteService::new(db.clone());

        let created = service
            .create_sale(NewSale::new(vec![item("iPhone 14", 1, 69900)]).on(jan(14)))
            .await
            .unwrap();

        let ack = service.delete_sale(&created.sale_id).await.unwrap();
        assert_eq!(ack.message, "Sale deleted");
        assert_eq!(counts(&db).await, (0, 0));

        assert!(service.delete_sale(&created.sale_id).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_sale_total() {
        let db = setup().await;
        let service = SaleWriteService::new(db.clone());

        let created = service
            .create_sale(NewSale::new(vec![item("OnePlus 12", 1, 79999)]).on(jan(16)))
            .await
            .unwrap();

        service
            .update_sale_total(&created.sale_id, 75000)
            .await
            .unwrap();
        let header = db
            .sales()
            .find_sale_by_id(&created.sale_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(header.total_amount_cents, 75000);

        let err = service
            .update_sale_total(&created.sale_id, -1)
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }
}
