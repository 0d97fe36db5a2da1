//! # salebook-service: Daily Sales Services
//!
//! The operations callers use to record and read daily sales.
//!
//! ## Module Organization
//! ```text
//! salebook_service/
//! ├── lib.rs          ◄─── You are here (wiring & re-exports)
//! ├── config.rs       ◄─── Environment configuration
//! ├── error.rs        ◄─── ServiceError / ErrorCode
//! ├── write.rs        ◄─── create / delete / re-total
//! └── query.rs        ◄─── list / fetch / daily summary
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use salebook_service::{AppConfig, Services};
//! use salebook_core::{NewSale, NewSaleItem, Money};
//!
//! let services = Services::connect(&AppConfig::load()?).await?;
//!
//! let created = services
//!     .writes
//!     .create_sale(NewSale::new(vec![
//!         NewSaleItem::priced("iPhone 15 Pro", 2, Money::from_cents(99900)),
//!     ]))
//!     .await?;
//!
//! let sale = services.queries.get_sale_by_id(&created.sale_id).await?;
//! ```

pub mod config;
pub mod error;
pub mod query;
pub mod write;

pub use config::{AppConfig, ConfigError};
pub use error::{ErrorCode, ServiceError, ServiceResult};
pub use query::SaleQueryService;
pub use write::{Ack, CreateSaleResponse, SaleWriteService};

use tracing::info;

use salebook_db::Database;

/// Both services sharing one database handle.
#[derive(Debug, Clone)]
pub struct Services {
    pub writes: SaleWriteService,
    pub queries: SaleQueryService,
}

impl Services {
    /// Wires services over an existing database.
    pub fn new(db: Database, config: &AppConfig) -> Self {
        Services {
            writes: SaleWriteService::with_policy(db.clone(), config.total_policy),
            queries: SaleQueryService::new(db),
        }
    }

    /// Opens the configured database and wires both services over it.
    pub async fn connect(config: &AppConfig) -> ServiceResult<Self> {
        let db = Database::new(config.db_config()).await?;
        info!(
            path = %config.db_path.display(),
            policy = %config.total_policy,
            "Salebook services ready"
        );
        Ok(Self::new(db, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use salebook_core::{Money, NewSale, NewSaleItem, TotalPolicy};
    use salebook_db::DbConfig;

    async fn services(policy: TotalPolicy) -> Services {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let config = AppConfig {
            total_policy: policy,
            ..AppConfig::default()
        };
        Services::new(db, &config)
    }

    #[tokio::test]
    async fn test_record_and_read_back() {
        let services = services(TotalPolicy::Trusted).await;
        let day = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();

        let created = services
            .writes
            .create_sale(
                NewSale::new(vec![NewSaleItem::priced(
                    "iPhone 15 Pro",
                    2,
                    Money::from_cents(99900),
                )])
                .on(day)
                .with_total(Money::from_cents(199800)),
            )
            .await
            .unwrap();

        let json = serde_json::to_value(&created).unwrap();
        assert_eq!(json["saleId"], created.sale_id.as_str());

        let sale = services
            .queries
            .get_sale_by_id(&created.sale_id)
            .await
            .unwrap();

        assert_eq!(sale.sale_date(), day);
        assert_eq!(sale.total_amount(), Money::from_cents(199800));
        assert_eq!(sale.total_amount().to_string(), "$1998.00");
        assert_eq!(sale.items.len(), 1);

        let line = &sale.items[0];
        assert_eq!(line.model_name, "iPhone 15 Pro");
        assert_eq!(line.quantity, 2);
        assert_eq!(line.unit_price_cents, 99900);
        assert_eq!(line.total_cents, 199800);
        assert_eq!(line.sale_id, created.sale_id);

        let listed = services.queries.get_sales(Some(day)).await.unwrap();
        assert_eq!(listed, vec![sale]);
    }

    #[tokio::test]
    async fn test_policy_flows_from_config() {
        let services = services(TotalPolicy::Strict).await;
        assert_eq!(services.writes.policy(), TotalPolicy::Strict);
    }
}
