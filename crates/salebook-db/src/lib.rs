//! # salebook-db: Sale Aggregate Store
//!
//! This crate owns persistence for sales and their line items.
//! It uses SQLite with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Salebook Data Flow                               │
//! │                                                                         │
//! │  SaleWriteService / SaleQueryService                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    salebook-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repository   │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  (sale.rs)    │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ SaleRepository│    │ 001_daily_   │  │   │
//! │  │   │ Connection    │    │ SaleWriter    │    │   sales.sql  │  │   │
//! │  │   │ Management    │    │               │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database (sales, sale_items)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Sale repository and transactional writer
//!
//! ## Usage
//!
//! ```rust,ignore
//! use salebook_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("salebook.db")).await?;
//!
//! let mut writer = db.sales().begin_write().await?;
//! let sale_id = writer.insert_sale(date, total).await?;
//! writer.insert_items(&sale_id, &items).await?;
//! writer.commit().await?;
//!
//! let today = db.sales().list_sales(Some(date)).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::sale::{SaleRepository, SaleWriter};
