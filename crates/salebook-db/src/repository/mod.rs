//! # Repository Module
//!
//! Database repository implementations for Salebook.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Write / Query service                                                 │
//! │       │                                                                 │
//! │       │  db.sales().list_sales(Some(date))                             │
//! │       ▼                                                                 │
//! │  SaleRepository                                                        │
//! │  ├── begin_write() ──► SaleWriter (one transaction)                    │
//! │  │                     ├── insert_sale(date, total)                    │
//! │  │                     ├── insert_items(sale_id, items)                │
//! │  │                     └── commit() / rollback()                       │
//! │  ├── find_sale_by_id(id)                                               │
//! │  ├── find_items_by_sale_id(id)                                         │
//! │  ├── list_sales(date?)                                                 │
//! │  ├── delete_sale(id)                                                   │
//! │  └── update_sale_total(id, total)                                      │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database (sales, sale_items)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`sale::SaleRepository`] - Sale and sale item operations

pub mod sale;
