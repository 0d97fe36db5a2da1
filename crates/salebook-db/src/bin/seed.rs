//! # Seed Data Generator
//!
//! Populates the database with daily sales for development.
//!
//! ## Usage
//! ```bash
//! # 30 days of sales ending today (default)
//! cargo run -p salebook-db --bin seed
//!
//! # Custom range and density
//! cargo run -p salebook-db --bin seed -- --days 90 --per-day 12
//!
//! # Specify database path
//! cargo run -p salebook-db --bin seed -- --db ./data/salebook.db
//! ```
//!
//! ## Generated Sales
//! Each day gets `--per-day` sales (± a few), each with 1-4 lines drawn
//! from a fixed list of phone and accessory models. Every sale is written
//! through a `SaleWriter` so it goes through the same transaction path
//! as real sales.

use chrono::{Duration, NaiveDate, Utc};
use serde::Serialize;
use std::env;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use salebook_core::{Money, NewSaleItem};
use salebook_db::{Database, DbConfig, DbResult};

/// (model name, unit price in cents)
const MODELS: &[(&str, i64)] = &[
    ("iPhone 15 Pro", 99900),
    ("iPhone 15", 79900),
    ("iPhone 14", 69900),
    ("Galaxy S24 Ultra", 129999),
    ("Galaxy S24", 79999),
    ("Galaxy A54", 44999),
    ("Pixel 8 Pro", 99900),
    ("Pixel 8", 69900),
    ("OnePlus 12", 79999),
    ("Xiaomi 14", 74999),
    ("AirPods Pro", 24900),
    ("Galaxy Buds2 Pro", 22999),
    ("USB-C Cable 1m", 1999),
    ("20W Charger", 1900),
    ("MagSafe Charger", 3900),
    ("Silicone Case", 4900),
    ("Tempered Glass Protector", 1299),
    ("Power Bank 10000mAh", 3499),
];

#[derive(Debug, Serialize)]
struct SeedReport {
    database: String,
    first_day: NaiveDate,
    last_day: NaiveDate,
    sales: usize,
    items: usize,
    total_amount: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    let mut days: i64 = 30;
    let mut per_day: usize = 8;
    let mut db_path = String::from("./salebook_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--days" | "-n" => {
                if i + 1 < args.len() {
                    days = args[i + 1].parse().unwrap_or(30);
                    i += 1;
                }
            }
            "--per-day" | "-p" => {
                if i + 1 < args.len() {
                    per_day = args[i + 1].parse().unwrap_or(8);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Salebook Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -n, --days <N>       Number of days ending today (default: 30)");
                println!("  -p, --per-day <N>    Average sales per day (default: 8)");
                println!("  -d, --db <PATH>      Database file path (default: ./salebook_dev.db)");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            other => warn!(arg = %other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    let days = days.max(1);
    let db = Database::new(DbConfig::new(&db_path)).await?;

    let existing = db.sales().count_sales().await?;
    if existing > 0 {
        warn!(
            existing = existing,
            "Database already has sales, skipping seed (delete the file to regenerate)"
        );
        return Ok(());
    }

    let last_day = Utc::now().date_naive();
    let first_day = last_day - Duration::days(days - 1);
    let start = std::time::Instant::now();

    let mut sales = 0;
    let mut items = 0;
    let mut total = Money::zero();

    for offset in 0..days {
        let day = first_day + Duration::days(offset);
        let count = sales_for_day(offset as usize, per_day);

        for n in 0..count {
            let lines = generate_lines(offset as usize * 31 + n);
            let (sale_total, line_count) = insert_sale(&db, day, &lines).await?;
            sales += 1;
            items += line_count;
            total += sale_total;
        }

        info!(day = %day, sales = count, "Seeded day");
    }

    info!(sales = sales, items = items, elapsed = ?start.elapsed(), "Seed complete");

    let report = SeedReport {
        database: db_path,
        first_day,
        last_day,
        sales,
        items,
        total_amount: total.to_string(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    db.close().await;
    Ok(())
}

/// Writes one sale and its lines in a single transaction.
async fn insert_sale(
    db: &Database,
    day: NaiveDate,
    lines: &[NewSaleItem],
) -> DbResult<(Money, usize)> {
    let total: Money = lines.iter().map(NewSaleItem::total).sum();

    let mut writer = db.sales().begin_write().await?;
    let sale_id = writer.insert_sale(day, total).await?;
    let inserted = writer.insert_items(&sale_id, lines).await?;
    writer.commit().await?;

    Ok((total, inserted.len()))
}

/// Varies the number of sales per day around the requested average.
fn sales_for_day(day_index: usize, per_day: usize) -> usize {
    let swing = (day_index * 7) % 5; // 0..=4
    (per_day + swing).saturating_sub(2).max(1)
}

/// Picks 1-4 lines deterministically from the model list.
fn generate_lines(seed: usize) -> Vec<NewSaleItem> {
    let count = 1 + seed % 4;
    (0..count)
        .map(|n| {
            let (name, price_cents) = MODELS[(seed * 13 + n * 7) % MODELS.len()];
            let quantity = 1 + ((seed + n) % 3) as i64;
            NewSaleItem::priced(name, quantity, Money::from_cents(price_cents))
        })
        .collect()
}
