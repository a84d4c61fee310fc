// Copyright (c) 2025 Saledash Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::time::Duration;

use rusqlite::{Connection, params};
use tracing::info;

use crate::error::AppError;
use crate::models::Transaction;

const UA: &str = concat!(
    "saledash/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/saledash/saledash)"
);

pub fn http_client() -> Result<reqwest::Client, AppError> {
    let c = reqwest::Client::builder()
        .timeout(Duration::from_secs(15))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

#[derive(Debug, PartialEq, Eq)]
pub enum SeedOutcome {
    Seeded(usize),
    AlreadySeeded,
}

impl SeedOutcome {
    pub fn message(&self) -> String {
        match self {
            SeedOutcome::Seeded(n) => format!("Database initialized with {n} records"),
            SeedOutcome::AlreadySeeded => "Database already initialized".to_string(),
        }
    }
}

pub fn is_seeded(conn: &Connection) -> Result<bool, AppError> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))?;
    Ok(count > 0)
}

pub async fn fetch_seed(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<Transaction>, AppError> {
    info!("Fetching seed dataset from {url}");
    let records = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json::<Vec<Transaction>>()
        .await?;
    Ok(records)
}

/// Bulk-insert the seed records if the store is empty. The emptiness check
/// and the inserts share one transaction, so a racing second call cannot
/// double-insert and a failed import leaves no partial state.
pub fn import(conn: &mut Connection, records: &[Transaction]) -> Result<SeedOutcome, AppError> {
    let tx = conn.transaction()?;

    let existing: i64 = tx.query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))?;
    if existing > 0 {
        return Ok(SeedOutcome::AlreadySeeded);
    }

    {
        let mut stmt = tx.prepare(
            "INSERT INTO transactions(id, title, description, price, category, sold, date_of_sale) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )?;
        for t in records {
            stmt.execute(params![
                t.id,
                t.title,
                t.description,
                t.price.to_string(),
                t.category,
                t.sold,
                t.date_text(),
            ])?;
        }
    }

    tx.commit()?;
    info!("Imported {} seed records", records.len());
    Ok(SeedOutcome::Seeded(records.len()))
}
