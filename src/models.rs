// Copyright (c) 2025 Saledash Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::Row;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One product-sale record. Immutable once seeded; the bulk import in
/// `seed` is the only write path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Missing prices in the upstream dataset count as zero.
    #[serde(default)]
    pub price: Decimal,
    pub category: String,
    pub sold: bool,
    #[serde(rename = "dateOfSale")]
    pub date_of_sale: DateTime<Utc>,
}

impl Transaction {
    /// The stored form of `date_of_sale`: RFC 3339 UTC with millisecond
    /// precision and a `Z` suffix, so lexicographic order on the column
    /// equals chronological order.
    pub fn date_text(&self) -> String {
        self.date_of_sale
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let price_text: String = row.get(3)?;
        let price = price_text.parse::<Decimal>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
        })?;
        let date_text: String = row.get(6)?;
        let date_of_sale = DateTime::parse_from_rfc3339(&date_text)
            .map(|d| d.with_timezone(&Utc))
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    6,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?;
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            price,
            category: row.get(4)?,
            sold: row.get(5)?,
            date_of_sale,
        })
    }
}
