// Copyright (c) 2025 Saledash Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::AppError;
use crate::models::Transaction;
use crate::query::month_window;

/// Labels of the ten fixed price bands, in presentation order.
pub const BAND_LABELS: [&str; 10] = [
    "0-100",
    "101-200",
    "201-300",
    "301-400",
    "401-500",
    "501-600",
    "601-700",
    "701-800",
    "801-900",
    "901-above",
];

/// Inclusive upper bounds of all bands but the last.
const BAND_UPPER: [u32; 9] = [100, 200, 300, 400, 500, 600, 700, 800, 900];

#[derive(Debug, PartialEq, serde::Serialize)]
pub struct Statistics {
    #[serde(rename = "totalSaleAmount")]
    pub total_sale_amount: Decimal,
    #[serde(rename = "totalSoldItems")]
    pub total_sold_items: u64,
    #[serde(rename = "totalNotSoldItems")]
    pub total_not_sold_items: u64,
}

/// Counts per price band. Serializes as an ordered map keyed by
/// [`BAND_LABELS`].
#[derive(Debug, Default, PartialEq)]
pub struct BarChart {
    pub counts: [u64; 10],
}

impl Serialize for BarChart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(BAND_LABELS.len()))?;
        for (label, count) in BAND_LABELS.iter().zip(self.counts) {
            map.serialize_entry(label, &count)?;
        }
        map.end()
    }
}

/// Counts per distinct category, keyed in first-occurrence order.
#[derive(Debug, Default, PartialEq)]
pub struct PieChart {
    pub counts: Vec<(String, u64)>,
}

impl Serialize for PieChart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.counts.len()))?;
        for (category, count) in &self.counts {
            map.serialize_entry(category, count)?;
        }
        map.end()
    }
}

#[derive(Debug, serde::Serialize)]
pub struct CombinedData {
    pub statistics: Statistics,
    #[serde(rename = "barChart")]
    pub bar_chart: BarChart,
    #[serde(rename = "pieChart")]
    pub pie_chart: PieChart,
}

/// Load every record in the month's date window, unpaginated.
pub fn load_month(conn: &Connection, month: i64) -> Result<Vec<Transaction>, AppError> {
    let (start, end) = month_window(month)?;
    let mut stmt = conn.prepare(
        "SELECT id, title, description, price, category, sold, date_of_sale \
         FROM transactions WHERE date_of_sale >= ?1 AND date_of_sale < ?2",
    )?;
    let rows = stmt.query_map(params![start.to_string(), end.to_string()], |r| {
        Transaction::from_row(r)
    })?;
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .map_err(Into::into)
}

pub fn statistics(records: &[Transaction]) -> Statistics {
    let total_sale_amount = records.iter().map(|t| t.price).sum();
    let total_sold_items = records.iter().filter(|t| t.sold).count() as u64;
    let total_not_sold_items = records.len() as u64 - total_sold_items;
    Statistics {
        total_sale_amount,
        total_sold_items,
        total_not_sold_items,
    }
}

pub fn bar_chart(records: &[Transaction]) -> BarChart {
    let mut chart = BarChart::default();
    for t in records {
        chart.counts[band_index(t.price)] += 1;
    }
    chart
}

/// Band assignment: `[0,100]` closed on both ends, then `(lo, hi]` up to
/// `(800,900]`, and `(900, inf)` last. Boundary prices land in the lower band.
fn band_index(price: Decimal) -> usize {
    BAND_UPPER
        .iter()
        .position(|&upper| price <= Decimal::from(upper))
        .unwrap_or(BAND_UPPER.len())
}

pub fn pie_chart(records: &[Transaction]) -> PieChart {
    let mut counts: Vec<(String, u64)> = Vec::new();
    for t in records {
        match counts.iter_mut().find(|(c, _)| *c == t.category) {
            Some((_, n)) => *n += 1,
            None => counts.push((t.category.clone(), 1)),
        }
    }
    PieChart { counts }
}

pub fn statistics_for_month(conn: &Connection, month: i64) -> Result<Statistics, AppError> {
    Ok(statistics(&load_month(conn, month)?))
}

pub fn bar_chart_for_month(conn: &Connection, month: i64) -> Result<BarChart, AppError> {
    Ok(bar_chart(&load_month(conn, month)?))
}

pub fn pie_chart_for_month(conn: &Connection, month: i64) -> Result<PieChart, AppError> {
    Ok(pie_chart(&load_month(conn, month)?))
}

/// All three views over one load of the month's records. A load failure
/// fails the whole operation; there are no partial results.
pub fn combined(conn: &Connection, month: i64) -> Result<CombinedData, AppError> {
    let records = load_month(conn, month)?;
    Ok(CombinedData {
        statistics: statistics(&records),
        bar_chart: bar_chart(&records),
        pie_chart: pie_chart(&records),
    })
}
