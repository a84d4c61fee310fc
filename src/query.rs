// Copyright (c) 2025 Saledash Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::{Connection, ToSql};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use crate::error::AppError;
use crate::models::Transaction;

/// All month windows are resolved against this year, matching the seeded
/// dataset's convention.
pub const REFERENCE_YEAR: i32 = 2022;

/// Hard cap on `perPage` to bound response size.
pub const MAX_PER_PAGE: i64 = 1000;

#[derive(Debug, Serialize)]
pub struct TransactionPage {
    pub transactions: Vec<Transaction>,
    pub total: i64,
    pub page: i64,
    #[serde(rename = "perPage")]
    pub per_page: i64,
}

/// Resolve `month` to `[start, end)` where `start` is the first day of the
/// month in [`REFERENCE_YEAR`] and `end` is the first day of the next month,
/// so the window covers the whole last calendar day. Months outside 1..=12
/// are rejected.
pub fn month_window(month: i64) -> Result<(NaiveDate, NaiveDate), AppError> {
    if !(1..=12).contains(&month) {
        return Err(AppError::InvalidMonth(month));
    }
    let m = month as u32;
    let start =
        NaiveDate::from_ymd_opt(REFERENCE_YEAR, m, 1).ok_or(AppError::InvalidMonth(month))?;
    let end = if m == 12 {
        NaiveDate::from_ymd_opt(REFERENCE_YEAR + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(REFERENCE_YEAR, m + 1, 1)
    }
    .ok_or(AppError::InvalidMonth(month))?;
    Ok((start, end))
}

struct Filter {
    where_sql: String,
    params: Vec<Box<dyn ToSql>>,
}

/// Date-window filter, optionally narrowed by a search term: ASCII
/// case-insensitive substring match on title, description, or category, plus
/// an exact price match when the term parses as a number.
fn month_filter(month: i64, search: &str) -> Result<Filter, AppError> {
    let (start, end) = month_window(month)?;
    let mut where_sql = String::from("WHERE date_of_sale >= ?1 AND date_of_sale < ?2");
    let mut params: Vec<Box<dyn ToSql>> =
        vec![Box::new(start.to_string()), Box::new(end.to_string())];

    let search = search.trim();
    if !search.is_empty() {
        params.push(Box::new(like_pattern(search)));
        let idx = params.len();
        let mut clause = format!(
            " AND (title LIKE ?{idx} ESCAPE '\\' \
             OR description LIKE ?{idx} ESCAPE '\\' \
             OR category LIKE ?{idx} ESCAPE '\\'"
        );
        if let Some(price) = search.parse::<Decimal>().ok().and_then(|d| d.to_f64()) {
            params.push(Box::new(price));
            clause.push_str(&format!(" OR CAST(price AS REAL) = ?{}", params.len()));
        }
        clause.push(')');
        where_sql.push_str(&clause);
    }

    Ok(Filter { where_sql, params })
}

fn like_pattern(search: &str) -> String {
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// Return one page of the month's records, ascending by date of sale with
/// `id` as tiebreak so pagination is deterministic, plus the total match
/// count before pagination.
pub fn list_transactions(
    conn: &Connection,
    month: i64,
    search: &str,
    page: i64,
    per_page: i64,
) -> Result<TransactionPage, AppError> {
    if page < 1 || per_page < 1 {
        return Err(AppError::InvalidPagination { page, per_page });
    }
    let per_page = per_page.min(MAX_PER_PAGE);

    let filter = month_filter(month, search)?;

    let total: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM transactions {}", filter.where_sql),
        rusqlite::params_from_iter(filter.params.iter().map(|p| p.as_ref())),
        |r| r.get(0),
    )?;

    let sql = format!(
        "SELECT id, title, description, price, category, sold, date_of_sale \
         FROM transactions {} \
         ORDER BY date_of_sale ASC, id ASC LIMIT ?{} OFFSET ?{}",
        filter.where_sql,
        filter.params.len() + 1,
        filter.params.len() + 2,
    );
    let mut params = filter.params;
    params.push(Box::new(per_page));
    params.push(Box::new((page - 1) * per_page));

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        rusqlite::params_from_iter(params.iter().map(|p| p.as_ref())),
        |r| Transaction::from_row(r),
    )?;
    let transactions = rows.collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(TransactionPage {
        transactions,
        total,
        page,
        per_page,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_covers_whole_month() {
        let cases = [
            (1, "2022-01-01", "2022-02-01"),
            (2, "2022-02-01", "2022-03-01"),
            (4, "2022-04-01", "2022-05-01"),
            (12, "2022-12-01", "2023-01-01"),
        ];
        for (month, start, end) in cases {
            let (s, e) = month_window(month).unwrap();
            assert_eq!(s.to_string(), start);
            assert_eq!(e.to_string(), end);
        }
    }

    #[test]
    fn out_of_range_months_are_rejected() {
        for month in [0, 13, -1, 100] {
            assert!(matches!(
                month_window(month),
                Err(AppError::InvalidMonth(m)) if m == month
            ));
        }
    }

    #[test]
    fn like_pattern_escapes_sql_wildcards() {
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
