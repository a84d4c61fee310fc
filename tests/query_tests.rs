// Copyright (c) 2025 Saledash Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use rust_decimal::Decimal;
use saledash::{db, error::AppError, models::Transaction, query, seed};

fn record(
    id: i64,
    title: &str,
    description: &str,
    price: &str,
    category: &str,
    sold: bool,
    date: &str,
) -> Transaction {
    Transaction {
        id,
        title: title.into(),
        description: description.into(),
        price: price.parse::<Decimal>().unwrap(),
        category: category.into(),
        sold,
        date_of_sale: DateTime::parse_from_rfc3339(date)
            .unwrap()
            .with_timezone(&Utc),
    }
}

fn catalog() -> Vec<Transaction> {
    vec![
        record(
            1,
            "Mens Cotton Jacket",
            "warm jacket for hiking",
            "55.99",
            "men's clothing",
            true,
            "2022-03-01T00:00:00.000Z",
        ),
        record(
            2,
            "Wireless Mouse",
            "with usb receiver",
            "100.00",
            "electronics",
            true,
            "2022-03-05T09:30:00.000Z",
        ),
        record(
            3,
            "Leather Wallet",
            "slim bifold",
            "100.01",
            "accessories",
            false,
            "2022-03-10T14:00:00.000Z",
        ),
        record(
            4,
            "Gaming Laptop",
            "rtx graphics",
            "900.00",
            "electronics",
            true,
            "2022-03-15T18:45:00.000Z",
        ),
        record(
            5,
            "OLED TV",
            "55 inch panel",
            "900.01",
            "electronics",
            false,
            "2022-03-20T11:15:00.000Z",
        ),
        record(
            6,
            "Silver Ring",
            "sterling silver",
            "320.50",
            "jewelery",
            true,
            "2022-03-31T23:59:59.999Z",
        ),
        record(
            7,
            "Winter Scarf",
            "wool blend",
            "10.00",
            "misc",
            false,
            "2022-02-28T12:00:00.000Z",
        ),
        record(
            8,
            "Rain Umbrella",
            "compact fold",
            "20.00",
            "misc",
            true,
            "2022-04-01T00:00:00.000Z",
        ),
        record(
            9,
            "Old March Stock",
            "from last year",
            "30.00",
            "misc",
            false,
            "2021-03-15T08:00:00.000Z",
        ),
    ]
}

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    seed::import(&mut conn, &catalog()).unwrap();
    conn
}

fn ids(page: &query::TransactionPage) -> Vec<i64> {
    page.transactions.iter().map(|t| t.id).collect()
}

#[test]
fn month_window_covers_first_through_last_day() {
    let conn = setup();
    let page = query::list_transactions(&conn, 3, "", 1, 100).unwrap();
    assert_eq!(page.total, 6);
    assert_eq!(ids(&page), vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn adjacent_months_are_excluded() {
    let conn = setup();
    let feb = query::list_transactions(&conn, 2, "", 1, 100).unwrap();
    assert_eq!(ids(&feb), vec![7]);
    let apr = query::list_transactions(&conn, 4, "", 1, 100).unwrap();
    assert_eq!(ids(&apr), vec![8]);
}

#[test]
fn other_years_are_outside_the_reference_window() {
    let conn = setup();
    let march = query::list_transactions(&conn, 3, "", 1, 100).unwrap();
    assert!(!ids(&march).contains(&9));
}

#[test]
fn empty_search_matches_no_search() {
    let conn = setup();
    let plain = query::list_transactions(&conn, 3, "", 1, 10).unwrap();
    let blank = query::list_transactions(&conn, 3, "   ", 1, 10).unwrap();
    assert_eq!(plain.total, blank.total);
    assert_eq!(ids(&plain), ids(&blank));
}

#[test]
fn search_is_case_insensitive_across_text_fields() {
    let conn = setup();
    // title
    let page = query::list_transactions(&conn, 3, "LAPTOP", 1, 10).unwrap();
    assert_eq!(ids(&page), vec![4]);
    // description
    let page = query::list_transactions(&conn, 3, "usb", 1, 10).unwrap();
    assert_eq!(ids(&page), vec![2]);
    // category
    let page = query::list_transactions(&conn, 3, "JEWEL", 1, 10).unwrap();
    assert_eq!(ids(&page), vec![6]);
}

#[test]
fn numeric_search_matches_exact_price() {
    let conn = setup();
    // no text field contains "100.01"; only the price does
    let page = query::list_transactions(&conn, 3, "100.01", 1, 10).unwrap();
    assert_eq!(ids(&page), vec![3]);
    let page = query::list_transactions(&conn, 3, "100", 1, 10).unwrap();
    assert_eq!(ids(&page), vec![2]);
}

#[test]
fn non_matching_search_returns_empty_page() {
    let conn = setup();
    let page = query::list_transactions(&conn, 3, "no such thing", 1, 10).unwrap();
    assert_eq!(page.total, 0);
    assert!(page.transactions.is_empty());
}

#[test]
fn pagination_reconstructs_the_full_ordering() {
    let conn = setup();
    let mut seen = Vec::new();
    for page_no in 1..=3 {
        let page = query::list_transactions(&conn, 3, "", page_no, 2).unwrap();
        assert_eq!(page.total, 6);
        assert_eq!(page.page, page_no);
        assert_eq!(page.per_page, 2);
        assert_eq!(page.transactions.len(), 2);
        seen.extend(ids(&page));
    }
    assert_eq!(seen, vec![1, 2, 3, 4, 5, 6]);

    let past_end = query::list_transactions(&conn, 3, "", 4, 2).unwrap();
    assert!(past_end.transactions.is_empty());
    assert_eq!(past_end.total, 6);
}

#[test]
fn pages_are_disjoint() {
    let conn = setup();
    let first = query::list_transactions(&conn, 3, "", 1, 3).unwrap();
    let second = query::list_transactions(&conn, 3, "", 2, 3).unwrap();
    let overlap = ids(&first)
        .into_iter()
        .filter(|id| ids(&second).contains(id))
        .count();
    assert_eq!(overlap, 0);
    assert_eq!(first.transactions.len() + second.transactions.len(), 6);
}

#[test]
fn out_of_range_month_is_rejected() {
    let conn = setup();
    for month in [0, 13] {
        let err = query::list_transactions(&conn, month, "", 1, 10);
        assert!(matches!(err, Err(AppError::InvalidMonth(m)) if m == month));
    }
}

#[test]
fn bad_pagination_is_rejected() {
    let conn = setup();
    assert!(matches!(
        query::list_transactions(&conn, 3, "", 0, 10),
        Err(AppError::InvalidPagination { .. })
    ));
    assert!(matches!(
        query::list_transactions(&conn, 3, "", 1, 0),
        Err(AppError::InvalidPagination { .. })
    ));
    assert!(matches!(
        query::list_transactions(&conn, 3, "", -2, -5),
        Err(AppError::InvalidPagination { .. })
    ));
}

#[test]
fn per_page_is_capped() {
    let conn = setup();
    let page = query::list_transactions(&conn, 3, "", 1, 1_000_000).unwrap();
    assert_eq!(page.per_page, query::MAX_PER_PAGE);
}
