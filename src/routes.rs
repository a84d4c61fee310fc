// Copyright (c) 2025 Saledash Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    aggregate,
    error::AppError,
    query::{self, TransactionPage},
    seed,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    month: Option<i64>,
    search: Option<String>,
    page: Option<i64>,
    #[serde(rename = "perPage")]
    per_page: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    month: Option<i64>,
}

fn require_month(month: Option<i64>) -> Result<i64, AppError> {
    month.ok_or(AppError::MissingMonth)
}

pub async fn transactions_handler(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ListQuery>,
) -> Result<Json<TransactionPage>, AppError> {
    let month = require_month(q.month)?;
    let search = q.search.unwrap_or_default();
    let page = q.page.unwrap_or(1);
    let per_page = q.per_page.unwrap_or(10);
    let result = query::list_transactions(&state.db(), month, &search, page, per_page)?;
    Ok(Json(result))
}

pub async fn initialize_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    if seed::is_seeded(&state.db())? {
        return Ok(Json(
            json!({ "message": seed::SeedOutcome::AlreadySeeded.message() }),
        ));
    }
    let records = seed::fetch_seed(&state.http, &state.config.seed_url).await?;
    let outcome = seed::import(&mut state.db(), &records)?;
    Ok(Json(json!({ "message": outcome.message() })))
}

pub async fn statistics_handler(
    State(state): State<Arc<AppState>>,
    Query(q): Query<MonthQuery>,
) -> Result<Json<aggregate::Statistics>, AppError> {
    let month = require_month(q.month)?;
    Ok(Json(aggregate::statistics_for_month(&state.db(), month)?))
}

pub async fn bar_chart_handler(
    State(state): State<Arc<AppState>>,
    Query(q): Query<MonthQuery>,
) -> Result<Json<aggregate::BarChart>, AppError> {
    let month = require_month(q.month)?;
    Ok(Json(aggregate::bar_chart_for_month(&state.db(), month)?))
}

pub async fn pie_chart_handler(
    State(state): State<Arc<AppState>>,
    Query(q): Query<MonthQuery>,
) -> Result<Json<aggregate::PieChart>, AppError> {
    let month = require_month(q.month)?;
    Ok(Json(aggregate::pie_chart_for_month(&state.db(), month)?))
}

pub async fn combined_handler(
    State(state): State<Arc<AppState>>,
    Query(q): Query<MonthQuery>,
) -> Result<Json<aggregate::CombinedData>, AppError> {
    let month = require_month(q.month)?;
    Ok(Json(aggregate::combined(&state.db(), month)?))
}
