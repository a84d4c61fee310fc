// Copyright (c) 2025 Saledash Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("month query parameter is required")]
    MissingMonth,

    #[error("month must be between 1 and 12, got {0}")]
    InvalidMonth(i64),

    #[error("page and perPage must be positive, got page={page} perPage={per_page}")]
    InvalidPagination { page: i64, per_page: i64 },

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("seed fetch failed: {0}")]
    SeedFetch(#[from] reqwest::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::MissingMonth
            | AppError::InvalidMonth(_)
            | AppError::InvalidPagination { .. } => StatusCode::BAD_REQUEST,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::SeedFetch(_) => StatusCode::BAD_GATEWAY,
        };

        if status.is_server_error() {
            error!("request failed: {self}");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
