// Copyright (c) 2025 Saledash Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::Result;
use rusqlite::Connection;

use crate::{config::Config, db, seed};

/// Shared per-process state. The store handle is injected here and passed
/// down explicitly; nothing reads it from ambient globals.
pub struct AppState {
    pub config: Config,
    pub http: reqwest::Client,
    db: Mutex<Connection>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Arc<Self>> {
        let conn = db::open_or_init(config.db_path.as_deref())?;
        Self::with_conn(config, conn)
    }

    /// Build state around an existing connection. Tests use this with
    /// `Connection::open_in_memory()`.
    pub fn with_conn(config: Config, conn: Connection) -> Result<Arc<Self>> {
        Ok(Arc::new(Self {
            http: seed::http_client()?,
            config,
            db: Mutex::new(conn),
        }))
    }

    /// Serialized access to the record store. A poisoned lock is recovered
    /// rather than propagated; the store itself is never left mid-write
    /// thanks to the transactional import.
    pub fn db(&self) -> MutexGuard<'_, Connection> {
        self.db.lock().unwrap_or_else(|e| e.into_inner())
    }
}
