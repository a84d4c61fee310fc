// Copyright (c) 2025 Saledash Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use tracing::{info, warn};

/// The remote product-transaction dataset imported on first use.
pub const DEFAULT_SEED_URL: &str =
    "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

pub struct Config {
    pub port: u16,
    /// Overrides the platform data dir when set.
    pub db_path: Option<PathBuf>,
    pub seed_url: String,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("SALEDASH_PORT", "3000"),
            db_path: env::var("SALEDASH_DB").ok().map(PathBuf::from),
            seed_url: try_load("SALEDASH_SEED_URL", DEFAULT_SEED_URL),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}
