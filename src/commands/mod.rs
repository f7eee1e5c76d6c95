// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod bills;
pub mod config;
pub mod fixed;
pub mod goals;
pub mod reports;
pub mod transactions;

use std::path::PathBuf;

use anyhow::{Context as _, Result, anyhow};
use chrono::NaiveDate;

use crate::config::Config;
use crate::engine::{QueryOutcome, query_raw};
use crate::ingest::normalize_all;
use crate::models::{Period, Query, Transaction, TypeFilter};
use crate::store::{FileStore, TransactionStore};
use crate::utils::parse_date;

/// What every command handler needs: the loaded configuration and the
/// global options.
pub struct Context {
    pub config: Config,
    pub data: Option<PathBuf>,
}

impl Context {
    pub fn new(config: Config, data: Option<PathBuf>) -> Self {
        Self { config, data }
    }

    pub fn store(&self) -> Result<FileStore> {
        let path = self
            .data
            .clone()
            .or_else(|| self.config.transactions_path.clone())
            .ok_or_else(|| {
                anyhow!("No transactions file: pass --data or set transactions_path in the config")
            })?;
        FileStore::open(path)
    }

    /// Canonical transactions from the store. Skipped records are logged at
    /// `warn` during ingestion.
    pub fn load_transactions(&self) -> Result<Vec<Transaction>> {
        let raw = self.store()?.transactions()?;
        Ok(normalize_all(&raw).transactions)
    }

    /// Load, ingest and query.
    pub fn run_query(&self, query: Query, today: NaiveDate) -> Result<QueryOutcome> {
        let raw = self.store()?.transactions()?;
        Ok(query_raw(&raw, query, today)?)
    }

    pub fn period(&self, sub: &clap::ArgMatches) -> Result<Period> {
        match sub.try_get_one::<String>("period").ok().flatten() {
            Some(p) => Ok(p.parse()?),
            None => Ok(self.config.default_period),
        }
    }

    pub fn filter(&self, sub: &clap::ArgMatches) -> Result<TypeFilter> {
        match sub.try_get_one::<String>("filter").ok().flatten() {
            Some(f) => Ok(f.parse()?),
            None => Ok(self.config.default_filter),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.config.currency_symbol
    }
}

/// `--today` if given, else the local date.
pub fn today(sub: &clap::ArgMatches) -> Result<NaiveDate> {
    match sub.try_get_one::<String>("today").ok().flatten() {
        Some(s) => parse_date(s).context("--today"),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

/// A JSON file from `--file` or the configured path.
pub(crate) fn json_source(
    sub: &clap::ArgMatches,
    configured: Option<&PathBuf>,
    what: &str,
) -> Result<PathBuf> {
    sub.try_get_one::<String>("file")
        .ok()
        .flatten()
        .map(PathBuf::from)
        .or_else(|| configured.cloned())
        .ok_or_else(|| anyhow!("No {} file: pass --file or set it in the config", what))
}
