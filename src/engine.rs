// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Transaction queries: period window, type filter, ordering and totals.
//!
//! Every function here is pure. The current date is always passed in as
//! `today`; nothing in this module reads the clock.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::error::Error;
use crate::ingest::{normalize_all, IngestIssue};
use crate::models::{
    DateWindow, Period, Query, QueryResult, RawTransaction, Totals, Transaction,
};

/// The inclusive date window a period covers, ending on `today`.
pub fn window(period: Period, today: NaiveDate) -> Result<DateWindow, Error> {
    let start = match period {
        Period::Week => today
            .checked_sub_signed(Duration::days(7))
            .ok_or(Error::DateOutOfRange(today))?,
        Period::Month => today.with_day(1).ok_or(Error::DateOutOfRange(today))?,
        Period::Year => NaiveDate::from_ymd_opt(today.year(), 1, 1)
            .ok_or(Error::DateOutOfRange(today))?,
    };
    Ok(DateWindow { start, end: today })
}

/// Filter, order and total `transactions` for `query`.
///
/// Items are ordered most recent first; transactions on the same date keep
/// their input order. Totals are computed over the returned items, so they
/// follow the type filter (see [`aggregate_unfiltered`] for the other
/// reading).
pub fn query(
    transactions: &[Transaction],
    query: Query,
    today: NaiveDate,
) -> Result<QueryResult, Error> {
    let win = window(query.period, today)?;
    tracing::debug!(
        period = query.period.as_str(),
        filter = query.filter.as_str(),
        start = %win.start,
        end = %win.end,
        "querying transactions"
    );

    let mut items: Vec<Transaction> = transactions
        .iter()
        .filter(|t| query.filter.matches(t.kind))
        .filter(|t| win.contains(t.date))
        .cloned()
        .collect();
    // sort_by is stable
    items.sort_by(|a, b| b.date.cmp(&a.date));

    let totals = aggregate_filtered(&items)?;
    Ok(QueryResult { items, totals })
}

/// Totals over exactly the given transactions.
pub fn aggregate_filtered(items: &[Transaction]) -> Result<Totals, Error> {
    let mut totals = Totals::default();
    for t in items {
        totals.add(t.kind, t.amount)?;
    }
    Ok(totals)
}

/// Totals over the period window regardless of any type filter.
pub fn aggregate_unfiltered(
    transactions: &[Transaction],
    period: Period,
    today: NaiveDate,
) -> Result<Totals, Error> {
    let win = window(period, today)?;
    let mut totals = Totals::default();
    for t in transactions.iter().filter(|t| win.contains(t.date)) {
        totals.add(t.kind, t.amount)?;
    }
    Ok(totals)
}

/// A query over raw records: the result plus every record-level issue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryOutcome {
    pub result: QueryResult,
    pub issues: Vec<IngestIssue>,
}

/// Ingest `raw` and run [`query`] over the records that survive.
pub fn query_raw(
    raw: &[RawTransaction],
    q: Query,
    today: NaiveDate,
) -> Result<QueryOutcome, Error> {
    let ingested = normalize_all(raw);
    let result = query(&ingested.transactions, q, today)?;
    Ok(QueryOutcome {
        result,
        issues: ingested.issues,
    })
}
