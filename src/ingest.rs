// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Conversion from raw store records to canonical [`Transaction`]s.
//!
//! Raw records come with either a signed amount, an explicit type, or both.
//! Canonical transactions always carry an explicit type and a non-negative
//! amount. Records that cannot be converted are reported as
//! [`IngestIssue`]s instead of being dropped silently.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{RawTransaction, Transaction, TransactionType};

/// A data-quality problem found in a single raw record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum IngestIssue {
    #[error("transaction {id}: missing date")]
    MissingDate { id: String },

    #[error("transaction {id}: invalid date '{value}', expected YYYY-MM-DD")]
    InvalidDate { id: String, value: String },

    #[error("transaction {id}: invalid amount '{value}'")]
    InvalidAmount { id: String, value: String },

    #[error("transaction {id}: invalid type '{value}', expected income or expense")]
    InvalidType { id: String, value: String },

    #[error("transaction {id}: empty description")]
    EmptyDescription { id: String },

    /// The sign of the amount contradicts the explicit type. The record is
    /// kept: the type decides the bucket and the magnitude is used.
    #[error("transaction {id}: amount {amount} disagrees with type {kind}; using type")]
    InconsistentType {
        id: String,
        amount: Decimal,
        kind: TransactionType,
    },
}

impl IngestIssue {
    /// Whether the offending record was excluded from the result.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::InconsistentType { .. })
    }
}

/// The outcome of converting a single record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub transaction: Transaction,
    pub warning: Option<IngestIssue>,
}

/// Convert one raw record into canonical form.
///
/// A missing type is derived from the sign: negative amounts are expenses,
/// everything else is income.
pub fn normalize(raw: &RawTransaction) -> Result<Normalized, IngestIssue> {
    let id = raw.id.trim().to_string();

    let description = raw.description.trim();
    if description.is_empty() {
        return Err(IngestIssue::EmptyDescription { id });
    }

    let date = match raw.date.as_deref() {
        None => return Err(IngestIssue::MissingDate { id }),
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
            IngestIssue::InvalidDate {
                id: id.clone(),
                value: value.to_string(),
            }
        })?,
    };

    let text = raw.amount.trim();
    let amount = text
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| IngestIssue::InvalidAmount {
            id: id.clone(),
            value: raw.amount.clone(),
        })?;

    let signed_kind = if amount.is_sign_negative() && !amount.is_zero() {
        TransactionType::Expense
    } else {
        TransactionType::Income
    };

    let (kind, warning) = match raw.kind.as_deref() {
        None => (signed_kind, None),
        Some(value) => {
            let kind = value
                .parse::<TransactionType>()
                .map_err(|_| IngestIssue::InvalidType {
                    id: id.clone(),
                    value: value.to_string(),
                })?;
            // Unsigned amounts are the explicit-type convention; only a
            // negative income is a contradiction there.
            let disagrees = kind == TransactionType::Income && signed_kind == TransactionType::Expense;
            let warning = disagrees.then(|| IngestIssue::InconsistentType {
                id: id.clone(),
                amount,
                kind,
            });
            (kind, warning)
        }
    };

    if let Some(w) = &warning {
        tracing::warn!("{w}");
    }

    Ok(Normalized {
        transaction: Transaction {
            id,
            description: description.to_string(),
            amount: amount.abs(),
            category: raw.category.trim().to_string(),
            date,
            kind,
            icon: raw.icon.clone(),
        },
        warning,
    })
}

/// Records converted in bulk together with everything that went wrong.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ingested {
    pub transactions: Vec<Transaction>,
    pub issues: Vec<IngestIssue>,
}

impl Ingested {
    pub fn excluded(&self) -> usize {
        self.issues.iter().filter(|i| i.is_fatal()).count()
    }
}

/// Convert every record, keeping input order. Invalid records are excluded
/// and reported.
pub fn normalize_all(raw: &[RawTransaction]) -> Ingested {
    let mut out = Ingested::default();
    for record in raw {
        match normalize(record) {
            Ok(n) => {
                out.transactions.push(n.transaction);
                out.issues.extend(n.warning);
            }
            Err(issue) => {
                tracing::warn!("skipping record: {issue}");
                out.issues.push(issue);
            }
        }
    }
    tracing::debug!(
        accepted = out.transactions.len(),
        issues = out.issues.len(),
        "ingested transactions"
    );
    out
}
