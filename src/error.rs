// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Library level error type.

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// The errors that the library operations may return.
///
/// Data-quality problems found in individual transaction records are not
/// errors; they are collected as [`crate::ingest::IngestIssue`] values so the
/// remaining records can still be queried.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// A period string other than `week`, `month` or `year`.
    #[error("invalid period '{0}', expected one of: week, month, year")]
    InvalidPeriod(String),

    /// A type filter string other than `all`, `income` or `expense`.
    #[error("invalid filter '{0}', expected one of: all, income, expense")]
    InvalidFilter(String),

    /// A transaction type string other than `income` or `expense`.
    #[error("invalid transaction type '{0}', expected income or expense")]
    InvalidTransactionType(String),

    /// A goal status filter other than `all`, `active` or `completed`.
    #[error("invalid goal filter '{0}', expected one of: all, active, completed")]
    InvalidGoalFilter(String),

    /// A fixed transaction names a day that no month has.
    #[error("fixed transaction {id}: day of month {day} is outside 1..=31")]
    InvalidDayOfMonth { id: String, day: u32 },

    /// A yearly fixed transaction has no month, or the month is out of range.
    #[error("fixed transaction {id}: month {month:?} is missing or outside 1..=12")]
    InvalidMonth { id: String, month: Option<u32> },

    /// A record was created with a blank description.
    #[error("record {0} has an empty description")]
    EmptyDescription(String),

    /// A goal without a title.
    #[error("goal {0} has an empty title")]
    EmptyTitle(String),

    /// A goal target of zero or less.
    #[error("goal {id}: target amount {amount} must be greater than zero")]
    InvalidTargetAmount { id: String, amount: Decimal },

    /// A goal that names no category.
    #[error("goal {0} has no category")]
    MissingCategory(String),

    /// A new goal whose deadline is not after `today`.
    #[error("goal {id}: deadline {deadline} is not in the future")]
    DeadlinePassed { id: String, deadline: NaiveDate },

    /// A sum of amounts left the range `Decimal` can hold.
    #[error("amount total is too large to represent")]
    AmountOverflow,

    /// Date arithmetic left the range chrono can represent.
    #[error("date out of range near {0}")]
    DateOutOfRange(NaiveDate),
}
