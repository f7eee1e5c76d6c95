// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Fixed (recurring) transactions: validation, next due date and the
//! fixed income/expense summary. Nothing here schedules or posts anything.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::Error;
use crate::models::{FixedTransaction, Frequency, Totals};
use crate::utils::days_in_month;

impl FixedTransaction {
    pub fn validate(&self) -> Result<(), Error> {
        if self.description.trim().is_empty() {
            return Err(Error::EmptyDescription(self.id.clone()));
        }
        if !(1..=31).contains(&self.day_of_month) {
            return Err(Error::InvalidDayOfMonth {
                id: self.id.clone(),
                day: self.day_of_month,
            });
        }
        let month_ok = match (self.frequency, self.month) {
            (_, Some(m)) => (1..=12).contains(&m),
            (Frequency::Yearly, None) => false,
            _ => true,
        };
        if !month_ok {
            return Err(Error::InvalidMonth {
                id: self.id.clone(),
                month: self.month,
            });
        }
        Ok(())
    }

    /// The next date on or after `today` this item falls due.
    ///
    /// Days past the end of a short month fall on its last day. Weekly
    /// items carry no weekday and have no due date.
    pub fn next_due(&self, today: NaiveDate) -> Result<Option<NaiveDate>, Error> {
        self.validate()?;
        let due = match self.frequency {
            Frequency::Daily => Some(today),
            Frequency::Weekly => None,
            Frequency::Monthly => {
                let this = clamped(today.year(), today.month(), self.day_of_month)
                    .ok_or(Error::DateOutOfRange(today))?;
                if this >= today {
                    Some(this)
                } else {
                    let (y, m) = if today.month() == 12 {
                        (today.year() + 1, 1)
                    } else {
                        (today.year(), today.month() + 1)
                    };
                    Some(clamped(y, m, self.day_of_month).ok_or(Error::DateOutOfRange(today))?)
                }
            }
            Frequency::Yearly => {
                let month = self.month.unwrap_or(1);
                let this = clamped(today.year(), month, self.day_of_month)
                    .ok_or(Error::DateOutOfRange(today))?;
                if this >= today {
                    Some(this)
                } else {
                    Some(
                        clamped(today.year() + 1, month, self.day_of_month)
                            .ok_or(Error::DateOutOfRange(today))?,
                    )
                }
            }
        };
        Ok(due)
    }
}

fn clamped(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    NaiveDate::from_ymd_opt(year, month, day.min(days_in_month(first)))
}

/// Fixed income, fixed expense and the difference, each item counted once.
pub fn summarize(items: &[FixedTransaction]) -> Result<Totals, Error> {
    let mut totals = Totals::default();
    for f in items {
        totals.add(f.kind, f.amount)?;
    }
    Ok(totals)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Upcoming {
    pub item: FixedTransaction,
    pub due: NaiveDate,
}

/// Items that have a due date, soonest first. Invalid items are skipped
/// with a warning.
pub fn upcoming(items: &[FixedTransaction], today: NaiveDate) -> Vec<Upcoming> {
    let mut out: Vec<Upcoming> = items
        .iter()
        .filter_map(|f| match f.next_due(today) {
            Ok(Some(due)) => Some(Upcoming {
                item: f.clone(),
                due,
            }),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("skipping fixed transaction: {e}");
                None
            }
        })
        .collect();
    out.sort_by(|a, b| a.due.cmp(&b.due));
    out
}
