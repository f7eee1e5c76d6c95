// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::Error;
use crate::models::Goal;

/// Goals due within this many days are urgent unless already reached.
pub const URGENT_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    Completed,
    Urgent,
    AlmostThere,
    InProgress,
}

impl GoalStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::Urgent => "Urgent",
            Self::AlmostThere => "Almost there",
            Self::InProgress => "In progress",
        }
    }
}

/// Coarse progress grouping used to colour progress bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressBand {
    High,
    Medium,
    Low,
    Critical,
}

impl Goal {
    /// Rules every stored goal satisfies: a title, a positive target and a
    /// category.
    pub fn validate(&self) -> Result<(), Error> {
        if self.title.trim().is_empty() {
            return Err(Error::EmptyTitle(self.id.clone()));
        }
        if self.target_amount <= Decimal::ZERO {
            return Err(Error::InvalidTargetAmount {
                id: self.id.clone(),
                amount: self.target_amount,
            });
        }
        if self.category.as_deref().is_none_or(|c| c.trim().is_empty()) {
            return Err(Error::MissingCategory(self.id.clone()));
        }
        Ok(())
    }

    /// [`Goal::validate`] plus the rule for entering a goal: the deadline
    /// must lie after `today`. Stored goals may outlive their deadline.
    pub fn validate_new(&self, today: NaiveDate) -> Result<(), Error> {
        self.validate()?;
        if self.deadline <= today {
            return Err(Error::DeadlinePassed {
                id: self.id.clone(),
                deadline: self.deadline,
            });
        }
        Ok(())
    }

    /// Fraction of the target saved so far; zero for a zero target.
    pub fn progress(&self) -> Decimal {
        if self.target_amount.is_zero() {
            return Decimal::ZERO;
        }
        self.current_amount
            .checked_div(self.target_amount)
            .unwrap_or(Decimal::MAX)
    }

    /// Days from `today` until the deadline, negative once it has passed.
    pub fn remaining_days(&self, today: NaiveDate) -> i64 {
        (self.deadline - today).num_days()
    }

    pub fn status(&self, today: NaiveDate) -> GoalStatus {
        let progress = self.progress();
        if progress >= Decimal::ONE {
            GoalStatus::Completed
        } else if self.remaining_days(today) < URGENT_DAYS {
            GoalStatus::Urgent
        } else if progress >= Decimal::new(8, 1) {
            GoalStatus::AlmostThere
        } else {
            GoalStatus::InProgress
        }
    }

    pub fn progress_band(&self) -> ProgressBand {
        let p = self.progress();
        if p >= Decimal::new(8, 1) {
            ProgressBand::High
        } else if p >= Decimal::new(5, 1) {
            ProgressBand::Medium
        } else if p >= Decimal::new(3, 1) {
            ProgressBand::Low
        } else {
            ProgressBand::Critical
        }
    }

    pub fn is_completed(&self) -> bool {
        self.progress() >= Decimal::ONE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalFilter {
    All,
    Active,
    Completed,
}

impl FromStr for GoalFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            _ => Err(Error::InvalidGoalFilter(s.to_string())),
        }
    }
}

/// A goal with its derived figures, as listed to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoalView {
    pub goal: Goal,
    pub progress: Decimal,
    pub remaining_days: i64,
    pub status: GoalStatus,
    pub band: ProgressBand,
}

/// Goals matching `filter` and, when given, `category`, in input order.
pub fn list(
    goals: &[Goal],
    filter: GoalFilter,
    category: Option<&str>,
    today: NaiveDate,
) -> Vec<GoalView> {
    goals
        .iter()
        .filter(|g| match filter {
            GoalFilter::All => true,
            GoalFilter::Active => !g.is_completed(),
            GoalFilter::Completed => g.is_completed(),
        })
        .filter(|g| category.is_none_or(|c| g.category.as_deref() == Some(c)))
        .map(|g| GoalView {
            goal: g.clone(),
            progress: g.progress(),
            remaining_days: g.remaining_days(today),
            status: g.status(today),
            band: g.progress_band(),
        })
        .collect()
}
