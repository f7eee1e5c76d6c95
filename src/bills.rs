// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;

use crate::models::Bill;

/// Unpaid bills due today or later, soonest first.
pub fn upcoming(bills: &[Bill], today: NaiveDate) -> Vec<Bill> {
    let mut out: Vec<Bill> = bills
        .iter()
        .filter(|b| !b.is_paid && b.due_date >= today)
        .cloned()
        .collect();
    out.sort_by(|a, b| a.due_date.cmp(&b.due_date));
    out
}

/// Unpaid bills whose due date has passed, oldest first.
pub fn overdue(bills: &[Bill], today: NaiveDate) -> Vec<Bill> {
    let mut out: Vec<Bill> = bills
        .iter()
        .filter(|b| !b.is_paid && b.due_date < today)
        .cloned()
        .collect();
    out.sort_by(|a, b| a.due_date.cmp(&b.due_date));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn bill(id: &str, due: &str, paid: bool) -> Bill {
        Bill {
            id: id.into(),
            description: format!("bill {id}"),
            amount: Decimal::new(9990, 2),
            due_date: NaiveDate::parse_from_str(due, "%Y-%m-%d").unwrap(),
            is_paid: paid,
            category: None,
        }
    }

    #[test]
    fn splits_upcoming_and_overdue() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
        let bills = vec![
            bill("internet", "2024-03-25", false),
            bill("aluguel", "2024-03-20", false),
            bill("energia", "2024-03-22", true),
            bill("agua", "2024-03-18", false),
        ];
        let up: Vec<_> = upcoming(&bills, today).into_iter().map(|b| b.id).collect();
        assert_eq!(up, ["aluguel", "internet"]);
        let late: Vec<_> = overdue(&bills, today).into_iter().map(|b| b.id).collect();
        assert_eq!(late, ["agua"]);
    }
}
