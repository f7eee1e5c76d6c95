// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Spending breakdowns and monthly trends over canonical transactions.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::Error;
use crate::models::{Transaction, TransactionType};

/// Spent-to-limit ratio above which a category is flagged.
pub const USAGE_WARNING_RATIO: Decimal = Decimal::from_parts(8, 0, 0, false, 1);

/// Longest trend [`monthly_trend`] produces.
pub const MAX_TREND_MONTHS: usize = 120;

const UNCATEGORIZED: &str = "(uncategorized)";

/// Share of `part` in `whole` as a percentage rounded to two places. Zero
/// when `whole` is zero.
pub fn percentage(part: Decimal, whole: Decimal) -> Decimal {
    match part.checked_div(whole) {
        Some(share) => (share * Decimal::ONE_HUNDRED).round_dp(2),
        None => Decimal::ZERO,
    }
}

fn checked_sum(acc: &mut Decimal, amount: Decimal) -> Result<(), Error> {
    *acc = acc.checked_add(amount).ok_or(Error::AmountOverflow)?;
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySpend {
    pub category: String,
    pub amount: Decimal,
    pub percentage: Decimal,
}

/// Expenses grouped by category, largest first. Percentages are of the total
/// expense and rounded to two places.
pub fn spend_by_category(transactions: &[Transaction]) -> Result<Vec<CategorySpend>, Error> {
    let mut agg: HashMap<&str, Decimal> = HashMap::new();
    let mut total = Decimal::ZERO;
    for t in transactions
        .iter()
        .filter(|t| t.kind == TransactionType::Expense)
    {
        let cat = if t.category.is_empty() {
            UNCATEGORIZED
        } else {
            t.category.as_str()
        };
        checked_sum(agg.entry(cat).or_insert(Decimal::ZERO), t.amount)?;
        checked_sum(&mut total, t.amount)?;
    }

    let mut items: Vec<CategorySpend> = agg
        .into_iter()
        .map(|(cat, amount)| CategorySpend {
            category: cat.to_string(),
            amount,
            percentage: percentage(amount, total),
        })
        .collect();
    items.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.category.cmp(&b.category)));
    Ok(items)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyTrend {
    /// `YYYY-MM`
    pub month: String,
    pub income: Decimal,
    pub expenses: Decimal,
    pub savings: Decimal,
}

/// Income, expenses and savings for each of the `months` months ending with
/// `today`'s month, oldest first. Months without transactions are zero.
/// `months` is capped at [`MAX_TREND_MONTHS`].
pub fn monthly_trend(
    transactions: &[Transaction],
    months: usize,
    today: NaiveDate,
) -> Result<Vec<MonthlyTrend>, Error> {
    let months = months.min(MAX_TREND_MONTHS);
    let mut keys = Vec::with_capacity(months);
    let (mut y, mut m) = (today.year(), today.month());
    for _ in 0..months {
        keys.push((y, m));
        if m == 1 {
            y -= 1;
            m = 12;
        } else {
            m -= 1;
        }
    }
    keys.reverse();

    let mut map: BTreeMap<(i32, u32), (Decimal, Decimal)> = keys
        .iter()
        .map(|k| (*k, (Decimal::ZERO, Decimal::ZERO)))
        .collect();
    for t in transactions {
        if let Some(entry) = map.get_mut(&(t.date.year(), t.date.month())) {
            match t.kind {
                TransactionType::Income => checked_sum(&mut entry.0, t.amount)?,
                TransactionType::Expense => checked_sum(&mut entry.1, t.amount)?,
            }
        }
    }

    Ok(map
        .into_iter()
        .map(|((y, m), (income, expenses))| MonthlyTrend {
            month: format!("{:04}-{:02}", y, m),
            income,
            expenses,
            savings: income - expenses,
        })
        .collect())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BudgetUsage {
    pub ratio: Decimal,
    pub over_threshold: bool,
}

/// How much of a category limit has been used. A zero limit counts as fully
/// used as soon as anything is spent.
pub fn category_usage(spent: Decimal, limit: Decimal) -> Result<BudgetUsage, Error> {
    let ratio = if limit.is_zero() {
        if spent.is_zero() { Decimal::ZERO } else { Decimal::ONE }
    } else {
        spent.checked_div(limit).ok_or(Error::AmountOverflow)?
    };
    Ok(BudgetUsage {
        ratio,
        over_threshold: ratio > USAGE_WARNING_RATIO,
    })
}

/// A category's spending next to its limit, when one was set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryBudget {
    #[serde(flatten)]
    pub spend: CategorySpend,
    pub limit: Option<Decimal>,
    pub usage: Option<BudgetUsage>,
}

/// Attach `limits` to a category breakdown. Limited categories with no
/// spending are appended as zero rows, by name.
pub fn with_limits(
    spend: Vec<CategorySpend>,
    limits: &[(String, Decimal)],
) -> Result<Vec<CategoryBudget>, Error> {
    let limit_of: HashMap<&str, Decimal> = limits.iter().map(|(c, l)| (c.as_str(), *l)).collect();

    let mut unspent: Vec<(&str, Decimal)> = limit_of
        .iter()
        .filter(|(c, _)| !spend.iter().any(|s| s.category == **c))
        .map(|(c, l)| (*c, *l))
        .collect();
    unspent.sort_by(|a, b| a.0.cmp(b.0));

    let mut out = Vec::with_capacity(spend.len() + unspent.len());
    for s in spend {
        let limit = limit_of.get(s.category.as_str()).copied();
        let usage = limit.map(|l| category_usage(s.amount, l)).transpose()?;
        out.push(CategoryBudget { spend: s, limit, usage });
    }
    for (category, limit) in unspent {
        out.push(CategoryBudget {
            spend: CategorySpend {
                category: category.to_string(),
                amount: Decimal::ZERO,
                percentage: Decimal::ZERO,
            },
            limit: Some(limit),
            usage: Some(category_usage(Decimal::ZERO, limit)?),
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(d: &str, kind: TransactionType, amount: &str, category: &str) -> Transaction {
        Transaction {
            id: d.into(),
            description: category.into(),
            amount: amount.parse().unwrap(),
            category: category.into(),
            date: NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap(),
            kind,
            icon: None,
        }
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn category_breakdown_sums_and_orders() {
        let txs = vec![
            tx("2024-03-01", TransactionType::Expense, "850.00", "Alimentação"),
            tx("2024-03-02", TransactionType::Expense, "450.00", "Transporte"),
            tx("2024-03-03", TransactionType::Expense, "1200.00", "Moradia"),
            tx("2024-03-04", TransactionType::Expense, "300.00", "Lazer"),
            tx("2024-03-05", TransactionType::Expense, "200.00", "Outros"),
            tx("2024-03-06", TransactionType::Income, "5000.00", "Receita"),
        ];
        let out = spend_by_category(&txs).unwrap();
        let cats: Vec<_> = out.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(cats, ["Moradia", "Alimentação", "Transporte", "Lazer", "Outros"]);
        assert_eq!(out[0].percentage, dec("40"));
        assert_eq!(out[1].percentage, dec("28.33"));
        assert_eq!(out[4].percentage, dec("6.67"));
    }

    #[test]
    fn trend_includes_empty_months_across_year_end() {
        let txs = vec![
            tx("2023-12-10", TransactionType::Income, "100", "x"),
            tx("2024-02-10", TransactionType::Expense, "40", "x"),
            tx("2023-10-01", TransactionType::Expense, "999", "x"),
        ];
        let out = monthly_trend(&txs, 3, NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()).unwrap();
        let months: Vec<_> = out.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(months, ["2023-12", "2024-01", "2024-02"]);
        assert_eq!(out[0].savings, dec("100"));
        assert_eq!(out[1].income, Decimal::ZERO);
        assert_eq!(out[2].savings, dec("-40"));
    }

    #[test]
    fn usage_threshold() {
        let usage = |s: &str, l: &str| category_usage(dec(s), dec(l)).unwrap();
        assert!(!usage("80", "100").over_threshold);
        assert!(usage("81", "100").over_threshold);
        assert!(usage("1", "0").over_threshold);
        assert_eq!(usage("0", "0").ratio, Decimal::ZERO);
        assert_eq!(
            category_usage(Decimal::MAX, dec("0.0000001")),
            Err(Error::AmountOverflow)
        );
    }

    #[test]
    fn percentage_of_zero_total() {
        assert_eq!(percentage(dec("10"), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(percentage(dec("850"), dec("3000")), dec("28.33"));
        assert_eq!(percentage(Decimal::MAX, Decimal::MAX), dec("100"));
    }

    #[test]
    fn limits_are_joined_to_categories() {
        let txs = vec![
            tx("2024-03-01", TransactionType::Expense, "850.00", "Alimentação"),
            tx("2024-03-02", TransactionType::Expense, "150.00", "Transporte"),
        ];
        let limits = vec![
            ("Alimentação".to_string(), dec("1000")),
            ("Transporte".to_string(), dec("300")),
            ("Lazer".to_string(), dec("200")),
        ];
        let out = with_limits(spend_by_category(&txs).unwrap(), &limits).unwrap();
        let cats: Vec<_> = out.iter().map(|c| c.spend.category.as_str()).collect();
        assert_eq!(cats, ["Alimentação", "Transporte", "Lazer"]);

        let food = out[0].usage.unwrap();
        assert_eq!(food.ratio, dec("0.85"));
        assert!(food.over_threshold);
        assert!(!out[1].usage.unwrap().over_threshold);
        assert_eq!(out[2].spend.amount, Decimal::ZERO);
        assert_eq!(out[2].usage.unwrap().ratio, Decimal::ZERO);

        let plain = with_limits(spend_by_category(&txs).unwrap(), &[]).unwrap();
        assert!(plain.iter().all(|c| c.limit.is_none() && c.usage.is_none()));
    }

    #[test]
    fn category_overflow_is_an_error() {
        let huge = "50000000000000000000000000000";
        let txs = vec![
            tx("2024-03-01", TransactionType::Expense, huge, "Moradia"),
            tx("2024-03-02", TransactionType::Expense, huge, "Lazer"),
        ];
        assert_eq!(spend_by_category(&txs), Err(Error::AmountOverflow));
    }

    #[test]
    fn trend_length_is_capped() {
        let out = monthly_trend(&[], 10_000, NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()).unwrap();
        assert_eq!(out.len(), MAX_TREND_MONTHS);
        assert_eq!(out[0].month, "2014-03");
    }
}
