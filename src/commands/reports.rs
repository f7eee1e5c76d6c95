// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{Context, today};
use crate::models::{Query, TypeFilter};
use crate::reports::{monthly_trend, spend_by_category, with_limits};
use crate::utils::{fmt_money, fmt_percent, fmt_signed, maybe_print_json, pretty_table};
use anyhow::Result;
use rust_decimal::Decimal;

pub fn handle(ctx: &Context, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("categories", sub)) => categories(ctx, sub)?,
        Some(("trend", sub)) => trend(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

fn categories(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let limits: Vec<(String, Decimal)> = sub
        .get_many::<(String, Decimal)>("limit")
        .map(|v| v.cloned().collect())
        .unwrap_or_default();
    let query = Query::new(ctx.period(sub)?, TypeFilter::Expense);
    let result = ctx.run_query(query, today(sub)?)?.result;
    let data = with_limits(spend_by_category(&result.items)?, &limits)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let symbol = ctx.symbol();
        let rows = data
            .iter()
            .map(|c| {
                let mut row = vec![
                    c.spend.category.clone(),
                    fmt_money(&c.spend.amount, symbol),
                    fmt_percent(&c.spend.percentage),
                ];
                if !limits.is_empty() {
                    row.push(c.limit.map(|l| fmt_money(&l, symbol)).unwrap_or_default());
                    row.push(
                        c.usage
                            .map(|u| {
                                let used = fmt_percent(&u.ratio.saturating_mul(Decimal::ONE_HUNDRED));
                                if u.over_threshold { format!("{used} !") } else { used }
                            })
                            .unwrap_or_default(),
                    );
                }
                row
            })
            .collect();
        let headers: &[&str] = if limits.is_empty() {
            &["Category", "Spent", "Share"]
        } else {
            &["Category", "Spent", "Share", "Limit", "Used"]
        };
        println!("{}", pretty_table(headers, rows));
    }
    Ok(())
}

fn trend(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let months = *sub.get_one::<u32>("months").unwrap_or(&6) as usize;
    let txs = ctx.load_transactions()?;
    let data = monthly_trend(&txs, months, today(sub)?)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let symbol = ctx.symbol();
        let rows = data
            .iter()
            .map(|m| {
                vec![
                    m.month.clone(),
                    fmt_money(&m.income, symbol),
                    fmt_money(&m.expenses, symbol),
                    fmt_signed(&m.savings, symbol),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Income", "Expenses", "Savings"], rows)
        );
    }
    Ok(())
}
