// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{Context, today};
use crate::engine::aggregate_unfiltered;
use crate::models::{Query, QueryResult, Totals};
use crate::utils::{fmt_money, fmt_signed, maybe_print_json, pretty_table};
use anyhow::Result;
use serde::Serialize;

pub fn handle(ctx: &Context, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(ctx, sub)?,
        Some(("totals", sub)) => totals(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

fn list(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(ctx, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        if data.is_empty() {
            println!("No transactions found");
            return Ok(());
        }
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.description.clone(),
                    r.category.clone(),
                    r.kind.clone(),
                    r.amount.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Description", "Category", "Type", "Amount"], rows)
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub description: String,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: String,
}

pub fn query_rows(ctx: &Context, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let query = Query::new(ctx.period(sub)?, ctx.filter(sub)?);
    let result = ctx.run_query(query, today(sub)?)?.result;
    Ok(to_rows(&result, ctx.symbol(), sub.get_one::<usize>("limit").copied()))
}

pub fn to_rows(result: &QueryResult, symbol: &str, limit: Option<usize>) -> Vec<TransactionRow> {
    result
        .items
        .iter()
        .take(limit.unwrap_or(usize::MAX))
        .map(|t| TransactionRow {
            id: t.id.clone(),
            date: t.date.to_string(),
            description: t.description.clone(),
            category: t.category.clone(),
            kind: t.kind.to_string(),
            amount: fmt_money(&t.amount, symbol),
        })
        .collect()
}

fn totals(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let totals = compute_totals(ctx, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &totals)? {
        let symbol = ctx.symbol();
        println!(
            "{}",
            pretty_table(
                &["Income", "Expense", "Balance"],
                vec![vec![
                    fmt_money(&totals.income, symbol),
                    fmt_money(&totals.expense, symbol),
                    fmt_signed(&totals.balance, symbol),
                ]],
            )
        );
    }
    Ok(())
}

pub fn compute_totals(ctx: &Context, sub: &clap::ArgMatches) -> Result<Totals> {
    let period = ctx.period(sub)?;
    let today = today(sub)?;
    if sub.get_flag("unfiltered") {
        let txs = ctx.load_transactions()?;
        Ok(aggregate_unfiltered(&txs, period, today)?)
    } else {
        let outcome = ctx.run_query(Query::new(period, ctx.filter(sub)?), today)?;
        Ok(outcome.result.totals)
    }
}
