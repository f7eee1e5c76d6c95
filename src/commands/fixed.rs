// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{Context, json_source, today};
use crate::fixed::{summarize, upcoming};
use crate::models::FixedTransaction;
use crate::store::read_json;
use crate::utils::{fmt_money, fmt_signed, maybe_print_json, pretty_table};
use anyhow::{Context as _, Result};
use serde::Serialize;

pub fn handle(ctx: &Context, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(ctx, sub)?,
        Some(("summary", sub)) => summary(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

fn load(ctx: &Context, sub: &clap::ArgMatches) -> Result<Vec<FixedTransaction>> {
    let path = json_source(sub, ctx.config.fixed_path.as_ref(), "fixed transactions")?;
    let items: Vec<FixedTransaction> = read_json(&path)?;
    for f in &items {
        f.validate()
            .with_context(|| format!("Invalid fixed transaction in {}", path.display()))?;
    }
    Ok(items)
}

#[derive(Serialize)]
struct FixedRow {
    id: String,
    description: String,
    category: String,
    frequency: String,
    #[serde(rename = "type")]
    kind: String,
    amount: String,
    next_due: Option<String>,
}

fn list(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let items = load(ctx, sub)?;
    let today = today(sub)?;
    let symbol = ctx.symbol();

    // Dated items first, soonest first; undated (weekly) items keep file order.
    let mut data: Vec<FixedRow> = upcoming(&items, today)
        .into_iter()
        .map(|u| row(&u.item, Some(u.due.to_string()), symbol))
        .collect();
    for f in &items {
        if f.next_due(today)?.is_none() {
            data.push(row(f, None, symbol));
        }
    }

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .into_iter()
            .map(|r| {
                vec![
                    r.next_due.unwrap_or_else(|| "-".into()),
                    r.description,
                    r.category,
                    r.frequency,
                    r.kind,
                    r.amount,
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Next due", "Description", "Category", "Frequency", "Type", "Amount"],
                rows
            )
        );
    }
    Ok(())
}

fn row(f: &FixedTransaction, next_due: Option<String>, symbol: &str) -> FixedRow {
    FixedRow {
        id: f.id.clone(),
        description: f.description.clone(),
        category: f.category.clone(),
        frequency: f.frequency.as_str().to_string(),
        kind: f.kind.to_string(),
        amount: fmt_money(&f.amount, symbol),
        next_due,
    }
}

fn summary(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let totals = summarize(&load(ctx, sub)?)?;
    if !maybe_print_json(json_flag, jsonl_flag, &totals)? {
        let symbol = ctx.symbol();
        println!(
            "{}",
            pretty_table(
                &["Fixed income", "Fixed expenses", "Balance"],
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
