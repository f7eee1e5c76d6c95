// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::bills::{overdue, upcoming as upcoming_bills};
use crate::commands::{Context, json_source, today};
use crate::models::Bill;
use crate::store::read_json;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use serde::Serialize;

pub fn handle(ctx: &Context, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("upcoming", sub)) => upcoming(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
struct BillRow {
    #[serde(flatten)]
    bill: Bill,
    overdue: bool,
}

fn upcoming(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let path = json_source(sub, ctx.config.bills_path.as_ref(), "bills")?;
    let bills: Vec<Bill> = read_json(&path)?;
    let today = today(sub)?;

    let data: Vec<BillRow> = overdue(&bills, today)
        .into_iter()
        .map(|bill| BillRow { bill, overdue: true })
        .chain(
            upcoming_bills(&bills, today)
                .into_iter()
                .map(|bill| BillRow { bill, overdue: false }),
        )
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let symbol = ctx.symbol();
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.bill.due_date.to_string(),
                    r.bill.description.clone(),
                    fmt_money(&r.bill.amount, symbol),
                    if r.overdue { "overdue".into() } else { String::new() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Due", "Description", "Amount", ""], rows)
        );
    }
    Ok(())
}
