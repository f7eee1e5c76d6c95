// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{Context, json_source, today};
use crate::goals::{GoalFilter, list as list_goals};
use crate::models::Goal;
use crate::store::read_json;
use crate::utils::{fmt_money, fmt_percent, maybe_print_json, pretty_table};
use anyhow::{Context as _, Result, bail};
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(ctx: &Context, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(ctx, sub)?,
        Some(("check", sub)) => check(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

fn load(ctx: &Context, sub: &clap::ArgMatches) -> Result<Vec<Goal>> {
    let path = json_source(sub, ctx.config.goals_path.as_ref(), "goals")?;
    let goals: Vec<Goal> = read_json(&path)?;
    for g in &goals {
        g.validate()
            .with_context(|| format!("Invalid goal in {}", path.display()))?;
    }
    Ok(goals)
}

fn list(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let goals = load(ctx, sub)?;
    let filter: GoalFilter = sub
        .get_one::<String>("status")
        .map(|s| s.parse())
        .transpose()?
        .unwrap_or(GoalFilter::All);
    let category = sub.get_one::<String>("category").map(|s| s.as_str());
    let data = list_goals(&goals, filter, category, today(sub)?);

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let symbol = ctx.symbol();
        let rows = data
            .iter()
            .map(|v| {
                vec![
                    v.goal.title.clone(),
                    format!(
                        "{} / {}",
                        fmt_money(&v.goal.current_amount, symbol),
                        fmt_money(&v.goal.target_amount, symbol)
                    ),
                    fmt_percent(&v.progress.saturating_mul(Decimal::ONE_HUNDRED)),
                    v.goal.deadline.to_string(),
                    v.remaining_days.to_string(),
                    v.status.label().to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Goal", "Saved", "Progress", "Deadline", "Days left", "Status"],
                rows
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct GoalProblem {
    pub id: String,
    pub title: String,
    pub problem: String,
}

/// Every goal in the file that would be refused as a new entry.
pub fn problems(goals: &[Goal], today: chrono::NaiveDate) -> Vec<GoalProblem> {
    goals
        .iter()
        .filter_map(|g| {
            g.validate_new(today).err().map(|e| GoalProblem {
                id: g.id.clone(),
                title: g.title.clone(),
                problem: e.to_string(),
            })
        })
        .collect()
}

fn check(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let path = json_source(sub, ctx.config.goals_path.as_ref(), "goals")?;
    let goals: Vec<Goal> = read_json(&path)?;
    let data = problems(&goals, today(sub)?);
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        if data.is_empty() {
            println!("All {} goals are valid", goals.len());
        } else {
            let rows = data
                .iter()
                .map(|p| vec![p.id.clone(), p.title.clone(), p.problem.clone()])
                .collect();
            println!("{}", pretty_table(&["Id", "Goal", "Problem"], rows));
        }
    }
    if !data.is_empty() {
        bail!("{} of {} goals are invalid", data.len(), goals.len());
    }
    Ok(())
}
