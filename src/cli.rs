// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};
use rust_decimal::Decimal;

use crate::reports::MAX_TREND_MONTHS;
use crate::utils::parse_decimal;

/// `Alimentação=800` into a category and its limit.
pub fn category_limit(s: &str) -> Result<(String, Decimal), String> {
    let (category, amount) = s
        .split_once('=')
        .ok_or_else(|| format!("expected CATEGORY=AMOUNT, got '{s}'"))?;
    let category = category.trim();
    if category.is_empty() {
        return Err(format!("missing category in '{s}'"));
    }
    let limit = parse_decimal(amount).map_err(|e| e.to_string())?;
    if limit.is_sign_negative() {
        return Err(format!("limit for {category} must not be negative"));
    }
    Ok((category.to_string(), limit))
}

fn today_arg() -> Arg {
    Arg::new("today")
        .long("today")
        .value_name("YYYY-MM-DD")
        .help("Date to treat as today (defaults to the local date)")
}

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

fn period_arg() -> Arg {
    Arg::new("period")
        .long("period")
        .short('p')
        .value_parser(["week", "month", "year"])
        .help("Date window ending today (default from config, else month)")
}

fn filter_arg() -> Arg {
    Arg::new("filter")
        .long("filter")
        .short('f')
        .value_parser(["all", "income", "expense"])
        .help("Transaction type to keep (default from config, else all)")
}

pub fn build_cli() -> Command {
    Command::new("smartfin")
        .version(crate_version!())
        .about("SmartFin: transactions, totals, fixed transactions, goals and bills")
        .arg(
            Arg::new("data")
                .long("data")
                .global(true)
                .value_name("PATH")
                .help("Transactions file (.csv or .json); overrides the configured path"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log output (-v info, -vv debug)"),
        )
        .subcommand(
            Command::new("tx")
                .about("Query transactions")
                .subcommand(json_args(
                    Command::new("list")
                        .about("List transactions in a period, most recent first")
                        .arg(period_arg())
                        .arg(filter_arg())
                        .arg(today_arg())
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize))
                                .help("Show at most this many rows"),
                        ),
                ))
                .subcommand(json_args(
                    Command::new("totals")
                        .about("Income, expense and balance for a period")
                        .arg(period_arg())
                        .arg(filter_arg())
                        .arg(today_arg())
                        .arg(
                            Arg::new("unfiltered")
                                .long("unfiltered")
                                .action(ArgAction::SetTrue)
                                .conflicts_with("filter")
                                .help("Ignore the type filter when totalling"),
                        ),
                )),
        )
        .subcommand(
            Command::new("report")
                .about("Reports")
                .subcommand(json_args(
                    Command::new("categories")
                        .about("Expenses by category with share of total")
                        .arg(period_arg())
                        .arg(today_arg())
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_name("CATEGORY=AMOUNT")
                                .action(ArgAction::Append)
                                .value_parser(category_limit)
                                .help("Spending limit for a category; repeat for more"),
                        ),
                ))
                .subcommand(json_args(
                    Command::new("trend")
                        .about("Monthly income, expenses and savings")
                        .arg(
                            Arg::new("months")
                                .long("months")
                                .value_parser(
                                    value_parser!(u32).range(1..=MAX_TREND_MONTHS as i64),
                                )
                                .default_value("6"),
                        )
                        .arg(today_arg()),
                )),
        )
        .subcommand(
            Command::new("fixed")
                .about("Fixed (recurring) transactions")
                .arg(
                    Arg::new("file")
                        .long("file")
                        .global(true)
                        .value_name("PATH")
                        .help("Fixed transactions JSON; overrides the configured path"),
                )
                .subcommand(json_args(
                    Command::new("list")
                        .about("Fixed transactions with their next due date")
                        .arg(today_arg()),
                ))
                .subcommand(json_args(
                    Command::new("summary").about("Fixed income, expenses and balance"),
                )),
        )
        .subcommand(
            Command::new("goals")
                .about("Savings goals")
                .arg(
                    Arg::new("file")
                        .long("file")
                        .global(true)
                        .value_name("PATH")
                        .help("Goals JSON; overrides the configured path"),
                )
                .subcommand(json_args(
                    Command::new("check")
                        .about("Check goals against the rules for new entries")
                        .arg(today_arg()),
                ))
                .subcommand(json_args(
                    Command::new("list")
                        .about("Goals with progress and status")
                        .arg(
                            Arg::new("status")
                                .long("status")
                                .value_parser(["all", "active", "completed"])
                                .default_value("all"),
                        )
                        .arg(Arg::new("category").long("category"))
                        .arg(today_arg()),
                )),
        )
        .subcommand(
            Command::new("bills").about("Bills").subcommand(json_args(
                Command::new("upcoming")
                    .about("Unpaid bills, overdue first then by due date")
                    .arg(
                        Arg::new("file")
                            .long("file")
                            .value_name("PATH")
                            .help("Bills JSON; overrides the configured path"),
                    )
                    .arg(today_arg()),
            )),
        )
        .subcommand(
            Command::new("config")
                .about("Configuration")
                .subcommand(Command::new("show").about("Print the effective configuration"))
                .subcommand(Command::new("path").about("Print the config file path")),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        build_cli().debug_assert();
    }

    #[test]
    fn unknown_period_is_rejected() {
        let res = build_cli().try_get_matches_from(["smartfin", "tx", "list", "--period", "fortnight"]);
        assert!(res.is_err());
    }

    #[test]
    fn unfiltered_conflicts_with_filter() {
        let res = build_cli().try_get_matches_from([
            "smartfin", "tx", "totals", "--unfiltered", "--filter", "income",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn category_limits_are_parsed() {
        let m = build_cli()
            .try_get_matches_from([
                "smartfin", "report", "categories", "--limit", "Alimentação=800", "--limit",
                " Lazer = 150.50",
            ])
            .unwrap();
        let (_, report) = m.subcommand().unwrap();
        let (_, sub) = report.subcommand().unwrap();
        let limits: Vec<_> = sub
            .get_many::<(String, Decimal)>("limit")
            .unwrap()
            .cloned()
            .collect();
        assert_eq!(
            limits,
            [
                ("Alimentação".to_string(), Decimal::new(800, 0)),
                ("Lazer".to_string(), Decimal::new(15050, 2)),
            ]
        );

        for bad in ["Lazer", "=10", "Lazer=abc", "Lazer=-5"] {
            let res = build_cli()
                .try_get_matches_from(["smartfin", "report", "categories", "--limit", bad]);
            assert!(res.is_err(), "{bad}");
        }
    }

    #[test]
    fn trend_months_are_bounded() {
        for bad in ["0", "121", "18446744073709551615"] {
            let res = build_cli()
                .try_get_matches_from(["smartfin", "report", "trend", "--months", bad]);
            assert!(res.is_err(), "{bad}");
        }
        let m = build_cli()
            .try_get_matches_from(["smartfin", "report", "trend", "--months", "120"])
            .unwrap();
        let (_, report) = m.subcommand().unwrap();
        let (_, sub) = report.subcommand().unwrap();
        assert_eq!(sub.get_one::<u32>("months"), Some(&120));
    }
}
