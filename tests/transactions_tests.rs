// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use std::path::PathBuf;

use common::{dec, mock_csv};
use rust_decimal::Decimal;
use smartfin::commands::{transactions, Context};
use smartfin::config::Config;
use smartfin::models::{Period, Query, TypeFilter};

fn tx_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["smartfin", "tx"];
    argv.extend_from_slice(args);
    let matches = smartfin::cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("tx", tx_m)) => tx_m.clone(),
        _ => panic!("no tx subcommand"),
    }
}

fn sub(m: &clap::ArgMatches, name: &str) -> clap::ArgMatches {
    match m.subcommand() {
        Some((n, s)) if n == name => s.clone(),
        _ => panic!("no {} subcommand", name),
    }
}

#[test]
fn list_limit_and_order_from_csv() {
    let file = mock_csv();
    let ctx = Context::new(Config::default(), Some(PathBuf::from(file.path())));
    let m = tx_matches(&["list", "--period", "month", "--today", "2024-03-20", "--limit", "2"]);
    let rows = transactions::query_rows(&ctx, &sub(&m, "list")).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, "2024-03-15");
    assert_eq!(rows[0].kind, "expense");
    assert_eq!(rows[0].amount, "R$ 456.75");
    assert_eq!(rows[1].description, "Salário");
}

#[test]
fn config_defaults_apply_when_flags_are_absent() {
    let file = mock_csv();
    let config = Config {
        default_period: Period::Week,
        currency_symbol: "US$".into(),
        ..Config::default()
    };
    let ctx = Context::new(config, Some(PathBuf::from(file.path())));
    let m = tx_matches(&["list", "--today", "2024-03-20"]);
    let rows = transactions::query_rows(&ctx, &sub(&m, "list")).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].amount, "US$ 456.75");
}

#[test]
fn totals_filtered_and_unfiltered() {
    let file = mock_csv();
    let ctx = Context::new(Config::default(), Some(PathBuf::from(file.path())));

    let m = tx_matches(&["totals", "--filter", "income", "--today", "2024-03-20"]);
    let t = transactions::compute_totals(&ctx, &sub(&m, "totals")).unwrap();
    assert_eq!(t.income, dec("6550.00"));
    assert_eq!(t.expense, Decimal::ZERO);

    let m = tx_matches(&["totals", "--unfiltered", "--today", "2024-03-20"]);
    let t = transactions::compute_totals(&ctx, &sub(&m, "totals")).unwrap();
    assert_eq!(t.expense, dec("1000.25"));
    assert_eq!(t.balance, dec("5549.75"));
}

#[test]
fn missing_data_file_is_reported() {
    let ctx = Context::new(Config::default(), None);
    let m = tx_matches(&["list"]);
    let err = transactions::query_rows(&ctx, &sub(&m, "list")).unwrap_err();
    assert!(err.to_string().contains("--data"));
}

#[test]
fn skipped_records_are_collected_once() {
    use std::io::Write;

    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(
        file,
        "id,description,amount,category,date\n\
         007,Venda,1234567890123456.78,Outros,2024-03-15\n\
         7,Tarifa,-0.10,Outros,2024-03-31\n\
         8,Mercado,-10.00,Alimentação,2024-03-14"
    )
    .unwrap();
    file.flush().unwrap();

    let ctx = Context::new(Config::default(), Some(PathBuf::from(file.path())));
    let outcome = ctx
        .run_query(
            Query::new(Period::Month, TypeFilter::All),
            common::date("2024-03-20"),
        )
        .unwrap();
    let ids: Vec<_> = outcome.result.items.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["007", "8"]);
    assert_eq!(outcome.result.totals.income, dec("1234567890123456.78"));
    assert!(outcome.issues.is_empty());

    let bad = "id,description,amount,category,date\n1,Mercado,-10.00,Alimentação,2024-02-30\n";
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    write!(file, "{bad}").unwrap();
    file.flush().unwrap();
    let ctx = Context::new(Config::default(), Some(PathBuf::from(file.path())));
    let outcome = ctx
        .run_query(
            Query::new(Period::Month, TypeFilter::All),
            common::date("2024-03-20"),
        )
        .unwrap();
    assert!(outcome.result.items.is_empty());
    assert_eq!(outcome.issues.len(), 1);
    assert!(outcome.issues[0].is_fatal());
}
