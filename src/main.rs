// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use anyhow::Result;

use smartfin::{cli, commands, config::Config, logging};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    logging::init(matches.get_count("verbose"));

    let config = Config::load()?;
    let data = matches.get_one::<String>("data").map(PathBuf::from);
    let ctx = commands::Context::new(config, data);

    match matches.subcommand() {
        Some(("tx", sub)) => commands::transactions::handle(&ctx, sub)?,
        Some(("report", sub)) => commands::reports::handle(&ctx, sub)?,
        Some(("fixed", sub)) => commands::fixed::handle(&ctx, sub)?,
        Some(("goals", sub)) => commands::goals::handle(&ctx, sub)?,
        Some(("bills", sub)) => commands::bills::handle(&ctx, sub)?,
        Some(("config", sub)) => commands::config::handle(&ctx, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
