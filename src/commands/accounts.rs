// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::Database;
use crate::models::AccountKind;
use crate::utils::{format_currency, maybe_print_json, opt_arg, parse_decimal, pretty_table};
use anyhow::Result;

pub fn handle(db: &Database, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => {
            let balances = db.get_accounts();
            if maybe_print_json(sub.get_flag("json"), &balances)? {
                return Ok(());
            }
            let rows = vec![
                vec!["Checking".into(), format_currency(balances.checking)],
                vec!["Savings".into(), format_currency(balances.savings)],
                vec!["Total".into(), format_currency(balances.total())],
            ];
            println!("{}", pretty_table(&["Account", "Balance"], rows));
        }
        Some(("set", sub)) => {
            // Overdrawn balances are allowed.
            let checking = opt_arg(sub, "checking").map(|s| parse_decimal(&s)).transpose()?;
            let savings = opt_arg(sub, "savings").map(|s| parse_decimal(&s)).transpose()?;
            let mut balances = db.try_get_accounts()?;
            if let Some(amount) = checking {
                balances = db.update_balance(AccountKind::Checking, amount)?;
            }
            if let Some(amount) = savings {
                balances = db.update_balance(AccountKind::Savings, amount)?;
            }
            println!(
                "Balances: checking {}, savings {}",
                format_currency(balances.checking),
                format_currency(balances.savings)
            );
        }
        _ => {}
    }
    Ok(())
}
