// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;

use super::{amount_arg, arg, date_arg, id_arg};
use crate::dates::{days_until, format_days_until};
use crate::db::Database;
use crate::ids::next_id;
use crate::models::Expense;
use crate::summary::expense_total;
use crate::utils::{format_currency, format_date, maybe_print_json, opt_arg, pretty_table};

pub fn handle(db: &Database, m: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    let store = db.records::<Expense>();
    match m.subcommand() {
        Some(("add", sub)) => {
            let amount = amount_arg(sub, "amount")?.context("Missing --amount")?;
            let due = date_arg(sub, "due")?.context("Missing --due")?;
            let mut e = Expense::new(next_id(), arg(sub, "name")?, amount, arg(sub, "category")?, due)?
                .with_description(opt_arg(sub, "description"));
            e.added_date = Some(today);
            store.add(&e)?;
            println!(
                "Added expense '{}' ({} due {}, id {})",
                e.name,
                format_currency(e.amount),
                format_date(e.next_due),
                e.id
            );
        }
        Some(("list", sub)) => {
            let expenses = store.get_all();
            if maybe_print_json(sub.get_flag("json"), &expenses)? {
                return Ok(());
            }
            let rows = expenses
                .iter()
                .map(|e| {
                    vec![
                        e.id.to_string(),
                        e.name.clone(),
                        format_currency(e.amount),
                        e.category.clone(),
                        format_date(e.next_due),
                        format_days_until(days_until(e.next_due, today)),
                        e.description.clone().unwrap_or_default(),
                    ]
                })
                .collect();
            println!(
                "{}",
                pretty_table(
                    &["Id", "Name", "Amount", "Category", "Next due", "Due in", "Description"],
                    rows
                )
            );
            println!("Total: {}", format_currency(expense_total(&expenses)));
        }
        Some(("edit", sub)) => {
            let id = id_arg(sub)?;
            let mut e = store
                .get(&id)?
                .with_context(|| format!("No expense with id {}", id))?;
            if let Some(name) = opt_arg(sub, "name") {
                e.name = name;
            }
            if let Some(amount) = amount_arg(sub, "amount")? {
                e.amount = amount;
            }
            if let Some(category) = opt_arg(sub, "category") {
                e.category = category;
            }
            if let Some(due) = date_arg(sub, "due")? {
                e.next_due = due;
            }
            if let Some(description) = opt_arg(sub, "description") {
                e.description = Some(description);
            }
            store.update(&e)?;
            println!("Updated expense '{}' (id {})", e.name, e.id);
        }
        Some(("rm", sub)) => {
            let id = id_arg(sub)?;
            store.remove(&id)?;
            println!("Removed expense {}", id);
        }
        _ => {}
    }
    Ok(())
}
