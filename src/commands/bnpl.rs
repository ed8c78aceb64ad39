// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;

use super::{amount_arg, arg, date_arg, id_arg};
use crate::dates::{days_until, format_days_until};
use crate::db::Database;
use crate::ids::next_id;
use crate::models::BnplItem;
use crate::summary::bnpl_outstanding_total;
use crate::utils::{format_currency, format_date, maybe_print_json, opt_arg, pretty_table};

pub fn handle(db: &Database, m: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    let store = db.records::<BnplItem>();
    match m.subcommand() {
        Some(("add", sub)) => {
            let amount = amount_arg(sub, "amount")?.context("Missing --amount")?;
            let next = date_arg(sub, "next")?.context("Missing --next")?;
            let mut b = BnplItem::new(next_id(), arg(sub, "item")?, amount, arg(sub, "platform")?, next)?
                .with_description(opt_arg(sub, "description"));
            b.added_date = Some(today);
            store.add(&b)?;
            println!(
                "Added BNPL item '{}' ({} via {}, id {})",
                b.item_name,
                format_currency(b.total_amount),
                b.platform,
                b.id
            );
        }
        Some(("list", sub)) => {
            let items = store.get_all();
            if maybe_print_json(sub.get_flag("json"), &items)? {
                return Ok(());
            }
            let rows = items
                .iter()
                .map(|b| {
                    vec![
                        b.id.to_string(),
                        b.item_name.clone(),
                        b.platform.clone(),
                        format_currency(b.total_amount),
                        format_date(b.next_payment_date),
                        format_days_until(days_until(b.next_payment_date, today)),
                    ]
                })
                .collect();
            println!(
                "{}",
                pretty_table(&["Id", "Item", "Platform", "Amount", "Next payment", "Due in"], rows)
            );
            println!("Outstanding: {}", format_currency(bnpl_outstanding_total(&items)));
        }
        Some(("edit", sub)) => {
            let id = id_arg(sub)?;
            let mut b = store
                .get(&id)?
                .with_context(|| format!("No BNPL item with id {}", id))?;
            if let Some(item) = opt_arg(sub, "item") {
                b.item_name = item;
            }
            if let Some(amount) = amount_arg(sub, "amount")? {
                if amount.is_zero() {
                    bail!("--amount must be greater than zero");
                }
                b.total_amount = amount;
            }
            if let Some(platform) = opt_arg(sub, "platform") {
                b.platform = platform;
            }
            if let Some(next) = date_arg(sub, "next")? {
                b.next_payment_date = next;
            }
            if let Some(description) = opt_arg(sub, "description") {
                b.description = Some(description);
            }
            store.update(&b)?;
            println!("Updated BNPL item '{}' (id {})", b.item_name, b.id);
        }
        Some(("rm", sub)) => {
            let id = id_arg(sub)?;
            store.remove(&id)?;
            println!("Removed BNPL item {}", id);
        }
        _ => {}
    }
    Ok(())
}
