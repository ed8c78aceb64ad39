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
use crate::models::{BillingCycle, Subscription};
use crate::summary::subscription_monthly_total;
use crate::utils::{format_currency, format_date, maybe_print_json, opt_arg, pretty_table};

fn promo_cell(s: &Subscription, today: NaiveDate) -> String {
    match s.promo_days_left(today) {
        Some(days) => match s.regular_cost {
            Some(regular) => format!("{} then {}", format_days_until(days), format_currency(regular)),
            None => format_days_until(days),
        },
        None => String::new(),
    }
}

pub fn handle(db: &Database, m: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    let store = db.records::<Subscription>();
    match m.subcommand() {
        Some(("add", sub)) => {
            let cost = amount_arg(sub, "cost")?.context("Missing --cost")?;
            let cycle: BillingCycle = arg(sub, "cycle")?.parse().map_err(anyhow::Error::msg)?;
            let next = date_arg(sub, "next")?.context("Missing --next")?;
            let mut s = Subscription::new(next_id(), arg(sub, "name")?, cost, cycle, next, arg(sub, "category")?)?;
            s.added_date = Some(today);

            let promo_end = date_arg(sub, "promo-end")?;
            let regular = amount_arg(sub, "regular-cost")?;
            if sub.get_flag("promo") || promo_end.is_some() || regular.is_some() {
                s = s.with_promo(promo_end.unwrap_or(next), regular)?;
            }
            store.add(&s)?;
            println!(
                "Added subscription '{}' ({} {}, id {})",
                s.name,
                format_currency(s.current_cost),
                s.billing_cycle,
                s.id
            );
        }
        Some(("list", sub)) => {
            let subs = store.get_all();
            if maybe_print_json(sub.get_flag("json"), &subs)? {
                return Ok(());
            }
            let rows = subs
                .iter()
                .map(|s| {
                    vec![
                        s.id.to_string(),
                        s.name.clone(),
                        format_currency(s.current_cost),
                        s.billing_cycle.to_string(),
                        s.category.clone(),
                        format_date(s.next_payment),
                        format_days_until(days_until(s.next_payment, today)),
                        promo_cell(s, today),
                    ]
                })
                .collect();
            println!(
                "{}",
                pretty_table(
                    &["Id", "Name", "Cost", "Cycle", "Category", "Next payment", "Due in", "Promo"],
                    rows
                )
            );
            println!("Monthly total: {}", format_currency(subscription_monthly_total(&subs)));
        }
        Some(("edit", sub)) => {
            let id = id_arg(sub)?;
            let mut s = store
                .get(&id)?
                .with_context(|| format!("No subscription with id {}", id))?;
            if let Some(name) = opt_arg(sub, "name") {
                s.name = name;
            }
            if let Some(cost) = amount_arg(sub, "cost")? {
                s.current_cost = cost;
            }
            if let Some(cycle) = opt_arg(sub, "cycle") {
                s.billing_cycle = cycle.parse().map_err(anyhow::Error::msg)?;
            }
            if let Some(next) = date_arg(sub, "next")? {
                s.next_payment = next;
            }
            if let Some(category) = opt_arg(sub, "category") {
                s.category = category;
            }

            let promo_end = date_arg(sub, "promo-end")?;
            let regular = amount_arg(sub, "regular-cost")?;
            if sub.get_flag("no-promo") {
                s.is_promo = false;
                s.promo_end_date = None;
                s.regular_cost = None;
            } else if promo_end.is_some() || regular.is_some() {
                let ends = promo_end.or(s.promo_end_date).unwrap_or(s.next_payment);
                let regular = regular.or(s.regular_cost);
                s = s.with_promo(ends, regular)?;
            }
            store.update(&s)?;
            println!("Updated subscription '{}' (id {})", s.name, s.id);
        }
        Some(("rm", sub)) => {
            let id = id_arg(sub)?;
            store.remove(&id)?;
            println!("Removed subscription {}", id);
        }
        _ => {}
    }
    Ok(())
}
