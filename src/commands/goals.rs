// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;

use super::{amount_arg, arg, date_arg, id_arg};
use crate::dates::{days_until, format_remaining_time};
use crate::db::Database;
use crate::ids::next_id;
use crate::models::{LifeGoal, SavingsGoal};
use crate::summary::{by_category, completed, pending};
use crate::utils::{format_currency, format_date, maybe_print_json, opt_arg, pretty_table};

pub fn handle(db: &Database, m: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    match m.subcommand() {
        Some(("savings", sub)) => savings(db, sub, today),
        Some(("life", sub)) => life(db, sub, today),
        _ => Ok(()),
    }
}

fn savings(db: &Database, m: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    let store = db.records::<SavingsGoal>();
    match m.subcommand() {
        Some(("add", sub)) => {
            let target = amount_arg(sub, "target")?.context("Missing --target")?;
            let current = amount_arg(sub, "current")?.unwrap_or_default();
            let due = date_arg(sub, "due")?.context("Missing --due")?;
            let mut g = SavingsGoal::new(next_id(), arg(sub, "name")?, target, current, due)?
                .with_description(opt_arg(sub, "description"));
            g.added_date = Some(today);
            store.add(&g)?;
            println!(
                "Added savings goal '{}' ({} by {}, id {})",
                g.name,
                format_currency(g.target_amount),
                format_date(g.due_date),
                g.id
            );
        }
        Some(("list", sub)) => {
            let goals = store.get_all();
            if maybe_print_json(sub.get_flag("json"), &goals)? {
                return Ok(());
            }
            let rows = goals
                .iter()
                .map(|g| {
                    vec![
                        g.id.to_string(),
                        g.name.clone(),
                        format_currency(g.current_amount),
                        format_currency(g.target_amount),
                        format!("{}%", g.progress_percent().round_dp(0)),
                        format_date(g.due_date),
                        format_remaining_time(days_until(g.due_date, today)),
                    ]
                })
                .collect();
            println!(
                "{}",
                pretty_table(
                    &["Id", "Name", "Saved", "Target", "Progress", "Due", "Time left"],
                    rows
                )
            );
        }
        Some(("edit", sub)) => {
            let id = id_arg(sub)?;
            let mut g = store
                .get(&id)?
                .with_context(|| format!("No savings goal with id {}", id))?;
            if let Some(name) = opt_arg(sub, "name") {
                g.name = name;
            }
            if let Some(target) = amount_arg(sub, "target")? {
                g.target_amount = target;
            }
            if let Some(current) = amount_arg(sub, "current")? {
                g.current_amount = current;
            }
            if let Some(due) = date_arg(sub, "due")? {
                g.due_date = due;
            }
            if let Some(description) = opt_arg(sub, "description") {
                g.description = Some(description);
            }
            store.update(&g)?;
            println!(
                "Updated savings goal '{}' ({}% saved)",
                g.name,
                g.progress_percent().round_dp(0)
            );
        }
        Some(("rm", sub)) => {
            let id = id_arg(sub)?;
            store.remove(&id)?;
            println!("Removed savings goal {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn life(db: &Database, m: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    let store = db.records::<LifeGoal>();
    match m.subcommand() {
        Some(("add", sub)) => {
            let mut g = LifeGoal::new(next_id(), arg(sub, "title")?, arg(sub, "category")?)?
                .with_due_date(date_arg(sub, "due")?)
                .with_description(opt_arg(sub, "description"));
            g.added_date = Some(today);
            store.add(&g)?;
            println!("Added life goal '{}' ({}, id {})", g.title, g.category, g.id);
        }
        Some(("list", sub)) => {
            let all = store.get_all();
            let mut goals: Vec<&LifeGoal> = match opt_arg(sub, "category") {
                Some(category) => by_category(&all, &category),
                None => all.iter().collect(),
            };
            if sub.get_flag("pending") {
                let keep = pending(&all);
                goals.retain(|g| keep.iter().any(|k| k.id == g.id));
            } else if sub.get_flag("completed") {
                let keep = completed(&all);
                goals.retain(|g| keep.iter().any(|k| k.id == g.id));
            }
            if maybe_print_json(sub.get_flag("json"), &goals)? {
                return Ok(());
            }
            let rows = goals
                .iter()
                .map(|g| {
                    vec![
                        g.id.to_string(),
                        g.title.clone(),
                        g.category.clone(),
                        format!("{}%", g.progress),
                        g.due_date.map(format_date).unwrap_or_default(),
                        match (g.is_completed, g.due_date) {
                            (true, _) => "Completed".to_string(),
                            (false, Some(due)) => format_remaining_time(days_until(due, today)),
                            (false, None) => String::new(),
                        },
                    ]
                })
                .collect();
            println!(
                "{}",
                pretty_table(&["Id", "Title", "Category", "Progress", "Due", "Status"], rows)
            );
            println!("{} of {} completed", completed(&all).len(), all.len());
        }
        Some(("progress", sub)) => {
            let id = id_arg(sub)?;
            let raw = arg(sub, "value")?.trim();
            let value: i64 = raw
                .parse()
                .with_context(|| format!("Invalid progress '{}'", raw))?;
            let mut g = store
                .get(&id)?
                .with_context(|| format!("No life goal with id {}", id))?;
            g.set_progress(value)?;
            store.update(&g)?;
            println!("Life goal '{}' at {}%", g.title, g.progress);
        }
        Some(("done", sub)) => {
            let id = id_arg(sub)?;
            let mut g = store
                .get(&id)?
                .with_context(|| format!("No life goal with id {}", id))?;
            g.complete();
            store.update(&g)?;
            println!("Completed life goal '{}'", g.title);
        }
        Some(("rm", sub)) => {
            let id = id_arg(sub)?;
            store.remove(&id)?;
            println!("Removed life goal {}", id);
        }
        _ => {}
    }
    Ok(())
}
