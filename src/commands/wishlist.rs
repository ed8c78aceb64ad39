// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::Utc;

use super::{amount_arg, arg, date_arg};
use crate::db::Database;
use crate::ids::next_string_id;
use crate::models::{Priority, WishlistItem};
use crate::summary::{filter_priority, high_priority_count, sort_wishlist, wishlist_total, WishlistSort};
use crate::utils::{format_currency, format_date, maybe_print_json, opt_arg, pretty_table};

pub fn handle(db: &Database, m: &clap::ArgMatches) -> Result<()> {
    let store = db.records::<WishlistItem>();
    match m.subcommand() {
        Some(("add", sub)) => {
            let price = amount_arg(sub, "price")?.unwrap_or_default();
            let priority: Priority = arg(sub, "priority")?.parse().map_err(anyhow::Error::msg)?;
            let mut item = WishlistItem::new(
                next_string_id(),
                arg(sub, "item")?,
                price,
                opt_arg(sub, "category").unwrap_or_default(),
                priority,
                Utc::now(),
            )?;
            item.target_date = date_arg(sub, "target")?;
            item.url = opt_arg(sub, "url");
            item.notes = opt_arg(sub, "notes").unwrap_or_default();
            item.description = opt_arg(sub, "description");
            store.add(&item)?;
            println!(
                "Added wishlist item '{}' ({}, {} priority, id {})",
                item.item_name,
                format_currency(item.estimated_price),
                item.priority,
                item.id
            );
        }
        Some(("list", sub)) => {
            let priority = opt_arg(sub, "priority")
                .map(|p| p.parse::<Priority>())
                .transpose()
                .map_err(anyhow::Error::msg)?;
            let sort: WishlistSort = arg(sub, "sort")?.parse().map_err(anyhow::Error::msg)?;
            let mut items = filter_priority(store.get_all(), priority);
            sort_wishlist(&mut items, sort);
            if maybe_print_json(sub.get_flag("json"), &items)? {
                return Ok(());
            }
            let rows = items
                .iter()
                .map(|i| {
                    vec![
                        i.id.clone(),
                        i.item_name.clone(),
                        format_currency(i.estimated_price),
                        i.category.clone(),
                        i.priority.to_string(),
                        i.target_date.map(format_date).unwrap_or_default(),
                        format_date(i.date_added.date_naive()),
                    ]
                })
                .collect();
            println!(
                "{}",
                pretty_table(
                    &["Id", "Item", "Price", "Category", "Priority", "Target", "Added"],
                    rows
                )
            );
            println!(
                "{} items, {} high priority, estimated total {}",
                items.len(),
                high_priority_count(&items),
                format_currency(wishlist_total(&items))
            );
        }
        Some(("edit", sub)) => {
            let id = arg(sub, "id")?.trim().to_string();
            let mut item = store
                .get(&id)?
                .with_context(|| format!("No wishlist item with id {}", id))?;
            if let Some(name) = opt_arg(sub, "item") {
                item.item_name = name;
            }
            if let Some(price) = amount_arg(sub, "price")? {
                item.estimated_price = price;
            }
            if let Some(category) = opt_arg(sub, "category") {
                item.category = category;
            }
            if let Some(priority) = opt_arg(sub, "priority") {
                item.priority = priority.parse().map_err(anyhow::Error::msg)?;
            }
            if let Some(target) = date_arg(sub, "target")? {
                item.target_date = Some(target);
            }
            if let Some(url) = opt_arg(sub, "url") {
                item.url = Some(url);
            }
            if let Some(notes) = opt_arg(sub, "notes") {
                item.notes = notes;
            }
            if let Some(description) = opt_arg(sub, "description") {
                item.description = Some(description);
            }
            item.touch(Utc::now());
            store.update(&item)?;
            println!("Updated wishlist item '{}'", item.item_name);
        }
        Some(("rm", sub)) => {
            let id = arg(sub, "id")?.trim().to_string();
            store.remove(&id)?;
            println!("Removed wishlist item {}", id);
        }
        _ => {}
    }
    Ok(())
}
