// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command};

fn opt(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).num_args(1).help(help)
}

fn req(name: &'static str, help: &'static str) -> Arg {
    opt(name, help).required(true)
}

fn json_flag() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print JSON instead of a table")
}

fn id_arg() -> Arg {
    req("id", "Record id")
}

fn subscription_cmd() -> Command {
    Command::new("sub")
        .about("Subscriptions")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Add a subscription")
                .arg(req("name", "Service name"))
                .arg(req("cost", "Current cost per billing cycle"))
                .arg(opt("cycle", "monthly|yearly").default_value("monthly"))
                .arg(req("next", "Next payment date (YYYY-MM-DD)"))
                .arg(opt("category", "Category").default_value("entertainment"))
                .arg(
                    Arg::new("promo")
                        .long("promo")
                        .action(ArgAction::SetTrue)
                        .help("Current cost is a promotional price"),
                )
                .arg(opt("promo-end", "Promo end date (defaults to next payment)"))
                .arg(opt("regular-cost", "Cost after the promo ends")),
        )
        .subcommand(Command::new("list").about("List subscriptions").arg(json_flag()))
        .subcommand(
            Command::new("edit")
                .about("Edit a subscription")
                .arg(id_arg())
                .arg(opt("name", "Service name"))
                .arg(opt("cost", "Current cost"))
                .arg(opt("cycle", "monthly|yearly"))
                .arg(opt("next", "Next payment date"))
                .arg(opt("category", "Category"))
                .arg(opt("promo-end", "Promo end date; marks the subscription as a promo"))
                .arg(opt("regular-cost", "Cost after the promo ends"))
                .arg(
                    Arg::new("no-promo")
                        .long("no-promo")
                        .action(ArgAction::SetTrue)
                        .help("Clear promo pricing"),
                ),
        )
        .subcommand(Command::new("rm").about("Remove a subscription").arg(id_arg()))
}

fn expense_cmd() -> Command {
    Command::new("expense")
        .about("Large recurring expenses")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Add an expense")
                .arg(req("name", "Expense name"))
                .arg(req("amount", "Amount due"))
                .arg(opt("category", "Category").default_value("other"))
                .arg(req("due", "Next due date (YYYY-MM-DD)"))
                .arg(opt("description", "Description")),
        )
        .subcommand(Command::new("list").about("List expenses").arg(json_flag()))
        .subcommand(
            Command::new("edit")
                .about("Edit an expense")
                .arg(id_arg())
                .arg(opt("name", "Expense name"))
                .arg(opt("amount", "Amount due"))
                .arg(opt("category", "Category"))
                .arg(opt("due", "Next due date"))
                .arg(opt("description", "Description")),
        )
        .subcommand(Command::new("rm").about("Remove an expense").arg(id_arg()))
}

fn bnpl_cmd() -> Command {
    Command::new("bnpl")
        .about("Buy-now-pay-later installments")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Add a BNPL item")
                .arg(req("item", "Item name"))
                .arg(req("amount", "Total amount"))
                .arg(opt("platform", "Platform (grab, shopee, atome, ...)").default_value("other"))
                .arg(req("next", "Next payment date (YYYY-MM-DD)"))
                .arg(opt("description", "Description")),
        )
        .subcommand(Command::new("list").about("List BNPL items").arg(json_flag()))
        .subcommand(
            Command::new("edit")
                .about("Edit a BNPL item")
                .arg(id_arg())
                .arg(opt("item", "Item name"))
                .arg(opt("amount", "Total amount"))
                .arg(opt("platform", "Platform"))
                .arg(opt("next", "Next payment date"))
                .arg(opt("description", "Description")),
        )
        .subcommand(Command::new("rm").about("Remove a BNPL item").arg(id_arg()))
}

fn goal_cmd() -> Command {
    let savings = Command::new("savings")
        .about("Savings goals")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Add a savings goal")
                .arg(req("name", "Goal name"))
                .arg(req("target", "Target amount"))
                .arg(opt("current", "Amount saved so far").default_value("0"))
                .arg(req("due", "Due date (YYYY-MM-DD)"))
                .arg(opt("description", "Description")),
        )
        .subcommand(Command::new("list").about("List savings goals").arg(json_flag()))
        .subcommand(
            Command::new("edit")
                .about("Edit a savings goal")
                .arg(id_arg())
                .arg(opt("name", "Goal name"))
                .arg(opt("target", "Target amount"))
                .arg(opt("current", "Amount saved so far"))
                .arg(opt("due", "Due date"))
                .arg(opt("description", "Description")),
        )
        .subcommand(Command::new("rm").about("Remove a savings goal").arg(id_arg()));

    let life = Command::new("life")
        .about("Life goals")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Add a life goal")
                .arg(req("title", "Goal title"))
                .arg(opt("category", "Category").default_value("personal"))
                .arg(opt("due", "Due date (YYYY-MM-DD)"))
                .arg(opt("description", "Description")),
        )
        .subcommand(
            Command::new("list")
                .about("List life goals")
                .arg(opt("category", "Only this category"))
                .arg(
                    Arg::new("pending")
                        .long("pending")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("completed")
                        .help("Only goals not yet completed"),
                )
                .arg(
                    Arg::new("completed")
                        .long("completed")
                        .action(ArgAction::SetTrue)
                        .help("Only completed goals"),
                )
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("progress")
                .about("Set progress (0-100)")
                .arg(id_arg())
                .arg(req("value", "Progress percentage")),
        )
        .subcommand(Command::new("done").about("Mark a life goal completed").arg(id_arg()))
        .subcommand(Command::new("rm").about("Remove a life goal").arg(id_arg()));

    Command::new("goal")
        .about("Savings and life goals")
        .subcommand_required(true)
        .subcommand(savings)
        .subcommand(life)
}

fn wishlist_cmd() -> Command {
    Command::new("wish")
        .about("Wishlist")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Add a wishlist item")
                .arg(req("item", "Item name"))
                .arg(opt("price", "Estimated price").default_value("0"))
                .arg(opt("category", "Category"))
                .arg(opt("priority", "high|medium|low").default_value("medium"))
                .arg(opt("target", "Target purchase date (YYYY-MM-DD)"))
                .arg(opt("url", "Product link"))
                .arg(opt("notes", "Notes"))
                .arg(opt("description", "Description")),
        )
        .subcommand(
            Command::new("list")
                .about("List wishlist items")
                .arg(opt("priority", "Only this priority"))
                .arg(
                    opt("sort", "priority|price|target-date|date-added").default_value("date-added"),
                )
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("edit")
                .about("Edit a wishlist item")
                .arg(id_arg())
                .arg(opt("item", "Item name"))
                .arg(opt("price", "Estimated price"))
                .arg(opt("category", "Category"))
                .arg(opt("priority", "high|medium|low"))
                .arg(opt("target", "Target purchase date"))
                .arg(opt("url", "Product link"))
                .arg(opt("notes", "Notes"))
                .arg(opt("description", "Description")),
        )
        .subcommand(Command::new("rm").about("Remove a wishlist item").arg(id_arg()))
}

fn accounts_cmd() -> Command {
    Command::new("accounts")
        .about("Checking and savings balances")
        .subcommand_required(true)
        .subcommand(Command::new("show").about("Show balances").arg(json_flag()))
        .subcommand(
            Command::new("set")
                .about("Set one or both balances")
                .arg(opt("checking", "Checking balance"))
                .arg(opt("savings", "Savings balance"))
                .group(
                    clap::ArgGroup::new("balance")
                        .args(["checking", "savings"])
                        .required(true)
                        .multiple(true),
                ),
        )
}

pub fn build_cli() -> Command {
    Command::new("sublog")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Track subscriptions, expenses, BNPL installments, goals and balances locally")
        .arg(opt("db", "Database file (defaults to the platform data dir)").global(true))
        .arg(opt("today", "As-of date for due-date views (YYYY-MM-DD)").global(true))
        .subcommand(Command::new("init").about("Create or upgrade the local database"))
        .subcommand(Command::new("doctor").about("Report store state, schema version and record counts"))
        .subcommand(subscription_cmd())
        .subcommand(expense_cmd())
        .subcommand(bnpl_cmd())
        .subcommand(goal_cmd())
        .subcommand(wishlist_cmd())
        .subcommand(accounts_cmd())
        .subcommand(Command::new("dashboard").about("Balances, monthly breakdown and upcoming payments").arg(json_flag()))
        .subcommand(
            Command::new("upcoming")
                .about("Payments due soon")
                .arg(
                    Arg::new("days")
                        .long("days")
                        .num_args(1)
                        .value_parser(clap::value_parser!(i64))
                        .default_value("7")
                        .help("Look-ahead window in days"),
                )
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("calendar")
                .about("Payments grouped by day for one month")
                .arg(opt("month", "Month (YYYY-MM), defaults to the as-of month")),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        build_cli().debug_assert();
    }
}
