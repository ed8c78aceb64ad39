// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use sublog::commands::{accounts, bnpl, dashboard, doctor, expenses, goals, subscriptions, wishlist};
use sublog::db::{self, Database, StoreState};
use sublog::models::{BnplItem, Expense, LifeGoal, Priority, SavingsGoal, Subscription, WishlistItem};
use sublog::{cli, utils};
use tempfile::TempDir;

fn run(db: &Database, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["sublog", "--today", "2025-01-15"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().try_get_matches_from(argv)?;
    let today = utils::as_of(&matches)?;
    match matches.subcommand() {
        Some(("sub", m)) => subscriptions::handle(db, m, today),
        Some(("expense", m)) => expenses::handle(db, m, today),
        Some(("bnpl", m)) => bnpl::handle(db, m, today),
        Some(("goal", m)) => goals::handle(db, m, today),
        Some(("wish", m)) => wishlist::handle(db, m),
        Some(("accounts", m)) => accounts::handle(db, m),
        Some(("dashboard", m)) => dashboard::dashboard(db, m, today),
        Some(("upcoming", m)) => dashboard::upcoming(db, m, today),
        Some(("calendar", m)) => dashboard::calendar_view(db, m, today),
        Some(("doctor", _)) => doctor::handle(db),
        _ => Ok(()),
    }
}

#[test]
fn subscription_commands() {
    let db = Database::open_in_memory();
    run(
        &db,
        &["sub", "add", "--name", "Netflix", "--cost", "17.99", "--next", "2025-02-01"],
    )
    .unwrap();
    let subs = db.records::<Subscription>().get_all();
    assert_eq!(subs.len(), 1);
    assert_eq!(subs[0].category, "entertainment");
    assert_eq!(subs[0].added_date, utils::parse_date("2025-01-15").ok());
    let id = subs[0].id.to_string();

    run(&db, &["sub", "edit", "--id", &id, "--cost", "19.99", "--promo-end", "2025-03-01"]).unwrap();
    let sub = &db.records::<Subscription>().get_all()[0];
    assert_eq!(sub.current_cost, Decimal::new(1999, 2));
    assert!(sub.is_promo);

    run(&db, &["sub", "edit", "--id", &id, "--no-promo"]).unwrap();
    assert!(!db.records::<Subscription>().get_all()[0].is_promo);

    run(&db, &["sub", "list"]).unwrap();
    run(&db, &["sub", "list", "--json"]).unwrap();
    run(&db, &["sub", "rm", "--id", &id]).unwrap();
    assert!(db.records::<Subscription>().get_all().is_empty());
}

#[test]
fn invalid_input_is_rejected() {
    let db = Database::open_in_memory();
    assert!(run(&db, &["sub", "add", "--name", "X", "--cost", "-1", "--next", "2025-02-01"]).is_err());
    assert!(run(&db, &["sub", "add", "--name", "X", "--cost", "1", "--next", "soon"]).is_err());
    assert!(run(&db, &["sub", "add", "--name", "X", "--cost", "1", "--next", "2025-02-01", "--cycle", "weekly"]).is_err());
    assert!(run(&db, &["bnpl", "add", "--item", "Phone", "--amount", "0", "--next", "2025-02-01"]).is_err());
    assert!(run(&db, &["sub", "edit", "--id", "123", "--cost", "2"]).is_err());
    assert!(db.records::<Subscription>().get_all().is_empty());
    assert!(db.records::<BnplItem>().get_all().is_empty());
}

#[test]
fn expense_and_bnpl_commands() {
    let db = Database::open_in_memory();
    run(
        &db,
        &["expense", "add", "--name", "Insurance", "--amount", "1200", "--due", "2025-06-01", "--category", "insurance"],
    )
    .unwrap();
    run(
        &db,
        &["bnpl", "add", "--item", "Phone", "--amount", "250.50", "--platform", "atome", "--next", "2025-01-20"],
    )
    .unwrap();

    let e = &db.records::<Expense>().get_all()[0];
    assert_eq!(e.category, "insurance");
    assert_eq!(e.added_date, Some(utils::parse_date("2025-01-15").unwrap()));
    let b = &db.records::<BnplItem>().get_all()[0];
    assert_eq!(b.total_amount, Decimal::new(25050, 2));
    assert_eq!(b.added_date, Some(utils::parse_date("2025-01-15").unwrap()));

    run(&db, &["bnpl", "edit", "--id", &b.id.to_string(), "--next", "2025-02-20"]).unwrap();
    assert_eq!(
        db.records::<BnplItem>().get_all()[0].next_payment_date,
        utils::parse_date("2025-02-20").unwrap()
    );

    run(&db, &["expense", "list"]).unwrap();
    run(&db, &["bnpl", "list"]).unwrap();
    run(&db, &["upcoming", "--days", "30"]).unwrap();
    run(&db, &["calendar", "--month", "2025-02"]).unwrap();
    run(&db, &["dashboard"]).unwrap();
    run(&db, &["dashboard", "--json"]).unwrap();
}

#[test]
fn goal_commands() {
    let db = Database::open_in_memory();
    run(
        &db,
        &["goal", "savings", "add", "--name", "Trip", "--target", "3000", "--current", "750", "--due", "2025-08-01"],
    )
    .unwrap();
    let g = &db.records::<SavingsGoal>().get_all()[0];
    assert_eq!(g.progress_percent(), Decimal::from(25));

    run(&db, &["goal", "life", "add", "--title", "Learn piano"]).unwrap();
    let id = db.records::<LifeGoal>().get_all()[0].id.to_string();
    run(&db, &["goal", "life", "progress", "--id", &id, "--value", "60"]).unwrap();
    assert_eq!(db.records::<LifeGoal>().get_all()[0].progress, 60);
    assert!(run(&db, &["goal", "life", "progress", "--id", &id, "--value", "120"]).is_err());

    run(&db, &["goal", "life", "done", "--id", &id]).unwrap();
    let goal = &db.records::<LifeGoal>().get_all()[0];
    assert!(goal.is_completed);
    assert_eq!(goal.category, "personal");

    run(&db, &["goal", "life", "list", "--completed"]).unwrap();
    run(&db, &["goal", "savings", "list"]).unwrap();
}

#[test]
fn wishlist_and_accounts_commands() {
    let db = Database::open_in_memory();
    run(
        &db,
        &["wish", "add", "--item", "Headphones", "--price", "899", "--priority", "high", "--target", "2025-05-01"],
    )
    .unwrap();
    let item = &db.records::<WishlistItem>().get_all()[0];
    assert_eq!(item.priority, Priority::High);
    let added = item.date_added;

    run(&db, &["wish", "edit", "--id", &item.id, "--priority", "low"]).unwrap();
    let edited = &db.records::<WishlistItem>().get_all()[0];
    assert_eq!(edited.priority, Priority::Low);
    assert_eq!(edited.date_added, added);
    assert!(edited.last_updated >= added);

    run(&db, &["wish", "list", "--sort", "price", "--priority", "low"]).unwrap();
    assert!(run(&db, &["wish", "list", "--sort", "cheapest"]).is_err());

    run(&db, &["accounts", "set", "--checking", "2500.75"]).unwrap();
    run(&db, &["accounts", "set", "--savings", "12500"]).unwrap();
    let balances = db.get_accounts();
    assert_eq!(balances.checking, Decimal::new(250075, 2));
    assert_eq!(balances.savings, Decimal::from(12500));
    run(&db, &["accounts", "show"]).unwrap();
    assert!(run(&db, &["accounts", "set"]).is_err());
}

#[test]
fn failed_store_degrades_reads_and_rejects_writes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.sqlite");
    std::fs::write(&path, "not sqlite at all ".repeat(512)).unwrap();
    let db = Database::open(&path);
    assert!(!db.is_ready());

    run(&db, &["sub", "list"]).unwrap();
    run(&db, &["dashboard"]).unwrap();
    run(&db, &["accounts", "show"]).unwrap();
    run(&db, &["doctor"]).unwrap();
    assert!(run(&db, &["sub", "add", "--name", "Netflix", "--cost", "17.99", "--next", "2025-02-01"]).is_err());
    assert!(run(&db, &["accounts", "set", "--checking", "10"]).is_err());

    let report = doctor::report(&db);
    assert!(report[0][1].starts_with("failed"));
}

#[test]
fn unresolvable_location_degrades_reads() {
    let db = db::open_resolved(Err(anyhow::anyhow!("Failed to create data dir")));
    assert!(!db.is_ready());
    assert!(matches!(db.state(), StoreState::Failed(cause) if cause.contains("data dir")));

    run(&db, &["sub", "list"]).unwrap();
    run(&db, &["dashboard"]).unwrap();
    run(&db, &["accounts", "show"]).unwrap();
    assert!(run(&db, &["sub", "add", "--name", "Netflix", "--cost", "17.99", "--next", "2025-02-01"]).is_err());

    assert!(matches!(Database::failed("no home").state(), StoreState::Failed(_)));
}
