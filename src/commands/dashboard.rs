// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Read-only views that combine every payment collection: the dashboard,
//! the upcoming-payments list and the month calendar.

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::dates::{days_in_month, first_of_month, format_days_until};
use crate::db::Database;
use crate::models::{Balances, BnplItem, Expense, SavingsGoal, Subscription};
use crate::summary::{
    all_upcoming, calendar, combined_month_totals, MonthTotals, MonthlyOverview, UpcomingPayment,
};
use crate::utils::{
    format_currency, format_currency_whole, format_date, maybe_print_json, parse_month,
    pretty_table,
};

const DASHBOARD_WINDOW_DAYS: i64 = 7;

struct Loaded {
    subs: Vec<Subscription>,
    expenses: Vec<Expense>,
    bnpl: Vec<BnplItem>,
}

fn load(db: &Database) -> Loaded {
    Loaded {
        subs: db.records::<Subscription>().get_all(),
        expenses: db.records::<Expense>().get_all(),
        bnpl: db.records::<BnplItem>().get_all(),
    }
}

#[derive(Serialize)]
struct Dashboard {
    today: NaiveDate,
    balances: Balances,
    monthly: MonthlyOverview,
    monthly_total: rust_decimal::Decimal,
    months: MonthTotals,
    savings_goals: usize,
    upcoming: Vec<UpcomingPayment>,
}

fn upcoming_rows(payments: &[UpcomingPayment]) -> Vec<Vec<String>> {
    payments
        .iter()
        .map(|p| {
            vec![
                p.kind.to_string(),
                p.label.clone(),
                format_currency(p.amount),
                format_date(p.due),
                format_days_until(p.days_until),
            ]
        })
        .collect()
}

pub fn dashboard(db: &Database, m: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    let loaded = load(db);
    let monthly = MonthlyOverview::compute(&loaded.subs, &loaded.expenses, &loaded.bnpl);
    let view = Dashboard {
        today,
        balances: db.get_accounts(),
        monthly,
        monthly_total: monthly.total(),
        months: combined_month_totals(&loaded.subs, &loaded.expenses, &loaded.bnpl, today),
        savings_goals: db.records::<SavingsGoal>().get_all().len(),
        upcoming: all_upcoming(
            &loaded.subs,
            &loaded.expenses,
            &loaded.bnpl,
            today,
            DASHBOARD_WINDOW_DAYS,
        ),
    };
    if maybe_print_json(m.get_flag("json"), &view)? {
        return Ok(());
    }

    println!("As of {}", format_date(view.today));
    println!(
        "{}",
        pretty_table(
            &["Checking", "Savings", "Total"],
            vec![vec![
                format_currency_whole(view.balances.checking),
                format_currency_whole(view.balances.savings),
                format_currency_whole(view.balances.total()),
            ]],
        )
    );
    println!(
        "{}",
        pretty_table(
            &["Monthly", "Amount"],
            vec![
                vec!["Subscriptions".into(), format_currency(monthly.subscriptions)],
                vec!["Expenses".into(), format_currency(monthly.expenses)],
                vec!["BNPL".into(), format_currency(monthly.bnpl)],
                vec!["Total".into(), format_currency(view.monthly_total)],
            ],
        )
    );
    println!(
        "Due this month: {}  Next month: {}  Savings goals: {}",
        format_currency(view.months.current),
        format_currency(view.months.next),
        view.savings_goals
    );
    if view.upcoming.is_empty() {
        println!("No payments due in the next {} days", DASHBOARD_WINDOW_DAYS);
    } else {
        println!(
            "{}",
            pretty_table(
                &["Kind", "Name", "Amount", "Due", "In"],
                upcoming_rows(&view.upcoming)
            )
        );
    }
    Ok(())
}

pub fn upcoming(db: &Database, m: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    let days = m.get_one::<i64>("days").copied().unwrap_or(DASHBOARD_WINDOW_DAYS);
    let loaded = load(db);
    let payments = all_upcoming(&loaded.subs, &loaded.expenses, &loaded.bnpl, today, days);
    if maybe_print_json(m.get_flag("json"), &payments)? {
        return Ok(());
    }
    if payments.is_empty() {
        println!("No payments due in the next {} days", days);
        return Ok(());
    }
    println!(
        "{}",
        pretty_table(&["Kind", "Name", "Amount", "Due", "In"], upcoming_rows(&payments))
    );
    let total: rust_decimal::Decimal = payments.iter().map(|p| p.amount).sum();
    println!("Total due: {}", format_currency(total));
    Ok(())
}

pub fn calendar_view(db: &Database, m: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    let (year, month) = match m.get_one::<String>("month") {
        Some(s) => parse_month(s)?,
        None => (today.year(), today.month()),
    };
    let first = first_of_month(year, month).context("Invalid month")?;
    let month_len = days_in_month(year, month).context("Invalid month")?;
    let loaded = load(db);
    let days = calendar(year, month, &loaded.subs, &loaded.expenses, &loaded.bnpl);

    let title = first.format("%B %Y");
    if days.is_empty() {
        println!("No payments in {}", title);
        return Ok(());
    }
    let mut rows = Vec::new();
    let mut total = rust_decimal::Decimal::ZERO;
    for (day, payments) in &days {
        for p in payments {
            total += p.amount;
            rows.push(vec![
                day.to_string(),
                p.kind.to_string(),
                p.label.clone(),
                format_currency(p.amount),
            ]);
        }
    }
    println!("{}", title);
    println!("{}", pretty_table(&["Day", "Kind", "Name", "Amount"], rows));
    println!(
        "Total: {} across {} of {} days",
        format_currency(total),
        days.len(),
        month_len
    );
    Ok(())
}
