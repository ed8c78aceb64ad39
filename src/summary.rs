// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Totals, upcoming payments and calendar grouping over loaded records.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::dates::{days_until, in_current_month, in_next_month};
use crate::models::{BnplItem, Expense, LifeGoal, Priority, Subscription, WishlistItem};

/// Anything with a next payment date and an amount due on it.
pub trait Scheduled {
    fn due_date(&self) -> NaiveDate;
    fn amount_due(&self) -> Decimal;
    fn label(&self) -> &str;
    fn kind(&self) -> &'static str;
}

impl Scheduled for Subscription {
    fn due_date(&self) -> NaiveDate {
        self.next_payment
    }
    fn amount_due(&self) -> Decimal {
        self.current_cost
    }
    fn label(&self) -> &str {
        &self.name
    }
    fn kind(&self) -> &'static str {
        "subscription"
    }
}

impl Scheduled for Expense {
    fn due_date(&self) -> NaiveDate {
        self.next_due
    }
    fn amount_due(&self) -> Decimal {
        self.amount
    }
    fn label(&self) -> &str {
        &self.name
    }
    fn kind(&self) -> &'static str {
        "expense"
    }
}

impl Scheduled for BnplItem {
    fn due_date(&self) -> NaiveDate {
        self.next_payment_date
    }
    fn amount_due(&self) -> Decimal {
        self.total_amount
    }
    fn label(&self) -> &str {
        &self.item_name
    }
    fn kind(&self) -> &'static str {
        "bnpl"
    }
}

pub fn subscription_monthly_total(subs: &[Subscription]) -> Decimal {
    subs.iter().map(Subscription::monthly_cost).sum()
}

pub fn expense_total(expenses: &[Expense]) -> Decimal {
    expenses.iter().map(|e| e.amount).sum()
}

pub fn bnpl_outstanding_total(items: &[BnplItem]) -> Decimal {
    items.iter().map(|b| b.total_amount).sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyOverview {
    pub subscriptions: Decimal,
    pub expenses: Decimal,
    pub bnpl: Decimal,
}

impl MonthlyOverview {
    pub fn compute(subs: &[Subscription], expenses: &[Expense], bnpl: &[BnplItem]) -> Self {
        Self {
            subscriptions: subscription_monthly_total(subs),
            expenses: expense_total(expenses),
            bnpl: bnpl_outstanding_total(bnpl),
        }
    }

    pub fn total(&self) -> Decimal {
        self.subscriptions + self.expenses + self.bnpl
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MonthTotals {
    pub current: Decimal,
    pub next: Decimal,
}

/// Amounts due in the calendar month of `today` and the one after it.
pub fn month_totals<T: Scheduled>(items: &[T], today: NaiveDate) -> MonthTotals {
    let mut totals = MonthTotals::default();
    for item in items {
        let due = item.due_date();
        if in_current_month(due, today) {
            totals.current += item.amount_due();
        } else if in_next_month(due, today) {
            totals.next += item.amount_due();
        }
    }
    totals
}

impl std::ops::Add for MonthTotals {
    type Output = MonthTotals;

    fn add(self, other: MonthTotals) -> MonthTotals {
        MonthTotals {
            current: self.current + other.current,
            next: self.next + other.next,
        }
    }
}

/// Month totals across subscriptions, expenses and BNPL items together.
pub fn combined_month_totals(
    subs: &[Subscription],
    expenses: &[Expense],
    bnpl: &[BnplItem],
    today: NaiveDate,
) -> MonthTotals {
    month_totals(subs, today) + month_totals(expenses, today) + month_totals(bnpl, today)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpcomingPayment {
    pub kind: &'static str,
    pub label: String,
    pub due: NaiveDate,
    pub amount: Decimal,
    pub days_until: i64,
}

/// Payments due between today and `within_days` from now, soonest first.
pub fn upcoming<T: Scheduled>(items: &[T], today: NaiveDate, within_days: i64) -> Vec<UpcomingPayment> {
    let mut out: Vec<UpcomingPayment> = items
        .iter()
        .map(|item| UpcomingPayment {
            kind: item.kind(),
            label: item.label().to_string(),
            due: item.due_date(),
            amount: item.amount_due(),
            days_until: days_until(item.due_date(), today),
        })
        .filter(|p| (0..=within_days).contains(&p.days_until))
        .collect();
    out.sort_by_key(|p| p.days_until);
    out
}

/// Upcoming payments of every kind, merged and ordered soonest first.
pub fn all_upcoming(
    subs: &[Subscription],
    expenses: &[Expense],
    bnpl: &[BnplItem],
    today: NaiveDate,
    within_days: i64,
) -> Vec<UpcomingPayment> {
    let mut out = upcoming(subs, today, within_days);
    out.extend(upcoming(expenses, today, within_days));
    out.extend(upcoming(bnpl, today, within_days));
    out.sort_by_key(|p| p.days_until);
    out
}

/// Payments in one month grouped by day of month.
pub fn calendar(
    year: i32,
    month: u32,
    subs: &[Subscription],
    expenses: &[Expense],
    bnpl: &[BnplItem],
) -> BTreeMap<u32, Vec<UpcomingPayment>> {
    let mut days: BTreeMap<u32, Vec<UpcomingPayment>> = BTreeMap::new();
    let mut push = |item: &dyn Scheduled| {
        let due = item.due_date();
        if due.year() == year && due.month() == month {
            days.entry(due.day()).or_default().push(UpcomingPayment {
                kind: item.kind(),
                label: item.label().to_string(),
                due,
                amount: item.amount_due(),
                days_until: 0,
            });
        }
    };
    for s in subs {
        push(s);
    }
    for e in expenses {
        push(e);
    }
    for b in bnpl {
        push(b);
    }
    days
}

pub fn completed(goals: &[LifeGoal]) -> Vec<&LifeGoal> {
    goals.iter().filter(|g| g.is_completed).collect()
}

pub fn pending(goals: &[LifeGoal]) -> Vec<&LifeGoal> {
    goals.iter().filter(|g| !g.is_completed).collect()
}

pub fn by_category<'a>(goals: &'a [LifeGoal], category: &str) -> Vec<&'a LifeGoal> {
    goals.iter().filter(|g| g.category == category).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WishlistSort {
    Priority,
    Price,
    TargetDate,
    #[default]
    DateAdded,
}

impl FromStr for WishlistSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "priority" => Ok(WishlistSort::Priority),
            "price" => Ok(WishlistSort::Price),
            "target" | "target-date" | "targetdate" => Ok(WishlistSort::TargetDate),
            "added" | "date-added" | "dateadded" => Ok(WishlistSort::DateAdded),
            other => Err(format!(
                "Unknown sort '{}' (use priority|price|target-date|date-added)",
                other
            )),
        }
    }
}

pub fn filter_priority(items: Vec<WishlistItem>, priority: Option<Priority>) -> Vec<WishlistItem> {
    match priority {
        Some(p) => items.into_iter().filter(|i| i.priority == p).collect(),
        None => items,
    }
}

pub fn sort_wishlist(items: &mut [WishlistItem], by: WishlistSort) {
    match by {
        WishlistSort::Priority => items.sort_by(|a, b| b.priority.rank().cmp(&a.priority.rank())),
        WishlistSort::Price => items.sort_by(|a, b| b.estimated_price.cmp(&a.estimated_price)),
        WishlistSort::TargetDate => items.sort_by(|a, b| match (a.target_date, b.target_date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        }),
        WishlistSort::DateAdded => items.sort_by(|a, b| b.date_added.cmp(&a.date_added)),
    }
}

pub fn wishlist_total(items: &[WishlistItem]) -> Decimal {
    items.iter().map(|i| i.estimated_price).sum()
}

pub fn high_priority_count(items: &[WishlistItem]) -> usize {
    items.iter().filter(|i| i.priority == Priority::High).count()
}
