// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use sublog::models::{BillingCycle, BnplItem, Expense, LifeGoal, Priority, Subscription, WishlistItem};
use sublog::summary::{
    all_upcoming, bnpl_outstanding_total, by_category, calendar, combined_month_totals, completed,
    filter_priority, high_priority_count, month_totals, pending, sort_wishlist, upcoming,
    wishlist_total, MonthTotals, MonthlyOverview, WishlistSort,
};

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str_exact(s).unwrap()
}

fn bnpl(id: i64, amount: &str, due: &str) -> BnplItem {
    BnplItem::new(id, format!("Item {}", id), dec(amount), "atome", d(due)).unwrap()
}

fn expense(id: i64, amount: &str, due: &str) -> Expense {
    Expense::new(id, format!("Expense {}", id), dec(amount), "other", d(due)).unwrap()
}

fn sub(id: i64, cost: &str, cycle: BillingCycle, due: &str) -> Subscription {
    Subscription::new(id, format!("Sub {}", id), dec(cost), cycle, d(due), "entertainment").unwrap()
}

#[test]
fn bnpl_total_is_exact() {
    let items = vec![
        bnpl(1, "100", "2025-01-10"),
        bnpl(2, "250.50", "2025-01-20"),
        bnpl(3, "49.50", "2025-02-05"),
    ];
    assert_eq!(bnpl_outstanding_total(&items), dec("400.00"));
}

#[test]
fn monthly_overview_spreads_yearly_plans() {
    let subs = vec![
        sub(1, "17.99", BillingCycle::Monthly, "2025-01-05"),
        sub(2, "120", BillingCycle::Yearly, "2025-06-01"),
    ];
    let expenses = vec![expense(3, "500", "2025-01-28")];
    let items = vec![bnpl(4, "100", "2025-01-10")];
    let overview = MonthlyOverview::compute(&subs, &expenses, &items);
    assert_eq!(overview.subscriptions, dec("27.99"));
    assert_eq!(overview.expenses, dec("500"));
    assert_eq!(overview.bnpl, dec("100"));
    assert_eq!(overview.total(), dec("627.99"));
}

#[test]
fn month_totals_split_current_and_next() {
    let today = d("2025-01-15");
    let items = vec![
        expense(1, "100", "2025-01-20"),
        expense(2, "40", "2025-01-02"),
        expense(3, "50", "2025-02-03"),
        expense(4, "20", "2025-03-01"),
    ];
    assert_eq!(
        month_totals(&items, today),
        MonthTotals {
            current: dec("140"),
            next: dec("50"),
        }
    );
}

#[test]
fn month_totals_roll_over_the_year() {
    let today = d("2025-12-10");
    let items = vec![bnpl(1, "75", "2026-01-05"), bnpl(2, "10", "2025-01-05")];
    let totals = month_totals(&items, today);
    assert_eq!(totals.current, Decimal::ZERO);
    assert_eq!(totals.next, dec("75"));

    let subs = vec![sub(3, "9.90", BillingCycle::Monthly, "2025-12-24")];
    let combined = combined_month_totals(&subs, &[], &items, today);
    assert_eq!(combined.current, dec("9.90"));
    assert_eq!(combined.next, dec("75"));
}

#[test]
fn upcoming_window_is_inclusive_and_sorted() {
    let today = d("2025-01-01");
    let items = vec![
        expense(1, "10", "2025-01-08"),
        expense(2, "20", "2025-01-01"),
        expense(3, "30", "2025-01-09"),
        expense(4, "40", "2024-12-31"),
    ];
    let due: Vec<(String, i64)> = upcoming(&items, today, 7)
        .into_iter()
        .map(|p| (p.label, p.days_until))
        .collect();
    assert_eq!(
        due,
        vec![("Expense 2".to_string(), 0), ("Expense 1".to_string(), 7)]
    );
}

#[test]
fn all_upcoming_merges_kinds() {
    let today = d("2025-03-01");
    let subs = vec![sub(1, "17.99", BillingCycle::Monthly, "2025-03-05")];
    let expenses = vec![expense(2, "300", "2025-03-02")];
    let items = vec![bnpl(3, "80", "2025-03-03")];
    let kinds: Vec<&str> = all_upcoming(&subs, &expenses, &items, today, 7)
        .iter()
        .map(|p| p.kind)
        .collect();
    assert_eq!(kinds, vec!["expense", "bnpl", "subscription"]);
}

#[test]
fn calendar_groups_by_day() {
    let subs = vec![
        sub(1, "17.99", BillingCycle::Monthly, "2025-02-01"),
        sub(2, "9.90", BillingCycle::Monthly, "2025-03-01"),
    ];
    let expenses = vec![expense(3, "1500", "2025-02-01")];
    let items = vec![bnpl(4, "100", "2025-02-14")];
    let days = calendar(2025, 2, &subs, &expenses, &items);

    assert_eq!(days.keys().copied().collect::<Vec<_>>(), vec![1, 14]);
    assert_eq!(days[&1].len(), 2);
    assert_eq!(days[&1][0].kind, "subscription");
    assert_eq!(days[&1][1].kind, "expense");
    assert_eq!(days[&14][0].amount, dec("100"));
}

#[test]
fn life_goal_filters() {
    let mut done = LifeGoal::new(1, "Learn piano", "personal").unwrap();
    done.complete();
    let open = LifeGoal::new(2, "Run a marathon", "health").unwrap();
    let goals = vec![done, open];

    assert_eq!(completed(&goals).iter().map(|g| g.id).collect::<Vec<_>>(), vec![1]);
    assert_eq!(pending(&goals).iter().map(|g| g.id).collect::<Vec<_>>(), vec![2]);
    assert_eq!(by_category(&goals, "health").len(), 1);
    assert!(by_category(&goals, "career").is_empty());
}

fn wish(id: &str, price: &str, priority: Priority, target: Option<&str>, day: u32) -> WishlistItem {
    let added = Utc.with_ymd_and_hms(2025, 1, day, 12, 0, 0).unwrap();
    let mut item = WishlistItem::new(id, format!("Wish {}", id), dec(price), "misc", priority, added)
        .unwrap();
    item.target_date = target.map(d);
    item
}

fn ids(items: &[WishlistItem]) -> Vec<&str> {
    items.iter().map(|i| i.id.as_str()).collect()
}

#[test]
fn wishlist_sorting_and_filtering() {
    let items = vec![
        wish("a", "50", Priority::Low, Some("2025-06-01"), 1),
        wish("b", "900", Priority::High, None, 2),
        wish("c", "120", Priority::Medium, Some("2025-03-01"), 3),
    ];

    let mut sorted = items.clone();
    sort_wishlist(&mut sorted, WishlistSort::Priority);
    assert_eq!(ids(&sorted), vec!["b", "c", "a"]);

    sort_wishlist(&mut sorted, WishlistSort::Price);
    assert_eq!(ids(&sorted), vec!["b", "c", "a"]);

    sort_wishlist(&mut sorted, WishlistSort::TargetDate);
    assert_eq!(ids(&sorted), vec!["c", "a", "b"]);

    sort_wishlist(&mut sorted, WishlistSort::DateAdded);
    assert_eq!(ids(&sorted), vec!["c", "b", "a"]);

    assert_eq!(wishlist_total(&items), dec("1070"));
    assert_eq!(high_priority_count(&items), 1);
    assert_eq!(ids(&filter_priority(items.clone(), Some(Priority::Low))), vec!["a"]);
    assert_eq!(filter_priority(items, None).len(), 3);
    assert_eq!("target-date".parse::<WishlistSort>().unwrap(), WishlistSort::TargetDate);
    assert!("cheapest".parse::<WishlistSort>().is_err());
}
