// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Due-date arithmetic shared by the list, summary and calendar views.

use chrono::{Datelike, NaiveDate};

/// Signed whole days from `today` until `due`; negative when overdue.
pub fn days_until(due: NaiveDate, today: NaiveDate) -> i64 {
    (due - today).num_days()
}

pub fn in_current_month(date: NaiveDate, today: NaiveDate) -> bool {
    date.year() == today.year() && date.month() == today.month()
}

pub fn in_next_month(date: NaiveDate, today: NaiveDate) -> bool {
    let (year, month) = next_month(today.year(), today.month());
    date.year() == year && date.month() == month
}

pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

pub fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let (ny, nm) = next_month(year, month);
    let first = first_of_month(year, month)?;
    let next = first_of_month(ny, nm)?;
    u32::try_from((next - first).num_days()).ok()
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("{} {}", n, unit)
    } else {
        format!("{} {}s", n, unit)
    }
}

/// Months counted as 30-day blocks, remainder in days.
fn months_and_days(days: i64) -> String {
    if days < 30 {
        return plural(days, "day");
    }
    let months = days / 30;
    let rest = days % 30;
    if rest == 0 {
        plural(months, "month")
    } else {
        format!("{} {}", plural(months, "month"), plural(rest, "day"))
    }
}

/// Payment countdown: "Due Today!", "12 days", "2 months 4 days overdue".
pub fn format_days_until(days: i64) -> String {
    match days {
        0 => "Due Today!".to_string(),
        d if d < 0 => format!("{} overdue", months_and_days(-d)),
        d => months_and_days(d),
    }
}

/// Goal countdown: months are rounded up and reported as "left".
pub fn format_remaining_time(days: i64) -> String {
    match days {
        0 => "Due today".to_string(),
        d if d < 0 => format!("{} overdue", plural(-d, "day")),
        d if d < 30 => format!("{} left", plural(d, "day")),
        d => format!("{} left", plural((d + 29) / 30, "month")),
    }
}
