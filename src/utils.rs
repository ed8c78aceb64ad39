// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rust_decimal::{Decimal, RoundingStrategy};

pub const CURRENCY: &str = "RM";

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// Parse `YYYY-MM` into (year, month).
pub fn parse_month(s: &str) -> Result<(i32, u32)> {
    let s = s.trim();
    let first = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok((chrono::Datelike::year(&first), chrono::Datelike::month(&first)))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    let s = s.trim();
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// The as-of date for derived views: `--today` if given, otherwise the local date.
pub fn as_of(m: &clap::ArgMatches) -> Result<NaiveDate> {
    match m.get_one::<String>("today") {
        Some(s) => parse_date(s),
        None => Ok(Local::now().date_naive()),
    }
}

/// Optional trimmed string argument; blank counts as absent.
pub fn opt_arg(m: &clap::ArgMatches, name: &str) -> Option<String> {
    m.get_one::<String>(name)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

pub fn format_currency(amount: Decimal) -> String {
    format!("{}{:.2}", CURRENCY, amount.round_dp(2))
}

/// Whole currency units with thousands separators, e.g. `RM12,500`.
pub fn format_currency_whole(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}{}{}", sign, CURRENCY, grouped)
}

/// Long form date, e.g. `3 January 2025`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%-d %B %Y").to_string()
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(json_flag: bool, v: &T) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_formats() {
        assert_eq!(format_currency(Decimal::new(1799, 2)), "RM17.99");
        assert_eq!(format_currency(Decimal::from(400)), "RM400.00");
        assert_eq!(format_currency_whole(Decimal::new(1250049, 2)), "RM12,500");
        assert_eq!(format_currency_whole(Decimal::from(999)), "RM999");
        assert_eq!(format_currency_whole(Decimal::from(-1000)), "-RM1,000");
    }

    #[test]
    fn long_dates() {
        let d = parse_date(" 2025-01-03 ").unwrap();
        assert_eq!(format_date(d), "3 January 2025");
    }

    #[test]
    fn months_parse() {
        assert_eq!(parse_month("2025-02").unwrap(), (2025, 2));
        assert!(parse_month("2025-13").is_err());
    }
}
