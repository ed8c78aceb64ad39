// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod accounts;
pub mod bnpl;
pub mod dashboard;
pub mod doctor;
pub mod expenses;
pub mod goals;
pub mod subscriptions;
pub mod wishlist;

use anyhow::{bail, Context, Result};
use clap::ArgMatches;
use rust_decimal::Decimal;

use crate::utils::{opt_arg, parse_date, parse_decimal};

pub(crate) fn arg<'a>(m: &'a ArgMatches, name: &str) -> Result<&'a str> {
    m.get_one::<String>(name)
        .map(String::as_str)
        .with_context(|| format!("Missing --{}", name))
}

pub(crate) fn id_arg(m: &ArgMatches) -> Result<i64> {
    let raw = arg(m, "id")?.trim();
    raw.parse::<i64>()
        .with_context(|| format!("Invalid id '{}'", raw))
}

/// Optional money argument; negative amounts are rejected.
pub(crate) fn amount_arg(m: &ArgMatches, name: &str) -> Result<Option<Decimal>> {
    let Some(raw) = opt_arg(m, name) else {
        return Ok(None);
    };
    let amount = parse_decimal(&raw)?;
    if amount.is_sign_negative() && !amount.is_zero() {
        bail!("--{} must not be negative", name);
    }
    Ok(Some(amount))
}

pub(crate) fn date_arg(m: &ArgMatches, name: &str) -> Result<Option<chrono::NaiveDate>> {
    opt_arg(m, name).map(|s| parse_date(&s)).transpose()
}
