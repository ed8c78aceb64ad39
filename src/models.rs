// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Record types stored by the local store.
//!
//! Money fields are `Decimal` in memory but are written to the JSON blob as
//! plain numbers through `rust_decimal::serde::float`, i.e. via `f64`. Amounts
//! beyond about 15 significant digits lose precision on a round trip.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::dates::days_until;
use crate::error::ValidationError;
use crate::migrations::Collection;
use crate::store::Record;

fn required(field: &'static str, value: impl Into<String>) -> Result<String, ValidationError> {
    let value = value.into().trim().to_string();
    if value.is_empty() {
        return Err(ValidationError::Empty(field));
    }
    Ok(value)
}

fn non_negative(field: &'static str, value: Decimal) -> Result<Decimal, ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::Negative(field));
    }
    Ok(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    Monthly,
    Yearly,
}

impl FromStr for BillingCycle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" => Ok(BillingCycle::Monthly),
            "yearly" | "annual" => Ok(BillingCycle::Yearly),
            other => Err(format!("Unknown billing cycle '{}' (use monthly|yearly)", other)),
        }
    }
}

impl fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BillingCycle::Monthly => f.write_str("monthly"),
            BillingCycle::Yearly => f.write_str("yearly"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: i64,
    pub name: String,
    /// Written as a JSON number (f64), see the module docs.
    #[serde(with = "rust_decimal::serde::float")]
    pub current_cost: Decimal,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub regular_cost: Option<Decimal>,
    pub billing_cycle: BillingCycle,
    pub next_payment: NaiveDate,
    pub category: String,
    #[serde(default)]
    pub is_promo: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promo_end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_date: Option<NaiveDate>,
}

impl Subscription {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        current_cost: Decimal,
        billing_cycle: BillingCycle,
        next_payment: NaiveDate,
        category: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id,
            name: required("name", name)?,
            current_cost: non_negative("currentCost", current_cost)?,
            regular_cost: None,
            billing_cycle,
            next_payment,
            category: required("category", category)?,
            is_promo: false,
            promo_end_date: None,
            added_date: None,
        })
    }

    /// Mark as a promotional price that reverts to `regular_cost` after `ends`.
    pub fn with_promo(
        mut self,
        ends: NaiveDate,
        regular_cost: Option<Decimal>,
    ) -> Result<Self, ValidationError> {
        self.is_promo = true;
        self.promo_end_date = Some(ends);
        self.regular_cost = regular_cost
            .map(|c| non_negative("regularCost", c))
            .transpose()?;
        Ok(self)
    }

    /// Cost normalised to one month; yearly plans are spread over twelve.
    pub fn monthly_cost(&self) -> Decimal {
        match self.billing_cycle {
            BillingCycle::Monthly => self.current_cost,
            BillingCycle::Yearly => self.current_cost / Decimal::from(12),
        }
    }

    pub fn promo_days_left(&self, today: NaiveDate) -> Option<i64> {
        if !self.is_promo {
            return None;
        }
        self.promo_end_date.map(|end| days_until(end, today))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: i64,
    pub name: String,
    /// Stored as a JSON number, so precision ends around 15 significant digits.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub category: String,
    pub next_due: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_date: Option<NaiveDate>,
}

impl Expense {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        amount: Decimal,
        category: impl Into<String>,
        next_due: NaiveDate,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id,
            name: required("name", name)?,
            amount: non_negative("amount", amount)?,
            category: required("category", category)?,
            next_due,
            description: None,
            added_date: None,
        })
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description.filter(|d| !d.trim().is_empty());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BnplItem {
    pub id: i64,
    pub item_name: String,
    /// Stored as a JSON number, so precision ends around 15 significant digits.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub platform: String,
    pub next_payment_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_date: Option<NaiveDate>,
}

impl BnplItem {
    pub fn new(
        id: i64,
        item_name: impl Into<String>,
        total_amount: Decimal,
        platform: impl Into<String>,
        next_payment_date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let total_amount = non_negative("totalAmount", total_amount)?;
        if total_amount.is_zero() {
            return Err(ValidationError::Empty("totalAmount"));
        }
        Ok(Self {
            id,
            item_name: required("itemName", item_name)?,
            total_amount,
            platform: required("platform", platform)?,
            next_payment_date,
            description: None,
            added_date: None,
        })
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description.filter(|d| !d.trim().is_empty());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    pub id: i64,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub target_amount: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub current_amount: Decimal,
    pub due_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_date: Option<NaiveDate>,
}

impl SavingsGoal {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        target_amount: Decimal,
        current_amount: Decimal,
        due_date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id,
            name: required("name", name)?,
            target_amount: non_negative("targetAmount", target_amount)?,
            current_amount: non_negative("currentAmount", current_amount)?,
            due_date,
            description: None,
            added_date: None,
        })
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description.filter(|d| !d.trim().is_empty());
        self
    }

    /// Percentage saved, capped at 100. A zero target reports 0.
    pub fn progress_percent(&self) -> Decimal {
        if self.target_amount.is_zero() {
            return Decimal::ZERO;
        }
        let pct = self.current_amount / self.target_amount * Decimal::ONE_HUNDRED;
        pct.min(Decimal::ONE_HUNDRED)
    }

    pub fn remaining(&self) -> Decimal {
        (self.target_amount - self.current_amount).max(Decimal::ZERO)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifeGoal {
    pub id: i64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_date: Option<NaiveDate>,
}

impl LifeGoal {
    pub fn new(
        id: i64,
        title: impl Into<String>,
        category: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id,
            title: required("title", title)?,
            description: None,
            category: required("category", category)?,
            due_date: None,
            progress: 0,
            is_completed: false,
            added_date: None,
        })
    }

    pub fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = due_date;
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description.filter(|d| !d.trim().is_empty());
        self
    }

    pub fn set_progress(&mut self, progress: i64) -> Result<(), ValidationError> {
        let progress = u8::try_from(progress)
            .ok()
            .filter(|p| *p <= 100)
            .ok_or(ValidationError::OutOfRange {
                field: "progress",
                min: 0,
                max: 100,
            })?;
        self.progress = progress;
        self.is_completed = progress == 100;
        Ok(())
    }

    pub fn complete(&mut self) {
        self.progress = 100;
        self.is_completed = true;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Higher ranks sort first.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(format!("Unknown priority '{}' (use high|medium|low)", other)),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => f.write_str("high"),
            Priority::Medium => f.write_str("medium"),
            Priority::Low => f.write_str("low"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub id: String,
    pub item_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub estimated_price: Decimal,
    #[serde(default)]
    pub category: String,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub notes: String,
    pub date_added: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl WishlistItem {
    pub fn new(
        id: impl Into<String>,
        item_name: impl Into<String>,
        estimated_price: Decimal,
        category: impl Into<String>,
        priority: Priority,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: required("id", id)?,
            item_name: required("itemName", item_name)?,
            description: None,
            estimated_price: non_negative("estimatedPrice", estimated_price)?,
            category: category.into().trim().to_string(),
            priority,
            target_date: None,
            url: None,
            notes: String::new(),
            date_added: now,
            last_updated: now,
        })
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_updated = now;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    Checking,
    Savings,
}

impl FromStr for AccountKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "checking" => Ok(AccountKind::Checking),
            "savings" => Ok(AccountKind::Savings),
            other => Err(format!("Unknown account '{}' (use checking|savings)", other)),
        }
    }
}

/// The accounts singleton: two named balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Balances {
    #[serde(default, with = "rust_decimal::serde::float")]
    pub checking: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub savings: Decimal,
}

impl Balances {
    pub fn new(checking: Decimal, savings: Decimal) -> Self {
        Self { checking, savings }
    }

    pub fn total(&self) -> Decimal {
        self.checking + self.savings
    }

    pub fn with(mut self, kind: AccountKind, amount: Decimal) -> Self {
        match kind {
            AccountKind::Checking => self.checking = amount,
            AccountKind::Savings => self.savings = amount,
        }
        self
    }
}

impl Record for Subscription {
    type Id = i64;
    const COLLECTION: Collection = Collection::Subscriptions;

    fn id(&self) -> &i64 {
        &self.id
    }
}

impl Record for Expense {
    type Id = i64;
    const COLLECTION: Collection = Collection::Expenses;

    fn id(&self) -> &i64 {
        &self.id
    }
}

impl Record for BnplItem {
    type Id = i64;
    const COLLECTION: Collection = Collection::Bnpl;

    fn id(&self) -> &i64 {
        &self.id
    }
}

impl Record for SavingsGoal {
    type Id = i64;
    const COLLECTION: Collection = Collection::SavingsGoals;

    fn id(&self) -> &i64 {
        &self.id
    }
}

impl Record for LifeGoal {
    type Id = i64;
    const COLLECTION: Collection = Collection::LifeGoals;

    fn id(&self) -> &i64 {
        &self.id
    }
}

impl Record for WishlistItem {
    type Id = String;
    const COLLECTION: Collection = Collection::Wishlist;

    fn id(&self) -> &String {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn constructors_reject_missing_fields() {
        let err = Subscription::new(1, "  ", Decimal::ONE, BillingCycle::Monthly, d("2025-01-01"), "x")
            .unwrap_err();
        assert_eq!(err, ValidationError::Empty("name"));

        let err = Expense::new(1, "Rent", Decimal::NEGATIVE_ONE, "housing", d("2025-01-01")).unwrap_err();
        assert_eq!(err, ValidationError::Negative("amount"));

        let err = BnplItem::new(1, "Phone", Decimal::ZERO, "atome", d("2025-01-01")).unwrap_err();
        assert_eq!(err, ValidationError::Empty("totalAmount"));
    }

    #[test]
    fn yearly_subscription_spreads_over_twelve_months() {
        let sub = Subscription::new(
            1,
            "Domain",
            Decimal::from(120),
            BillingCycle::Yearly,
            d("2025-06-01"),
            "utilities",
        )
        .unwrap();
        assert_eq!(sub.monthly_cost(), Decimal::from(10));
    }

    #[test]
    fn promo_countdown_only_for_promos() {
        let sub = Subscription::new(1, "Max", Decimal::from(5), BillingCycle::Monthly, d("2025-02-01"), "tv")
            .unwrap();
        assert_eq!(sub.promo_days_left(d("2025-01-01")), None);
        let promo = sub.with_promo(d("2025-01-31"), Some(Decimal::from(15))).unwrap();
        assert_eq!(promo.promo_days_left(d("2025-01-01")), Some(30));
    }

    #[test]
    fn savings_progress_is_capped() {
        let mut goal =
            SavingsGoal::new(1, "Trip", Decimal::from(1000), Decimal::from(250), d("2025-12-01")).unwrap();
        assert_eq!(goal.progress_percent(), Decimal::from(25));
        goal.current_amount = Decimal::from(1500);
        assert_eq!(goal.progress_percent(), Decimal::ONE_HUNDRED);
        assert_eq!(goal.remaining(), Decimal::ZERO);
        goal.target_amount = Decimal::ZERO;
        assert_eq!(goal.progress_percent(), Decimal::ZERO);
    }

    #[test]
    fn life_goal_progress_range() {
        let mut goal = LifeGoal::new(1, "Learn piano", "personal").unwrap();
        assert!(goal.set_progress(101).is_err());
        assert!(goal.set_progress(-1).is_err());
        goal.set_progress(100).unwrap();
        assert!(goal.is_completed);
    }

    #[test]
    fn subscription_json_uses_numbers_and_camel_case() {
        let sub = Subscription::new(
            7,
            "Netflix",
            Decimal::from_str_exact("17.99").unwrap(),
            BillingCycle::Monthly,
            d("2025-03-01"),
            "entertainment",
        )
        .unwrap();
        let v = serde_json::to_value(&sub).unwrap();
        assert_eq!(v["currentCost"], serde_json::json!(17.99));
        assert_eq!(v["billingCycle"], "monthly");
        assert_eq!(v["nextPayment"], "2025-03-01");
        assert!(v.get("regularCost").is_none());
    }
}
