// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Load-time normalization of records written under older shapes.
//!
//! Runs in memory on every decoded row. The stored JSON is left alone until
//! the record is next updated, at which point it is written in the current shape.

use serde_json::{Map, Value};

use crate::migrations::Collection;

struct Shape {
    /// (current field, older names in order of preference)
    renames: &'static [(&'static str, &'static [&'static str])],
    optional: &'static [&'static str],
    numeric: &'static [&'static str],
}

const SUBSCRIPTION: Shape = Shape {
    renames: &[
        ("currentCost", &["cost"]),
        ("nextPayment", &["nextDue", "nextPaymentDate"]),
    ],
    optional: &["regularCost", "promoEndDate", "addedDate"],
    numeric: &["currentCost", "regularCost"],
};
const EXPENSE: Shape = Shape {
    renames: &[
        ("amount", &["cost"]),
        ("nextDue", &["nextPayment", "nextPaymentDate"]),
    ],
    optional: &["description", "addedDate"],
    numeric: &["amount"],
};
const BNPL: Shape = Shape {
    renames: &[
        ("itemName", &["name"]),
        ("nextPaymentDate", &["nextDue", "nextPayment"]),
    ],
    optional: &["description", "addedDate"],
    numeric: &["totalAmount"],
};
const SAVINGS_GOAL: Shape = Shape {
    renames: &[],
    optional: &["description", "addedDate"],
    numeric: &["targetAmount", "currentAmount"],
};
const LIFE_GOAL: Shape = Shape {
    renames: &[],
    optional: &["description", "dueDate", "addedDate"],
    numeric: &["progress"],
};
const WISHLIST: Shape = Shape {
    renames: &[],
    optional: &["description", "targetDate", "url"],
    numeric: &["estimatedPrice"],
};
const ACCOUNTS: Shape = Shape {
    renames: &[],
    optional: &["checking", "savings"],
    numeric: &["checking", "savings"],
};

fn shape(collection: Collection) -> &'static Shape {
    match collection {
        Collection::Subscriptions => &SUBSCRIPTION,
        Collection::Expenses => &EXPENSE,
        Collection::Bnpl => &BNPL,
        Collection::Accounts => &ACCOUNTS,
        Collection::SavingsGoals => &SAVINGS_GOAL,
        Collection::LifeGoals => &LIFE_GOAL,
        Collection::Wishlist => &WISHLIST,
    }
}

/// Rewrite `value` into the current shape for `collection`.
pub fn normalize(collection: Collection, value: &mut Value) {
    let Some(obj) = value.as_object_mut() else {
        return;
    };
    let shape = shape(collection);

    for (current, older) in shape.renames {
        let missing = matches!(obj.get(*current), None | Some(Value::Null));
        if missing {
            obj.remove(*current);
        }
        for old in *older {
            if let Some(v) = obj.remove(*old) {
                if missing && !v.is_null() && !obj.contains_key(*current) {
                    obj.insert((*current).to_string(), v);
                }
            }
        }
    }

    for field in shape.optional {
        if obj.get(*field).is_some_and(is_blank) {
            obj.remove(*field);
        }
    }

    for field in shape.numeric {
        coerce_number(obj, field);
    }
}

fn is_blank(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn coerce_number(obj: &mut Map<String, Value>, field: &str) {
    let parsed = match obj.get(field) {
        Some(Value::String(s)) => serde_json::from_str::<Value>(s.trim()).ok(),
        _ => None,
    };
    if let Some(n @ Value::Number(_)) = parsed {
        obj.insert(field.to_string(), n);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn subscription_cost_becomes_current_cost() {
        let mut v = json!({"id": 1, "name": "Spotify", "cost": 15.9, "nextDue": "2025-02-01"});
        normalize(Collection::Subscriptions, &mut v);
        assert_eq!(v["currentCost"], json!(15.9));
        assert_eq!(v["nextPayment"], json!("2025-02-01"));
        assert!(v.get("cost").is_none());
        assert!(v.get("nextDue").is_none());
    }

    #[test]
    fn current_field_wins_over_legacy_one() {
        let mut v = json!({"currentCost": 20, "cost": 10});
        normalize(Collection::Subscriptions, &mut v);
        assert_eq!(v["currentCost"], json!(20));
        assert!(v.get("cost").is_none());
    }

    #[test]
    fn blank_optionals_are_dropped_and_numbers_coerced() {
        let mut v = json!({"promoEndDate": "", "regularCost": null, "currentCost": "17.99"});
        normalize(Collection::Subscriptions, &mut v);
        assert!(v.get("promoEndDate").is_none());
        assert!(v.get("regularCost").is_none());
        assert_eq!(v["currentCost"], json!(17.99));
    }

    #[test]
    fn bnpl_fallback_dates() {
        let mut v = json!({"name": "Phone", "nextDue": "2025-04-01"});
        normalize(Collection::Bnpl, &mut v);
        assert_eq!(v["itemName"], json!("Phone"));
        assert_eq!(v["nextPaymentDate"], json!("2025-04-01"));
    }
}
