// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::{Database, StoreState};
use crate::error::StoreError;
use crate::migrations::CURRENT_VERSION;
use crate::models::{BnplItem, Expense, LifeGoal, SavingsGoal, Subscription, WishlistItem};
use crate::store::Record;
use crate::utils::pretty_table;
use anyhow::Result;

fn check<T: Record>(db: &Database, rows: &mut Vec<Vec<String>>) {
    let name = T::COLLECTION.to_string();
    let store = db.records::<T>();
    match store.count() {
        Ok(n) => rows.push(vec![name.clone(), format!("{} records", n)]),
        Err(StoreError::StorageUnavailable(cause)) => {
            rows.push(vec![name, format!("unavailable: {}", cause)]);
            return;
        }
        Err(err) => {
            rows.push(vec![name, format!("error: {}", err)]);
            return;
        }
    }
    if let Err(err) = store.try_get_all() {
        rows.push(vec![format!("{} (undecodable)", name), err.to_string()]);
    }
}

/// Collect the doctor report as (check, detail) rows.
pub fn report(db: &Database) -> Vec<Vec<String>> {
    let state = match db.state() {
        StoreState::Failed(cause) => format!("failed: {}", cause),
        other => format!("{:?}", other).to_lowercase(),
    };
    let mut rows = vec![
        vec!["state".to_string(), state],
        vec![
            "schema".to_string(),
            format!("v{} (current v{})", db.schema_version(), CURRENT_VERSION),
        ],
    ];
    check::<Subscription>(db, &mut rows);
    check::<Expense>(db, &mut rows);
    check::<BnplItem>(db, &mut rows);
    check::<SavingsGoal>(db, &mut rows);
    check::<LifeGoal>(db, &mut rows);
    check::<WishlistItem>(db, &mut rows);
    rows
}

pub fn handle(db: &Database) -> Result<()> {
    let rows = report(db);
    println!("{}", pretty_table(&["Check", "Detail"], rows));
    if db.is_ready() && db.schema_version() == CURRENT_VERSION {
        println!("doctor: store is ready");
    } else {
        println!("doctor: store needs attention");
    }
    Ok(())
}
