// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Additive schema versions.
//!
//! Every collection and every lookup index records the schema version that
//! introduced it. Upgrading creates whatever is missing up to the target
//! version and never drops, renames or rewrites existing rows.

use std::fmt;

use rusqlite::{params, Connection};
use serde_json::Value;

use crate::error::StoreError;
use crate::legacy;

pub const CURRENT_VERSION: i32 = 4;

/// A non-unique lookup index: a TEXT column mirroring one JSON field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Index {
    pub column: &'static str,
    pub field: &'static str,
    pub since: i32,
}

const fn index(column: &'static str, field: &'static str, since: i32) -> Index {
    Index {
        column,
        field,
        since,
    }
}

const SUBSCRIPTION_INDEXES: [Index; 3] = [
    index("name", "name", 1),
    index("category", "category", 1),
    index("next_due", "nextPayment", 4),
];
const EXPENSE_INDEXES: [Index; 3] = [
    index("name", "name", 2),
    index("category", "category", 2),
    index("next_due", "nextDue", 2),
];
const BNPL_INDEXES: [Index; 2] = [
    index("name", "itemName", 2),
    index("next_due", "nextPaymentDate", 2),
];
const SAVINGS_GOAL_INDEXES: [Index; 2] = [index("name", "name", 3), index("due_date", "dueDate", 3)];
const LIFE_GOAL_INDEXES: [Index; 2] = [
    index("category", "category", 3),
    index("due_date", "dueDate", 3),
];
const WISHLIST_INDEXES: [Index; 2] = [
    index("category", "category", 4),
    index("priority", "priority", 4),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Subscriptions,
    Expenses,
    Bnpl,
    Accounts,
    SavingsGoals,
    LifeGoals,
    Wishlist,
}

impl Collection {
    pub const ALL: [Collection; 7] = [
        Collection::Subscriptions,
        Collection::Expenses,
        Collection::Bnpl,
        Collection::Accounts,
        Collection::SavingsGoals,
        Collection::LifeGoals,
        Collection::Wishlist,
    ];

    pub fn table(self) -> &'static str {
        match self {
            Collection::Subscriptions => "subscriptions",
            Collection::Expenses => "expenses",
            Collection::Bnpl => "bnpl",
            Collection::Accounts => "accounts",
            Collection::SavingsGoals => "savings_goals",
            Collection::LifeGoals => "life_goals",
            Collection::Wishlist => "wishlist",
        }
    }

    /// Schema version that introduced this collection.
    pub fn since(self) -> i32 {
        match self {
            Collection::Subscriptions => 1,
            Collection::Expenses | Collection::Bnpl | Collection::Accounts => 2,
            Collection::SavingsGoals | Collection::LifeGoals => 3,
            Collection::Wishlist => 4,
        }
    }

    fn id_type(self) -> &'static str {
        match self {
            Collection::Accounts | Collection::Wishlist => "TEXT",
            _ => "INTEGER",
        }
    }

    pub fn indexes(self) -> &'static [Index] {
        match self {
            Collection::Subscriptions => &SUBSCRIPTION_INDEXES,
            Collection::Expenses => &EXPENSE_INDEXES,
            Collection::Bnpl => &BNPL_INDEXES,
            Collection::Accounts => &[],
            Collection::SavingsGoals => &SAVINGS_GOAL_INDEXES,
            Collection::LifeGoals => &LIFE_GOAL_INDEXES,
            Collection::Wishlist => &WISHLIST_INDEXES,
        }
    }

    /// Indexes present in a database at `version`.
    pub fn indexes_at(self, version: i32) -> impl Iterator<Item = &'static Index> {
        self.indexes().iter().filter(move |i| i.since <= version)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

pub fn schema_version(conn: &Connection) -> Result<i32, StoreError> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

/// Bring the schema up to `target` and return the version now recorded.
///
/// # Errors
/// Returns an error if the marker cannot be read or any DDL statement fails.
pub fn run_migrations(conn: &Connection, target: i32) -> Result<i32, StoreError> {
    let stored = schema_version(conn)?;
    if stored > target {
        tracing::warn!(stored, target, "Schema is newer than this build; leaving it untouched");
        return Ok(stored);
    }
    if stored == target {
        return Ok(stored);
    }

    tracing::debug!(from = stored, to = target, "Upgrading schema");
    let tx = conn.unchecked_transaction()?;
    for collection in Collection::ALL {
        if collection.since() <= target {
            ensure_collection(&tx, collection, target)?;
        }
    }
    tx.pragma_update(None, "user_version", target)?;
    tx.commit()?;
    Ok(target)
}

fn ensure_collection(conn: &Connection, collection: Collection, target: i32) -> Result<(), StoreError> {
    let table = collection.table();
    let mut columns = format!("id {} PRIMARY KEY, data TEXT NOT NULL", collection.id_type());
    for idx in collection.indexes_at(target) {
        columns.push_str(&format!(", {} TEXT", idx.column));
    }
    conn.execute_batch(&format!("CREATE TABLE IF NOT EXISTS {table} ({columns});"))?;

    for idx in collection.indexes_at(target) {
        if !table_has_column(conn, table, idx.column)? {
            tracing::debug!(%collection, column = idx.column, "Adding index column");
            conn.execute_batch(&format!("ALTER TABLE {table} ADD COLUMN {} TEXT;", idx.column))?;
            backfill_index(conn, collection, idx)?;
        }
        conn.execute_batch(&format!(
            "CREATE INDEX IF NOT EXISTS idx_{table}_{col} ON {table}({col});",
            col = idx.column
        ))?;
    }
    Ok(())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> Result<bool, StoreError> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table})"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        if name == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Fill a freshly added index column from the stored JSON. `data` is only read.
fn backfill_index(conn: &Connection, collection: Collection, idx: &Index) -> Result<(), StoreError> {
    let table = collection.table();
    let mut stmt = conn.prepare(&format!("SELECT id, data FROM {table}"))?;
    let rows = stmt
        .query_map([], |r| {
            Ok((r.get::<_, rusqlite::types::Value>(0)?, r.get::<_, String>(1)?))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut update = conn.prepare(&format!("UPDATE {table} SET {} = ?1 WHERE id = ?2", idx.column))?;
    for (id, data) in rows {
        let mut value: Value = match serde_json::from_str(&data) {
            Ok(v) => v,
            Err(err) => {
                tracing::warn!(%collection, error = %err, "Skipping undecodable row during backfill");
                continue;
            }
        };
        legacy::normalize(collection, &mut value);
        update.execute(params![index_value(&value, idx.field), id])?;
    }
    Ok(())
}

/// Text form of a JSON field for an index column.
pub(crate) fn index_value(value: &Value, field: &str) -> Option<String> {
    match value.get(field)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn every_collection_exists_at_current_version() {
        for c in Collection::ALL {
            assert!(c.since() <= CURRENT_VERSION, "{c} is never created");
            for idx in c.indexes() {
                assert!(idx.since >= c.since());
            }
        }
    }

    #[test]
    fn index_value_stringifies_scalars() {
        let v = json!({"name": "Netflix", "done": true, "n": 3, "none": null});
        assert_eq!(index_value(&v, "name").as_deref(), Some("Netflix"));
        assert_eq!(index_value(&v, "done").as_deref(), Some("true"));
        assert_eq!(index_value(&v, "n").as_deref(), Some("3"));
        assert_eq!(index_value(&v, "none"), None);
        assert_eq!(index_value(&v, "missing"), None);
    }
}
