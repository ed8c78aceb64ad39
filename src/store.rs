// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Per-collection CRUD over JSON rows, plus the accounts singleton.

use std::fmt;
use std::marker::PhantomData;

use rusqlite::types::ToSql;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::db::Database;
use crate::error::StoreError;
use crate::legacy;
use crate::migrations::{index_value, Collection, Index};
use crate::models::{AccountKind, Balances};

const ACCOUNTS_KEY: &str = "accounts";

/// A record type stored in its own collection, keyed by a caller-assigned id.
pub trait Record: Serialize + DeserializeOwned {
    type Id: ToSql + fmt::Display;
    const COLLECTION: Collection;

    fn id(&self) -> &Self::Id;
}

/// CRUD handle for one collection. Obtain with [`Database::records`].
pub struct RecordStore<'a, T> {
    db: &'a Database,
    _marker: PhantomData<T>,
}

impl<'a, T: Record> RecordStore<'a, T> {
    pub(crate) fn new(db: &'a Database) -> Self {
        Self {
            db,
            _marker: PhantomData,
        }
    }

    fn conn(&self) -> Result<&'a Connection, StoreError> {
        self.db.connection_for(T::COLLECTION)
    }

    fn table(&self) -> &'static str {
        T::COLLECTION.table()
    }

    fn indexes(&self) -> Vec<&'static Index> {
        T::COLLECTION.indexes_at(self.db.schema_version()).collect()
    }

    /// Every record in the collection. Never fails: an unreadable store yields
    /// an empty list and undecodable rows are skipped, both logged.
    pub fn get_all(&self) -> Vec<T> {
        match self.load(None, true) {
            Ok(records) => records,
            Err(err) => {
                tracing::error!(collection = %T::COLLECTION, error = %err, "Reading collection failed");
                Vec::new()
            }
        }
    }

    /// Like [`get_all`](Self::get_all) but reports failures, including rows that fail to decode.
    ///
    /// # Errors
    /// Returns an error if the store is unavailable or any row cannot be decoded.
    pub fn try_get_all(&self) -> Result<Vec<T>, StoreError> {
        self.load(None, false)
    }

    /// # Errors
    /// Returns an error if the store is unavailable or the row cannot be decoded.
    pub fn get(&self, id: &T::Id) -> Result<Option<T>, StoreError> {
        let conn = self.conn()?;
        let data: Option<String> = conn
            .query_row(
                &format!("SELECT data FROM {} WHERE id = ?1", self.table()),
                params![id],
                |r| r.get(0),
            )
            .optional()?;
        data.map(|json| decode(T::COLLECTION, &json)).transpose()
    }

    /// Records whose lookup index `column` equals `value`.
    ///
    /// # Errors
    /// Returns [`StoreError::UnknownIndex`] if the collection has no such index.
    pub fn find_by(&self, column: &str, value: &str) -> Result<Vec<T>, StoreError> {
        let idx = self
            .indexes()
            .into_iter()
            .find(|i| i.column == column)
            .ok_or_else(|| StoreError::UnknownIndex {
                collection: T::COLLECTION.table(),
                column: column.to_string(),
            })?;
        self.load(Some((idx.column, value)), false)
    }

    fn load(&self, filter: Option<(&str, &str)>, lenient: bool) -> Result<Vec<T>, StoreError> {
        let conn = self.conn()?;
        let mut sql = format!("SELECT id, data FROM {}", self.table());
        if let Some((column, _)) = filter {
            sql.push_str(&format!(" WHERE {} = ?1", column));
        }
        sql.push_str(" ORDER BY id");

        let mut stmt = conn.prepare(&sql)?;
        let mut rows = match filter {
            Some((_, value)) => stmt.query(params![value])?,
            None => stmt.query([])?,
        };

        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            let data: String = r.get(1)?;
            match decode(T::COLLECTION, &data) {
                Ok(record) => out.push(record),
                Err(err) if lenient => {
                    let id: rusqlite::types::Value = r.get(0)?;
                    tracing::warn!(collection = %T::COLLECTION, ?id, error = %err, "Skipping undecodable row");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(out)
    }

    /// Insert a new record under its own id.
    ///
    /// # Errors
    /// Returns [`StoreError::DuplicateKey`] if the id is already present.
    pub fn add(&self, record: &T) -> Result<(), StoreError> {
        let conn = self.conn()?;
        let indexes = self.indexes();
        let (data, index_values) = encode(record, &indexes)?;

        let mut columns = String::from("id, data");
        let mut placeholders = String::from("?1, ?2");
        for (n, idx) in indexes.iter().enumerate() {
            columns.push_str(&format!(", {}", idx.column));
            placeholders.push_str(&format!(", ?{}", n + 3));
        }
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.table(),
            columns,
            placeholders
        );

        let mut bound: Vec<&dyn ToSql> = vec![record.id(), &data];
        bound.extend(index_values.iter().map(|v| v as &dyn ToSql));
        match conn.execute(&sql, rusqlite::params_from_iter(bound)) {
            Ok(_) => {
                tracing::debug!(collection = %T::COLLECTION, id = %record.id(), "Added record");
                Ok(())
            }
            Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
                Err(StoreError::DuplicateKey {
                    collection: T::COLLECTION.table(),
                    id: record.id().to_string(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Replace an existing record wholesale.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if no record has this id.
    pub fn update(&self, record: &T) -> Result<(), StoreError> {
        let conn = self.conn()?;
        let indexes = self.indexes();
        let (data, index_values) = encode(record, &indexes)?;

        let mut assignments = String::from("data = ?2");
        for (n, idx) in indexes.iter().enumerate() {
            assignments.push_str(&format!(", {} = ?{}", idx.column, n + 3));
        }
        let sql = format!("UPDATE {} SET {} WHERE id = ?1", self.table(), assignments);

        let mut bound: Vec<&dyn ToSql> = vec![record.id(), &data];
        bound.extend(index_values.iter().map(|v| v as &dyn ToSql));
        let changed = conn.execute(&sql, rusqlite::params_from_iter(bound))?;
        if changed == 0 {
            return Err(StoreError::NotFound {
                collection: T::COLLECTION.table(),
                id: record.id().to_string(),
            });
        }
        tracing::debug!(collection = %T::COLLECTION, id = %record.id(), "Updated record");
        Ok(())
    }

    /// Delete by id. Removing an id that does not exist is not an error.
    ///
    /// # Errors
    /// Returns an error only if the store is unavailable.
    pub fn remove(&self, id: &T::Id) -> Result<(), StoreError> {
        let conn = self.conn()?;
        let removed = conn.execute(
            &format!("DELETE FROM {} WHERE id = ?1", self.table()),
            params![id],
        )?;
        tracing::debug!(collection = %T::COLLECTION, %id, removed, "Removed record");
        Ok(())
    }

    /// Bulk save: clear the collection, then insert every record.
    ///
    /// Not atomic. If an insert fails the collection keeps only the records
    /// inserted before it; use `add`/`update`/`remove` when that matters.
    ///
    /// # Errors
    /// Returns the first error hit while clearing or inserting.
    pub fn replace_all(&self, records: &[T]) -> Result<(), StoreError> {
        let conn = self.conn()?;
        conn.execute(&format!("DELETE FROM {}", self.table()), [])?;
        for record in records {
            self.add(record)?;
        }
        Ok(())
    }

    /// # Errors
    /// Returns an error if the store is unavailable.
    pub fn count(&self) -> Result<i64, StoreError> {
        let conn = self.conn()?;
        Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {}", self.table()), [], |r| {
            r.get(0)
        })?)
    }
}

fn decode<T: DeserializeOwned>(collection: Collection, json: &str) -> Result<T, StoreError> {
    let mut value: Value = serde_json::from_str(json)?;
    legacy::normalize(collection, &mut value);
    Ok(serde_json::from_value(value)?)
}

fn encode<T: Serialize>(record: &T, indexes: &[&Index]) -> Result<(String, Vec<Option<String>>), StoreError> {
    let value = serde_json::to_value(record)?;
    let index_values = indexes.iter().map(|i| index_value(&value, i.field)).collect();
    Ok((serde_json::to_string(&value)?, index_values))
}

impl Database {
    /// Current balances, zeroed when never set or when the store is unavailable.
    pub fn get_accounts(&self) -> Balances {
        match self.try_get_accounts() {
            Ok(balances) => balances,
            Err(err) => {
                tracing::error!(error = %err, "Reading accounts failed, using zero balances");
                Balances::default()
            }
        }
    }

    /// Read the accounts singleton, writing zeroed balances on first read.
    ///
    /// # Errors
    /// Returns an error if the store is unavailable or the stored value is malformed.
    pub fn try_get_accounts(&self) -> Result<Balances, StoreError> {
        let conn = self.connection_for(Collection::Accounts)?;
        let data: Option<String> = conn
            .query_row(
                "SELECT data FROM accounts WHERE id = ?1",
                params![ACCOUNTS_KEY],
                |r| r.get(0),
            )
            .optional()?;
        match data {
            Some(json) => decode(Collection::Accounts, &json),
            None => {
                let balances = Balances::default();
                self.set_accounts(&balances)?;
                Ok(balances)
            }
        }
    }

    /// Overwrite the accounts singleton.
    ///
    /// # Errors
    /// Returns an error if the store is unavailable.
    pub fn set_accounts(&self, balances: &Balances) -> Result<(), StoreError> {
        let conn = self.connection_for(Collection::Accounts)?;
        let json = serde_json::to_string(balances)?;
        conn.execute(
            "INSERT INTO accounts(id, data) VALUES (?1, ?2)
             ON CONFLICT(id) DO UPDATE SET data = excluded.data",
            params![ACCOUNTS_KEY, json],
        )?;
        Ok(())
    }

    /// Set one balance, rewriting the whole singleton.
    ///
    /// # Errors
    /// Returns an error if the store is unavailable.
    pub fn update_balance(&self, kind: AccountKind, amount: Decimal) -> Result<Balances, StoreError> {
        let balances = self.try_get_accounts()?.with(kind, amount);
        self.set_accounts(&balances)?;
        Ok(balances)
    }
}
