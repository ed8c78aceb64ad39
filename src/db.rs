// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::migrations::{self, Collection, CURRENT_VERSION};
use crate::store::{Record, RecordStore};

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Sublog", "sublog"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("sublog.sqlite"))
}

/// Open the database at `path`, or at the platform default when `None`.
/// A default location that cannot be resolved yields a `Failed` store.
pub fn open_or_init(path: Option<&Path>) -> Database {
    let resolved = match path {
        Some(p) => Ok(p.to_path_buf()),
        None => db_path(),
    };
    open_resolved(resolved)
}

pub fn open_resolved(path: Result<PathBuf>) -> Database {
    match path {
        Ok(p) => Database::open(&p),
        Err(err) => Database::failed(format!("{:#}", err)),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreState {
    Unopened,
    Opening,
    SchemaCheck,
    Ready,
    Failed(String),
}

/// The local record store. Opening never fails outright: a database that
/// cannot be opened or upgraded ends up `Failed`, reads on it return defaults
/// and writes return [`StoreError::StorageUnavailable`].
pub struct Database {
    conn: Option<Connection>,
    state: StoreState,
    version: i32,
}

impl Database {
    fn unopened() -> Self {
        Self {
            conn: None,
            state: StoreState::Unopened,
            version: 0,
        }
    }

    /// A store that never opened, e.g. because its location could not be resolved.
    pub fn failed(cause: impl Into<String>) -> Self {
        let mut db = Self::unopened();
        db.transition(StoreState::Opening);
        db.fail(cause.into())
    }

    pub fn open(path: &Path) -> Self {
        Self::open_with_version(path, CURRENT_VERSION)
    }

    /// Open and upgrade to `target` instead of the current version.
    pub fn open_with_version(path: &Path, target: i32) -> Self {
        let mut db = Self::unopened();
        db.transition(StoreState::Opening);
        let opened = Connection::open(path).and_then(|conn| {
            configure(&conn)?;
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |r| r.get::<_, String>(0))?;
            conn.pragma_update(None, "synchronous", "NORMAL")?;
            Ok(conn)
        });
        match opened {
            Ok(conn) => db.check_schema(conn, target),
            Err(err) => db.fail(format!("open {}: {}", path.display(), err)),
        }
    }

    pub fn open_in_memory() -> Self {
        Self::open_in_memory_with_version(CURRENT_VERSION)
    }

    pub fn open_in_memory_with_version(target: i32) -> Self {
        let mut db = Self::unopened();
        db.transition(StoreState::Opening);
        match Connection::open_in_memory().and_then(|conn| configure(&conn).map(|_| conn)) {
            Ok(conn) => db.check_schema(conn, target),
            Err(err) => db.fail(format!("open in-memory database: {}", err)),
        }
    }

    fn check_schema(mut self, conn: Connection, target: i32) -> Self {
        self.transition(StoreState::SchemaCheck);
        match migrations::run_migrations(&conn, target) {
            Ok(version) => {
                self.version = version;
                self.conn = Some(conn);
                self.transition(StoreState::Ready);
                self
            }
            Err(err) => self.fail(format!("schema upgrade to v{}: {}", target, err)),
        }
    }

    fn transition(&mut self, next: StoreState) {
        tracing::debug!(from = ?self.state, to = ?next, "Store state");
        self.state = next;
    }

    fn fail(mut self, cause: String) -> Self {
        tracing::error!(%cause, "Local store unavailable");
        self.conn = None;
        self.state = StoreState::Failed(cause);
        self
    }

    pub fn state(&self) -> &StoreState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == StoreState::Ready
    }

    /// Schema version recorded in the database (0 when not open).
    pub fn schema_version(&self) -> i32 {
        self.version
    }

    pub fn connection(&self) -> Result<&Connection, StoreError> {
        match (&self.state, &self.conn) {
            (StoreState::Ready, Some(conn)) => Ok(conn),
            (StoreState::Failed(cause), _) => Err(StoreError::StorageUnavailable(cause.clone())),
            _ => Err(StoreError::StorageUnavailable("store is not open".to_string())),
        }
    }

    /// Connection for `collection`, refusing collections newer than the open schema.
    pub(crate) fn connection_for(&self, collection: Collection) -> Result<&Connection, StoreError> {
        let conn = self.connection()?;
        if collection.since() > self.version {
            return Err(StoreError::StorageUnavailable(format!(
                "collection '{}' needs schema v{}, database is at v{}",
                collection,
                collection.since(),
                self.version
            )));
        }
        Ok(conn)
    }

    pub fn records<T: Record>(&self) -> RecordStore<'_, T> {
        RecordStore::new(self)
    }
}

fn configure(conn: &Connection) -> rusqlite::Result<()> {
    conn.pragma_update(None, "foreign_keys", "ON")
}
