// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Error types for the record store and record constructors.

use thiserror::Error;

/// Errors raised by the local record store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("{collection}: record '{id}' already exists")]
    DuplicateKey { collection: &'static str, id: String },

    #[error("{collection}: record '{id}' not found")]
    NotFound { collection: &'static str, id: String },

    #[error("{collection}: no lookup index on '{column}'")]
    UnknownIndex {
        collection: &'static str,
        column: String,
    },

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Raised when a record cannot be constructed from the supplied fields.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("'{0}' must not be empty")]
    Empty(&'static str),

    #[error("'{0}' must not be negative")]
    Negative(&'static str),

    #[error("'{field}' must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },
}
