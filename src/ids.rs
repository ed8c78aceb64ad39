// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Record identifiers.
//!
//! Ids stay numeric and millisecond-sized so they sort alongside ids written by
//! older builds, but two calls never return the same value within a process.
//! Uniqueness is per process only: two separate runs in the same millisecond can
//! draw the same id, and the second `add` then fails with a duplicate-key error.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

static LAST_ID: AtomicI64 = AtomicI64::new(0);

/// Next numeric id: the current Unix time in milliseconds, bumped past the last id handed out.
pub fn next_id() -> i64 {
    let now = Utc::now().timestamp_millis();
    let mut last = LAST_ID.load(Ordering::Relaxed);
    loop {
        let candidate = now.max(last + 1);
        match LAST_ID.compare_exchange_weak(last, candidate, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return candidate,
            Err(actual) => last = actual,
        }
    }
}

/// String form used by collections keyed by text ids.
pub fn next_string_id() -> String {
    next_id().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_strictly_increasing() {
        let ids: Vec<i64> = (0..1000).map(|_| next_id()).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }
}
