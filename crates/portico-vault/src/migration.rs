// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Schema migration for decrypted credential lists.
//!
//! Early vault files stored a single `email` string per record; the
//! current shape is an `emails` list. The migration runs once, right after
//! decrypt and before typed deserialization, and is idempotent: records
//! already carrying `emails` (and anything it doesn't recognize) pass
//! through unchanged.

use serde_json::Value;
use tracing::debug;

/// Report of what the migration did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MigrationReport {
    /// Number of records rewritten from the legacy single-`email` shape.
    pub migrated: usize,
}

/// Rewrite legacy single-`email` records into the `emails`-list shape.
///
/// A record is migrated when it is an object with a string `email` field
/// and no `emails` field; the string becomes a one-element list and the
/// legacy field is removed. Everything else is returned untouched.
pub fn migrate_records(records: Vec<Value>) -> (Vec<Value>, MigrationReport) {
    let mut report = MigrationReport::default();

    let records = records
        .into_iter()
        .map(|mut record| {
            let Some(obj) = record.as_object_mut() else {
                return record;
            };
            if obj.contains_key("emails") {
                return record;
            }
            match obj.remove("email") {
                Some(Value::String(email)) => {
                    obj.insert("emails".to_string(), Value::Array(vec![Value::String(email)]));
                    report.migrated += 1;
                }
                Some(other) => {
                    // Not the shape we know; put it back untouched.
                    obj.insert("email".to_string(), other);
                }
                None => {}
            }
            record
        })
        .collect();

    if report.migrated > 0 {
        debug!(migrated = report.migrated, "migrated legacy email records");
    }

    (records, report)
}
