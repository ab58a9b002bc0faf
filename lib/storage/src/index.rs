//! # Hash Index
//!
//! An exact-match structure mapping a column value to the identifiers of the
//! rows holding it. One `HashIndex` exists per (table, column) pair, and only
//! for columns an index was explicitly created on.
//!
//! Lookups use strict [`Value`] equality; the WHERE-clause coercion rule does
//! not apply here, which is fine because the executor only routes `=`
//! predicates through the index.

use crate::row::{Row, RowId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;
use ty::Value;

/// Value → ordered list of row identifiers sharing that value.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashIndex {
    entries: HashMap<Value, Vec<RowId>>,
}

impl HashIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifiers of the rows holding `value`, if any.
    pub fn get(&self, value: &Value) -> Option<&[RowId]> {
        self.entries.get(value).map(Vec::as_slice)
    }

    /// Appends `row_id` to the identifier list for `value`, creating the
    /// entry if it is new.
    pub fn add(&mut self, value: Value, row_id: RowId) {
        self.entries.entry(value).or_default().push(row_id);
    }

    /// Removes `row_id` from the identifier list for `value`. When the list
    /// empties, the entry itself is dropped.
    pub fn remove(&mut self, value: &Value, row_id: RowId) {
        if let Some(row_ids) = self.entries.get_mut(value) {
            row_ids.retain(|id| *id != row_id);
            if row_ids.is_empty() {
                self.entries.remove(value);
            }
        }
    }

    /// Clears all entries and repopulates from `rows` on `column`, assigning
    /// each row its current ordinal position as identifier.
    ///
    /// Mandatory after any row removal: identifiers are positional, and every
    /// identifier after the removed row has shifted.
    pub fn rebuild(&mut self, rows: &[Row], column: &str) {
        self.entries.clear();
        for (row_id, row) in rows.iter().enumerate() {
            if let Some(value) = row.get(column) {
                self.entries.entry(value.clone()).or_default().push(row_id);
            }
        }
        debug!(column, rows = rows.len(), "rebuilt hash index");
    }

    /// Empties the structure. Used for a table-wide DELETE without filter.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of distinct indexed values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
