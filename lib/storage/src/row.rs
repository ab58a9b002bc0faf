//! A row is a mapping from column name to scalar value. Projection order is
//! not the row's concern; the owning table's column list decides it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use ty::Value;

/// A single stored row.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    cells: HashMap<String, Value>,
}

/// A row's identifier: its current ordinal position in the table's row
/// sequence. Not a durable key.
pub type RowId = usize;

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.cells.get(column)
    }

    pub fn set(&mut self, column: impl Into<String>, value: Value) {
        self.cells.insert(column.into(), value);
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl FromIterator<(String, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}
