//! # Table Storage
//!
//! A table is an ordered column list (the projection/printing order), an
//! append-grown row sequence, and a map of per-column hash indexes. All row
//! mutation goes through methods here so that index maintenance can never be
//! skipped: inserts and single-cell updates maintain indexes incrementally,
//! while any row removal forces a full rebuild because row identifiers are
//! positional.

use crate::Column;
use std::collections::HashMap;
use storage::{HashIndex, Row, RowId};
use thiserror::Error;
use tracing::debug;
use ty::{DataTypeKind, Value};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("Column count does not match values count")]
    ColumnCountMismatch { expected: usize, found: usize },
    #[error("Column {column} expects {expected}")]
    TypeMismatch {
        column: String,
        expected: DataTypeKind,
    },
    #[error("Duplicate value for {constraint} column '{column}'")]
    DuplicateValue {
        column: String,
        constraint: &'static str,
    },
    #[error("Column '{column}' does not exist in table '{table}'")]
    ColumnNotFound { column: String, table: String },
}

/// A named table: schema, rows, and the indexes explicitly created on it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    table_name: String,
    columns: Vec<Column>,
    rows: Vec<Row>,
    indexes: HashMap<String, HashIndex>,
}

impl Table {
    /// Creates an empty table with the given schema. Rows and indexes start
    /// empty; indexes appear only via [`Table::build_index`].
    pub fn new(table_name: &str, columns: Vec<Column>) -> Self {
        Self {
            table_name: table_name.to_string(),
            columns,
            rows: Vec::new(),
            indexes: HashMap::new(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.column_name() == name)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The index on `column`, if one was created.
    pub fn index(&self, column: &str) -> Option<&HashIndex> {
        self.indexes.get(column)
    }

    pub fn has_any_index(&self) -> bool {
        !self.indexes.is_empty()
    }

    /// Column names that currently carry an index.
    pub fn indexed_columns(&self) -> Vec<String> {
        self.indexes.keys().cloned().collect()
    }

    /// Validates and appends a row built from `values` (one per column, in
    /// schema order).
    ///
    /// Validation happens before any mutation: value count, per-column type
    /// conformance, then a linear duplicate scan for every PRIMARY KEY or
    /// UNIQUE column. The scan is an explicit O(rows) cost per insert. On
    /// success the row is appended and every existing index on the table
    /// learns the new (value, row id) pair.
    pub fn insert(&mut self, values: Vec<Value>) -> Result<RowId, TableError> {
        if values.len() != self.columns.len() {
            return Err(TableError::ColumnCountMismatch {
                expected: self.columns.len(),
                found: values.len(),
            });
        }

        for (column, value) in self.columns.iter().zip(&values) {
            if !value.conforms_to(*column.column_type()) {
                return Err(TableError::TypeMismatch {
                    column: column.column_name().clone(),
                    expected: *column.column_type(),
                });
            }

            if column.requires_unique_values() {
                let duplicate = self
                    .rows
                    .iter()
                    .any(|row| row.get(column.column_name()) == Some(value));
                if duplicate {
                    return Err(TableError::DuplicateValue {
                        column: column.column_name().clone(),
                        constraint: column.constraint_keyword(),
                    });
                }
            }
        }

        let row: Row = self
            .columns
            .iter()
            .zip(&values)
            .map(|(column, value)| (column.column_name().clone(), value.clone()))
            .collect();

        let row_id = self.rows.len();
        self.rows.push(row);

        for (column, value) in self.columns.iter().zip(values) {
            if let Some(index) = self.indexes.get_mut(column.column_name()) {
                index.add(value, row_id);
            }
        }

        Ok(row_id)
    }

    /// Overwrites one cell, keeping the index on that column (if any) in
    /// sync: the old (value, id) pair is removed before the new one is added.
    pub fn update_cell(&mut self, row_id: RowId, column: &str, value: Value) {
        if let Some(index) = self.indexes.get_mut(column) {
            if let Some(old) = self.rows[row_id].get(column) {
                let old = old.clone();
                index.remove(&old, row_id);
            }
            index.add(value.clone(), row_id);
        }
        self.rows[row_id].set(column, value);
    }

    /// Removes the rows at `row_ids` (any order, duplicates ignored) and
    /// rebuilds every index from the surviving sequence. Removal walks the
    /// identifiers in descending order so earlier positions stay valid while
    /// later ones are spliced out.
    pub fn remove_rows(&mut self, row_ids: &[RowId]) -> usize {
        let mut ordered: Vec<RowId> = row_ids.to_vec();
        ordered.sort_unstable();
        ordered.dedup();

        let removed = ordered.len();
        for row_id in ordered.into_iter().rev() {
            if row_id < self.rows.len() {
                self.rows.remove(row_id);
            }
        }

        self.rebuild_indexes();
        removed
    }

    /// Discards every row and empties (but keeps) every index.
    pub fn clear(&mut self) -> usize {
        let removed = self.rows.len();
        self.rows.clear();
        for index in self.indexes.values_mut() {
            index.clear();
        }
        removed
    }

    /// Creates the index on `column` if absent, then fully rebuilds it from
    /// the current rows. Fails when the column is not part of the schema.
    pub fn build_index(&mut self, column: &str) -> Result<(), TableError> {
        if self.column(column).is_none() {
            return Err(TableError::ColumnNotFound {
                column: column.to_string(),
                table: self.table_name.clone(),
            });
        }

        let index = self.indexes.entry(column.to_string()).or_default();
        index.rebuild(&self.rows, column);
        debug!(table = %self.table_name, column, "built hash index");
        Ok(())
    }

    /// Drops one arbitrary index, returning the column it was on.
    pub fn drop_first_index(&mut self) -> Option<String> {
        let column = self.indexes.keys().next().cloned()?;
        self.indexes.remove(&column);
        Some(column)
    }

    fn rebuild_indexes(&mut self) {
        for (column, index) in self.indexes.iter_mut() {
            index.rebuild(&self.rows, column);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions_sorted::assert_eq;
    use ty::DataTypeKind;

    fn users_table() -> Table {
        Table::new(
            "users",
            vec![
                Column::builder()
                    .column_name("id".to_string())
                    .column_type(DataTypeKind::Integer)
                    .primary_key(true)
                    .build(),
                Column::new("name", DataTypeKind::Text),
            ],
        )
    }

    #[test]
    fn test_insert_appends_in_order() {
        let mut table = users_table();
        assert_eq!(
            table.insert(vec![Value::Integer(1), Value::from("ada")]),
            Ok(0)
        );
        assert_eq!(
            table.insert(vec![Value::Integer(2), Value::from("bob")]),
            Ok(1)
        );
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows()[0].get("name"), Some(&Value::from("ada")));
    }

    #[test]
    fn test_insert_rejects_wrong_arity() {
        let mut table = users_table();
        let err = table.insert(vec![Value::Integer(1)]).unwrap_err();
        assert_eq!(
            err,
            TableError::ColumnCountMismatch {
                expected: 2,
                found: 1
            }
        );
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_insert_rejects_wrong_type() {
        let mut table = users_table();
        let err = table
            .insert(vec![Value::from("one"), Value::from("ada")])
            .unwrap_err();
        assert_eq!(err.to_string(), "Column id expects INT");
    }

    #[test]
    fn test_insert_rejects_duplicate_primary_key() {
        let mut table = users_table();
        table
            .insert(vec![Value::Integer(1), Value::from("ada")])
            .unwrap();
        let err = table
            .insert(vec![Value::Integer(1), Value::from("bob")])
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Duplicate value for PRIMARY KEY column 'id'"
        );
        // The failing insert left no partial row behind.
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_insert_maintains_existing_index() {
        let mut table = users_table();
        table.build_index("id").unwrap();
        table
            .insert(vec![Value::Integer(5), Value::from("ada")])
            .unwrap();

        let index = table.index("id").unwrap();
        assert_eq!(index.get(&Value::Integer(5)), Some(&[0][..]));
    }

    #[test]
    fn test_update_cell_moves_index_entry() {
        let mut table = users_table();
        table
            .insert(vec![Value::Integer(1), Value::from("ada")])
            .unwrap();
        table.build_index("name").unwrap();

        table.update_cell(0, "name", Value::from("grace"));

        let index = table.index("name").unwrap();
        assert_eq!(index.get(&Value::from("ada")), None);
        assert_eq!(index.get(&Value::from("grace")), Some(&[0][..]));
        assert_eq!(table.rows()[0].get("name"), Some(&Value::from("grace")));
    }

    #[test]
    fn test_remove_rows_rebuilds_indexes() {
        let mut table = users_table();
        for (id, name) in [(1, "a"), (2, "b"), (3, "c")] {
            table
                .insert(vec![Value::Integer(id), Value::from(name)])
                .unwrap();
        }
        table.build_index("id").unwrap();

        let removed = table.remove_rows(&[0]);
        assert_eq!(removed, 1);
        assert_eq!(table.row_count(), 2);

        // Identifiers shifted down; the rebuild must reflect that.
        let index = table.index("id").unwrap();
        assert_eq!(index.get(&Value::Integer(1)), None);
        assert_eq!(index.get(&Value::Integer(2)), Some(&[0][..]));
        assert_eq!(index.get(&Value::Integer(3)), Some(&[1][..]));
    }

    #[test]
    fn test_clear_empties_rows_and_indexes() {
        let mut table = users_table();
        table
            .insert(vec![Value::Integer(1), Value::from("a")])
            .unwrap();
        table.build_index("id").unwrap();

        assert_eq!(table.clear(), 1);
        assert_eq!(table.row_count(), 0);
        assert!(table.index("id").unwrap().is_empty());
    }

    #[test]
    fn test_build_index_unknown_column() {
        let mut table = users_table();
        let err = table.build_index("nope").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Column 'nope' does not exist in table 'users'"
        );
    }
}
