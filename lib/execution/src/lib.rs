//! # Statement Execution
//!
//! The [`Executor`] owns the catalog and the session selection, and
//! dispatches each recognized statement to its handler. Execution is fully
//! synchronous: a statement runs to completion before the next one is
//! accepted, and the engine takes no locks because it assumes one logical
//! caller. A host serving concurrent clients must serialize calls itself.
//!
//! Every handler validates before it mutates, so a failing statement never
//! leaves a partial row or a half-updated index behind.

pub mod error;
pub mod output;

pub use error::ExecutionError;
pub use output::{Record, StatementOutput};

use catalog::{Catalog, Column, Database, Session, Table};
use compile::{
    parse, ColumnDef, ComparisonOp, JoinClause, Projection, Statement, WhereClause,
};
use storage::{Row, RowId};
use tracing::debug;
use ty::Value;

/// The engine core: recognizer in front, catalog behind.
#[derive(Debug, Default)]
pub struct Executor {
    catalog: Catalog,
    session: Session,
}

impl Executor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access for hosts and tests that want to inspect engine state.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Recognizes and executes one statement line.
    pub fn run(&mut self, input: &str) -> Result<StatementOutput, ExecutionError> {
        let statement = parse(input)?.ok_or(ExecutionError::UnsupportedStatement)?;
        self.execute(statement)
    }

    /// Executes an already-recognized statement.
    pub fn execute(&mut self, statement: Statement) -> Result<StatementOutput, ExecutionError> {
        debug!(?statement, "executing");
        match statement {
            Statement::CreateDatabase { name } => {
                self.catalog.create_database(&name)?;
                Ok(StatementOutput::message(format!(
                    "Database '{}' created",
                    name
                )))
            }
            Statement::DropDatabase { name } => {
                self.catalog.drop_database(&name, &mut self.session)?;
                Ok(StatementOutput::message(format!(
                    "Database '{}' dropped",
                    name
                )))
            }
            Statement::UseDatabase { name } => {
                self.catalog.use_database(&name, &mut self.session)?;
                Ok(StatementOutput::message(format!(
                    "Using database '{}'",
                    name
                )))
            }
            Statement::ListDatabases => Ok(name_records(self.catalog.database_names())),
            Statement::ShowTables => {
                let db = self.catalog.current_database(&self.session)?;
                Ok(name_records(db.table_names()))
            }
            Statement::DescribeTable { table_name } => self.describe_table(&table_name),
            Statement::CreateTable {
                table_name,
                columns,
            } => self.create_table(&table_name, columns),
            Statement::DropTable { table_name } => {
                let db = self.catalog.current_database_mut(&self.session)?;
                db.drop_table(&table_name)?;
                Ok(StatementOutput::message(format!(
                    "Table '{}' dropped",
                    table_name
                )))
            }
            Statement::CreateIndex {
                index_name,
                table_name,
                column_name,
            } => self.create_index(&index_name, &table_name, &column_name),
            Statement::DropIndex { index_name } => self.drop_index(&index_name),
            Statement::Insert { table_name, values } => self.insert(&table_name, values),
            Statement::Update {
                table_name,
                column_name,
                value,
                where_clause,
            } => self.update(&table_name, &column_name, value, where_clause),
            Statement::Delete {
                table_name,
                where_clause,
            } => self.delete(&table_name, where_clause),
            Statement::Select {
                projection,
                table_name,
                join_clause,
                where_clause,
            } => self.select(projection, &table_name, join_clause, where_clause),
        }
    }

    fn create_table(
        &mut self,
        table_name: &str,
        columns: Vec<ColumnDef>,
    ) -> Result<StatementOutput, ExecutionError> {
        let db = self.catalog.current_database_mut(&self.session)?;
        let columns = columns
            .into_iter()
            .map(|def| {
                Column::builder()
                    .column_name(def.name)
                    .column_type(def.data_type)
                    .primary_key(def.primary_key)
                    .unique(def.unique)
                    .build()
            })
            .collect();
        db.create_table(Table::new(table_name, columns))?;
        Ok(StatementOutput::message(format!(
            "Table '{}' created",
            table_name
        )))
    }

    fn describe_table(&self, table_name: &str) -> Result<StatementOutput, ExecutionError> {
        let db = self.catalog.current_database(&self.session)?;
        let table = db.table(table_name)?;

        let records = table
            .columns()
            .iter()
            .map(|column| {
                let mut record = Record::new();
                record.push("column", Value::from(column.column_name().as_str()));
                record.push("type", Value::from(column.column_type().to_string()));
                record.push("primary_key", yes_no(*column.primary_key()));
                record.push("unique", yes_no(*column.unique()));
                record
            })
            .collect();
        Ok(StatementOutput::Rows(records))
    }

    fn create_index(
        &mut self,
        index_name: &str,
        table_name: &str,
        column_name: &str,
    ) -> Result<StatementOutput, ExecutionError> {
        let db = self.catalog.current_database_mut(&self.session)?;
        let table = db.table_mut(table_name)?;
        table.build_index(column_name)?;
        Ok(StatementOutput::message(format!(
            "Index '{}' created on column '{}'",
            index_name, column_name
        )))
    }

    /// Drops the first index found on the first table (in catalog order)
    /// that has one, regardless of which index the caller named. This
    /// mirrors the engine's historical behavior; indexes are stored per
    /// column and their creation names are not retained, so the name cannot
    /// be resolved. Fails only when no table has any index at all.
    fn drop_index(&mut self, index_name: &str) -> Result<StatementOutput, ExecutionError> {
        let db = self.catalog.current_database_mut(&self.session)?;
        for table in db.tables_mut() {
            if let Some(column) = table.drop_first_index() {
                debug!(%column, "dropped index");
                return Ok(StatementOutput::message(format!(
                    "Index '{}' dropped",
                    index_name
                )));
            }
        }
        Err(ExecutionError::IndexNotFound {
            name: index_name.to_string(),
        })
    }

    fn insert(
        &mut self,
        table_name: &str,
        values: Vec<Value>,
    ) -> Result<StatementOutput, ExecutionError> {
        let db = self.catalog.current_database_mut(&self.session)?;
        let table = db.table_mut(table_name)?;
        table.insert(values)?;
        Ok(StatementOutput::message("1 row inserted"))
    }

    fn update(
        &mut self,
        table_name: &str,
        column_name: &str,
        value: Value,
        where_clause: Option<WhereClause>,
    ) -> Result<StatementOutput, ExecutionError> {
        let db = self.catalog.current_database_mut(&self.session)?;
        let table = db.table_mut(table_name)?;

        let matched: Vec<RowId> = table
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, row)| row_matches(row, where_clause.as_ref()))
            .map(|(row_id, _)| row_id)
            .collect();

        for &row_id in &matched {
            table.update_cell(row_id, column_name, value.clone());
        }

        Ok(StatementOutput::message(format!(
            "{} row(s) updated",
            matched.len()
        )))
    }

    fn delete(
        &mut self,
        table_name: &str,
        where_clause: Option<WhereClause>,
    ) -> Result<StatementOutput, ExecutionError> {
        let db = self.catalog.current_database_mut(&self.session)?;
        let table = db.table_mut(table_name)?;

        let removed = match where_clause {
            Some(clause) => {
                let matched: Vec<RowId> = table
                    .rows()
                    .iter()
                    .enumerate()
                    .filter(|(_, row)| row_matches(row, Some(&clause)))
                    .map(|(row_id, _)| row_id)
                    .collect();
                table.remove_rows(&matched)
            }
            None => table.clear(),
        };

        Ok(StatementOutput::message(format!(
            "{} row(s) deleted",
            removed
        )))
    }

    fn select(
        &self,
        projection: Projection,
        table_name: &str,
        join_clause: Option<JoinClause>,
        where_clause: Option<WhereClause>,
    ) -> Result<StatementOutput, ExecutionError> {
        let db = self.catalog.current_database(&self.session)?;

        if let Some(join) = join_clause {
            return select_with_join(db, &projection, &join, where_clause.as_ref());
        }

        let table = db.table(table_name)?;
        let filtered = filter_rows(table, where_clause.as_ref());

        let records = filtered
            .into_iter()
            .map(|row| project_row(table, row, &projection))
            .collect();
        Ok(StatementOutput::Rows(records))
    }
}

/// Rows of `table` passing the WHERE clause. An equality predicate on an
/// indexed column goes through the index (exact value match, cost
/// proportional to the number of hits); everything else is a full scan under
/// the coerced comparison rule. Index usage never changes which rows
/// qualify for an `=` on values of the column's own type, only how they are
/// found.
fn filter_rows<'t>(table: &'t Table, where_clause: Option<&WhereClause>) -> Vec<&'t Row> {
    let Some(clause) = where_clause else {
        return table.rows().iter().collect();
    };

    if clause.operator == ComparisonOp::Eq {
        if let Some(index) = table.index(&clause.column) {
            return index
                .get(&clause.value)
                .unwrap_or(&[])
                .iter()
                .filter_map(|&row_id| table.rows().get(row_id))
                .collect();
        }
    }

    table
        .rows()
        .iter()
        .filter(|row| row_matches(row, Some(clause)))
        .collect()
}

fn row_matches(row: &Row, where_clause: Option<&WhereClause>) -> bool {
    match where_clause {
        None => true,
        Some(clause) => row
            .get(&clause.column)
            .map(|value| clause.matches(value))
            .unwrap_or(false),
    }
}

fn project_row(table: &Table, row: &Row, projection: &Projection) -> Record {
    match projection {
        Projection::All => table
            .columns()
            .iter()
            .filter_map(|column| {
                row.get(column.column_name())
                    .map(|value| (column.column_name().clone(), value.clone()))
            })
            .collect(),
        Projection::Columns(names) => names
            .iter()
            .filter_map(|name| row.get(name).map(|value| (name.clone(), value.clone())))
            .collect(),
    }
}

/// Nested-loop inner equi-join over exactly two tables. Join columns pair on
/// strict value equality. The optional WHERE is applied to the combined
/// record by scanning its fields in order and accepting the pair as soon as
/// any single field satisfies the comparison; the clause's column name is
/// not consulted. That narrow filter is the engine's historical behavior,
/// kept deliberately and pinned by tests.
fn select_with_join(
    db: &Database,
    projection: &Projection,
    join: &JoinClause,
    where_clause: Option<&WhereClause>,
) -> Result<StatementOutput, ExecutionError> {
    let left = db.table(&join.left_table)?;
    let right = db.table(&join.right_table)?;

    let mut records = Vec::new();
    for left_row in left.rows() {
        for right_row in right.rows() {
            let pair = (
                left_row.get(&join.left_column),
                right_row.get(&join.right_column),
            );
            let (Some(left_value), Some(right_value)) = pair else {
                continue;
            };
            if left_value != right_value {
                continue;
            }

            let record = project_joined(projection, join, left, right, left_row, right_row);

            let accepted = match where_clause {
                None => true,
                Some(clause) => record
                    .fields()
                    .iter()
                    .any(|(_, value)| clause.operator.evaluate(value, &clause.value)),
            };
            if accepted {
                records.push(record);
            }
        }
    }

    Ok(StatementOutput::Rows(records))
}

fn project_joined(
    projection: &Projection,
    join: &JoinClause,
    left: &Table,
    right: &Table,
    left_row: &Row,
    right_row: &Row,
) -> Record {
    let mut record = Record::new();
    match projection {
        Projection::All => {
            // All columns from both sides, qualified as table.column,
            // left schema first.
            for column in left.columns() {
                if let Some(value) = left_row.get(column.column_name()) {
                    record.push(
                        format!("{}.{}", join.left_table, column.column_name()),
                        value.clone(),
                    );
                }
            }
            for column in right.columns() {
                if let Some(value) = right_row.get(column.column_name()) {
                    record.push(
                        format!("{}.{}", join.right_table, column.column_name()),
                        value.clone(),
                    );
                }
            }
        }
        Projection::Columns(names) => {
            for name in names {
                if let Some((table_name, column_name)) = name.split_once('.') {
                    let value = if table_name == join.left_table {
                        left_row.get(column_name)
                    } else if table_name == join.right_table {
                        right_row.get(column_name)
                    } else {
                        None
                    };
                    if let Some(value) = value {
                        record.push(name.clone(), value.clone());
                    }
                } else {
                    // Unqualified names prefer the left table's value.
                    if let Some(value) = left_row.get(name).or_else(|| right_row.get(name)) {
                        record.push(name.clone(), value.clone());
                    }
                }
            }
        }
    }
    record
}

fn name_records(names: Vec<String>) -> StatementOutput {
    let records = names
        .into_iter()
        .map(|name| {
            let mut record = Record::new();
            record.push("name", Value::from(name));
            record
        })
        .collect();
    StatementOutput::Rows(records)
}

fn yes_no(flag: bool) -> Value {
    Value::from(if flag { "YES" } else { "NO" })
}
