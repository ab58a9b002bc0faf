//! The typed statements the recognizer can produce. One variant per grammar,
//! each carrying only the fields its grammar defines, so the executor can
//! match exhaustively.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use ty::{DataTypeKind, Value};

/// A recognized statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    CreateDatabase {
        name: String,
    },
    DropDatabase {
        name: String,
    },
    UseDatabase {
        name: String,
    },
    ListDatabases,
    ShowTables,
    DescribeTable {
        table_name: String,
    },
    CreateTable {
        table_name: String,
        columns: Vec<ColumnDef>,
    },
    DropTable {
        table_name: String,
    },
    CreateIndex {
        index_name: String,
        table_name: String,
        column_name: String,
    },
    DropIndex {
        index_name: String,
    },
    Insert {
        table_name: String,
        values: Vec<Value>,
    },
    Update {
        table_name: String,
        column_name: String,
        value: Value,
        where_clause: Option<WhereClause>,
    },
    Delete {
        table_name: String,
        where_clause: Option<WhereClause>,
    },
    Select {
        projection: Projection,
        table_name: String,
        join_clause: Option<JoinClause>,
        where_clause: Option<WhereClause>,
    },
}

/// A column definition inside CREATE TABLE.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    pub data_type: DataTypeKind,
    pub primary_key: bool,
    pub unique: bool,
}

/// The column list of a SELECT: `*` or an explicit list. Explicit names may
/// be `table.column`-qualified in the join case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Projection {
    All,
    Columns(Vec<String>),
}

/// The single comparison a WHERE clause can express.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhereClause {
    pub column: String,
    pub operator: ComparisonOp,
    pub value: Value,
}

impl WhereClause {
    /// Evaluates the clause against a cell value, under the coerced
    /// comparison rule of [`Value::compare_coerced`].
    pub fn matches(&self, actual: &Value) -> bool {
        self.operator.evaluate(actual, &self.value)
    }
}

/// An inner equi-join between exactly two tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinClause {
    pub left_table: String,
    pub right_table: String,
    pub left_column: String,
    pub right_column: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComparisonOp {
    Eq,
    NotEq,
    Gt,
    Lt,
    GtEq,
    LtEq,
}

impl ComparisonOp {
    /// Operators in probe order: two-character operators first, so `>=` is
    /// never misread as `>` followed by a stray `=`.
    pub const PROBE_ORDER: [ComparisonOp; 6] = [
        ComparisonOp::GtEq,
        ComparisonOp::LtEq,
        ComparisonOp::NotEq,
        ComparisonOp::Eq,
        ComparisonOp::Gt,
        ComparisonOp::Lt,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            ComparisonOp::Eq => "=",
            ComparisonOp::NotEq => "!=",
            ComparisonOp::Gt => ">",
            ComparisonOp::Lt => "<",
            ComparisonOp::GtEq => ">=",
            ComparisonOp::LtEq => "<=",
        }
    }

    /// Applies the operator to two values. Incomparable operands (a number
    /// against non-numeric text) satisfy only `!=`.
    pub fn evaluate(&self, lhs: &Value, rhs: &Value) -> bool {
        match lhs.compare_coerced(rhs) {
            Some(ordering) => match self {
                ComparisonOp::Eq => ordering == Ordering::Equal,
                ComparisonOp::NotEq => ordering != Ordering::Equal,
                ComparisonOp::Gt => ordering == Ordering::Greater,
                ComparisonOp::Lt => ordering == Ordering::Less,
                ComparisonOp::GtEq => ordering != Ordering::Less,
                ComparisonOp::LtEq => ordering != Ordering::Greater,
            },
            None => matches!(self, ComparisonOp::NotEq),
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
