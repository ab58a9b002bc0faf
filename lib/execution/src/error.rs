use catalog::{CatalogError, TableError};
use compile::SyntaxError;
use thiserror::Error;

/// Everything a statement can fail with. The taxonomy is small and scoped to
/// one statement: NotFound (database/table/column/index), AlreadyExists
/// (duplicate names and key collisions), Validation (arity, types, grammar),
/// and the missing current-database selection. No error here corrupts the
/// catalog or an index; a failing statement simply reports and the engine
/// keeps accepting input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExecutionError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// The recognizer found no grammar for the input line.
    #[error("Invalid or unsupported statement")]
    UnsupportedStatement,
    /// DROP INDEX found no index anywhere in the current database.
    #[error("Index {name} does not exist")]
    IndexNotFound { name: String },
}
