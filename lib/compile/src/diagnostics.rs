use thiserror::Error;
use ty::TypeError;

/// Validation errors raised while recognizing a statement. A line that fits
/// no grammar at all is not an error here; the recognizer reports that as
/// "no match" and leaves the wording to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// A WHERE clause with no recognized comparison operator.
    #[error("Invalid WHERE clause: {clause}")]
    InvalidWhereClause { clause: String },
    /// A column definition that is not `name TYPE [PRIMARY KEY] [UNIQUE]`.
    #[error("Malformed column definition: {definition}")]
    MalformedColumnDefinition { definition: String },
    /// A column definition naming a type the engine does not have.
    #[error(transparent)]
    InvalidColumnType(#[from] TypeError),
}
