use thiserror::Error;

/// Errors raised by catalog operations. Together with `TableError` these
/// cover the NotFound / AlreadyExists / NoDatabaseSelected arms of the
/// engine's error taxonomy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Database {name} already exists")]
    DatabaseAlreadyExists { name: String },
    #[error("Database {name} does not exist")]
    DatabaseNotFound { name: String },
    #[error("Table {name} already exists")]
    TableAlreadyExists { name: String },
    #[error("Table {name} does not exist")]
    TableNotFound { name: String },
    #[error("No database selected")]
    NoDatabaseSelected,
}
