//! # Type System
//!
//! The scalar types understood by the engine. A column is declared with a
//! [`DataTypeKind`] and every cell holds a [`Value`] of that kind.
//!
//! Example Usage:
//!
//! ```
//! use ty::{DataTypeKind, Value};
//!
//! let kind = DataTypeKind::from_keyword("INT").unwrap();
//! let value = Value::Integer(42);
//! assert!(value.conforms_to(kind));
//! ```

pub mod value;
pub use value::*;

use core::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("Invalid data type: {found}. Valid types are: {}", valid.join(", "))]
    UnknownDataType {
        found: String,
        valid: Vec<String>,
    },
}

/// The declared type of a column. The engine supports exactly two scalar
/// types; everything richer is out of scope.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum DataTypeKind {
    #[default]
    Integer,
    Text,
}

impl DataTypeKind {
    /// The keywords accepted in a column definition, in the order they are
    /// reported in error messages.
    pub const KEYWORDS: [&'static str; 2] = ["INT", "TEXT"];

    /// Resolves a column-definition keyword (case-insensitive). `INTEGER` is
    /// accepted as a spelling of `INT`.
    pub fn from_keyword(keyword: &str) -> Result<Self, TypeError> {
        match keyword.to_ascii_uppercase().as_str() {
            "INT" | "INTEGER" => Ok(DataTypeKind::Integer),
            "TEXT" => Ok(DataTypeKind::Text),
            other => Err(TypeError::UnknownDataType {
                found: other.to_string(),
                valid: Self::KEYWORDS.iter().map(|k| k.to_string()).collect(),
            }),
        }
    }
}

impl fmt::Display for DataTypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataTypeKind::Integer => write!(f, "INT"),
            DataTypeKind::Text => write!(f, "TEXT"),
        }
    }
}
