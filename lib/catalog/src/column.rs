//! # Column Representation
//!
//! A column is declared once, at table creation, and is immutable afterwards:
//! there is no ALTER. Besides its name and [`DataTypeKind`] it carries the
//! two row-level constraints the engine enforces, `PRIMARY KEY` and `UNIQUE`.
//!
//! ## Usage
//!
//! ```
//! use catalog::Column;
//! use ty::DataTypeKind;
//!
//! let id = Column::builder()
//!     .column_name("id".to_string())
//!     .column_type(DataTypeKind::Integer)
//!     .primary_key(true)
//!     .build();
//! assert!(id.requires_unique_values());
//! ```

use getset::Getters;
use serde::{Deserialize, Serialize};
use std::fmt;
use ty::DataTypeKind;
use typed_builder::TypedBuilder;

/// A column in a table schema.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TypedBuilder, Getters,
)]
#[getset(get = "pub")]
pub struct Column {
    column_name: String,
    column_type: DataTypeKind,
    #[builder(default)]
    primary_key: bool,
    #[builder(default)]
    unique: bool,
}

impl Column {
    /// Creates a plain column with neither constraint set.
    pub fn new(column_name: &str, column_type: DataTypeKind) -> Self {
        Column::builder()
            .column_name(column_name.to_string())
            .column_type(column_type)
            .build()
    }

    /// Returns `true` iff no two rows may share a value in this column.
    pub fn requires_unique_values(&self) -> bool {
        self.primary_key || self.unique
    }

    /// The constraint keyword used when reporting a duplicate, preferring
    /// `PRIMARY KEY` when both flags are set.
    pub fn constraint_keyword(&self) -> &'static str {
        if self.primary_key {
            "PRIMARY KEY"
        } else {
            "UNIQUE"
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.column_name, self.column_type)?;
        if self.primary_key {
            write!(f, " PRIMARY KEY")?;
        }
        if self.unique {
            write!(f, " UNIQUE")?;
        }
        Ok(())
    }
}
