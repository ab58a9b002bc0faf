//! Session state: which database unqualified table operations apply to.
//!
//! The selection is deliberately not a hidden field of the catalog. It is an
//! explicit value the caller owns and passes into catalog lookups, so a host
//! could run several sessions against one catalog without a redesign. The
//! engine itself still assumes a single logical caller (see the executor).

use serde::{Deserialize, Serialize};

/// The per-caller current-database selection. At most one database is
/// selected at a time; none is selected until the first USE.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    current_database: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// The selected database name, if any.
    pub fn current_database(&self) -> Option<&str> {
        self.current_database.as_deref()
    }

    pub fn select(&mut self, database: &str) {
        self.current_database = Some(database.to_string());
    }

    /// Clears the selection. Called when the selected database is dropped.
    pub fn clear(&mut self) {
        self.current_database = None;
    }
}
