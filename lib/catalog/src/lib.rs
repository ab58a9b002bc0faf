//! # Catalog
//!
//! The registry of databases and their tables, plus the [`Session`] carrying
//! the current-database selection. Listing operations preserve creation
//! order, which is part of the SHOW DATABASES / SHOW TABLES contract.

pub mod column;
pub mod database;
pub mod error;
pub mod session;
pub mod table;

pub use column::*;
pub use database::*;
pub use error::*;
pub use session::*;
pub use table::*;

use indexmap::IndexMap;
use tracing::info;

/// Named databases, in creation order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    databases: IndexMap<String, Database>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an empty database. Fails when the name is taken.
    pub fn create_database(&mut self, name: &str) -> Result<(), CatalogError> {
        if self.databases.contains_key(name) {
            return Err(CatalogError::DatabaseAlreadyExists {
                name: name.to_string(),
            });
        }
        info!(database = name, "database created");
        self.databases
            .insert(name.to_string(), Database::new(name));
        Ok(())
    }

    /// Removes a database; everything inside it becomes unreachable. When
    /// the session had it selected, the selection is cleared.
    pub fn drop_database(&mut self, name: &str, session: &mut Session) -> Result<(), CatalogError> {
        if self.databases.shift_remove(name).is_none() {
            return Err(CatalogError::DatabaseNotFound {
                name: name.to_string(),
            });
        }
        if session.current_database() == Some(name) {
            session.clear();
        }
        info!(database = name, "database dropped");
        Ok(())
    }

    /// Selects `name` as the session's current database.
    pub fn use_database(&self, name: &str, session: &mut Session) -> Result<(), CatalogError> {
        if !self.databases.contains_key(name) {
            return Err(CatalogError::DatabaseNotFound {
                name: name.to_string(),
            });
        }
        session.select(name);
        Ok(())
    }

    /// The session's current database. All table operations start here; they
    /// fail with `NoDatabaseSelected` until a USE succeeds.
    pub fn current_database(&self, session: &Session) -> Result<&Database, CatalogError> {
        let name = session
            .current_database()
            .ok_or(CatalogError::NoDatabaseSelected)?;
        self.databases
            .get(name)
            .ok_or(CatalogError::NoDatabaseSelected)
    }

    pub fn current_database_mut(
        &mut self,
        session: &Session,
    ) -> Result<&mut Database, CatalogError> {
        let name = session
            .current_database()
            .ok_or(CatalogError::NoDatabaseSelected)?;
        self.databases
            .get_mut(name)
            .ok_or(CatalogError::NoDatabaseSelected)
    }

    /// Database names in creation order.
    pub fn database_names(&self) -> Vec<String> {
        self.databases.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions_sorted::assert_eq;

    #[test]
    fn test_create_use_current() {
        let mut catalog = Catalog::new();
        let mut session = Session::new();

        catalog.create_database("app").unwrap();
        catalog.use_database("app", &mut session).unwrap();

        let db = catalog.current_database(&session).unwrap();
        assert_eq!(db.database_name(), "app");
    }

    #[test]
    fn test_duplicate_database_rejected() {
        let mut catalog = Catalog::new();
        catalog.create_database("app").unwrap();
        assert_eq!(
            catalog.create_database("app").unwrap_err(),
            CatalogError::DatabaseAlreadyExists {
                name: "app".to_string()
            }
        );
    }

    #[test]
    fn test_use_unknown_database() {
        let catalog = Catalog::new();
        let mut session = Session::new();
        assert_eq!(
            catalog.use_database("ghost", &mut session).unwrap_err(),
            CatalogError::DatabaseNotFound {
                name: "ghost".to_string()
            }
        );
        assert_eq!(session.current_database(), None);
    }

    #[test]
    fn test_no_selection_fails_table_ops() {
        let catalog = Catalog::new();
        let session = Session::new();
        assert_eq!(
            catalog.current_database(&session).unwrap_err(),
            CatalogError::NoDatabaseSelected
        );
    }

    #[test]
    fn test_drop_selected_database_clears_session() {
        let mut catalog = Catalog::new();
        let mut session = Session::new();
        catalog.create_database("app").unwrap();
        catalog.use_database("app", &mut session).unwrap();

        catalog.drop_database("app", &mut session).unwrap();

        assert_eq!(session.current_database(), None);
        assert_eq!(
            catalog.current_database(&session).unwrap_err(),
            CatalogError::NoDatabaseSelected
        );
    }

    #[test]
    fn test_drop_other_database_keeps_selection() {
        let mut catalog = Catalog::new();
        let mut session = Session::new();
        catalog.create_database("app").unwrap();
        catalog.create_database("scratch").unwrap();
        catalog.use_database("app", &mut session).unwrap();

        catalog.drop_database("scratch", &mut session).unwrap();
        assert_eq!(session.current_database(), Some("app"));
    }

    #[test]
    fn test_database_names_in_creation_order() {
        let mut catalog = Catalog::new();
        for name in ["c", "a", "b"] {
            catalog.create_database(name).unwrap();
        }
        assert_eq!(catalog.database_names(), vec!["c", "a", "b"]);
    }
}
