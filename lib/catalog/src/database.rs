//! A database is a named, creation-ordered registry of tables.

use crate::{CatalogError, Table};
use indexmap::IndexMap;
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct Database {
    database_name: String,
    tables: IndexMap<String, Table>,
}

impl Database {
    pub fn new(database_name: &str) -> Self {
        Self {
            database_name: database_name.to_string(),
            tables: IndexMap::new(),
        }
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    /// Registers a table. Fails when a table of the same name exists.
    pub fn create_table(&mut self, table: Table) -> Result<(), CatalogError> {
        if self.tables.contains_key(table.table_name()) {
            return Err(CatalogError::TableAlreadyExists {
                name: table.table_name().to_string(),
            });
        }
        info!(database = %self.database_name, table = %table.table_name(), "table created");
        self.tables.insert(table.table_name().to_string(), table);
        Ok(())
    }

    /// Removes a table, discarding its rows and indexes. `shift_remove`
    /// keeps the remaining tables in creation order.
    pub fn drop_table(&mut self, name: &str) -> Result<Table, CatalogError> {
        self.tables
            .shift_remove(name)
            .ok_or_else(|| CatalogError::TableNotFound {
                name: name.to_string(),
            })
    }

    pub fn table(&self, name: &str) -> Result<&Table, CatalogError> {
        self.tables
            .get(name)
            .ok_or_else(|| CatalogError::TableNotFound {
                name: name.to_string(),
            })
    }

    pub fn table_mut(&mut self, name: &str) -> Result<&mut Table, CatalogError> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| CatalogError::TableNotFound {
                name: name.to_string(),
            })
    }

    /// Table names in creation order.
    pub fn table_names(&self) -> Vec<String> {
        self.tables.keys().cloned().collect()
    }

    pub fn tables_mut(&mut self) -> impl Iterator<Item = &mut Table> {
        self.tables.values_mut()
    }
}
