//! The read-only table interface the engine runs against.
//!
//! The engine knows nothing about how bytes become cells: a backing CSV
//! reader, a spreadsheet or a fixture in a test all plug in through
//! [`TabularData`], and a [`TableResolver`] maps table names to them when
//! a statement runs.

mod memory;

use std::collections::HashMap;
use std::sync::Arc;

pub use memory::{MemoryTable, TableError};

/// Read access to a table of string cells.
///
/// Implementations must not change between calls made while one
/// statement runs. Several statements may read the same table from
/// different threads at once.
pub trait TabularData: Send + Sync {
    /// Number of columns.
    fn column_count(&self) -> usize;

    /// Name of the column at `index`.
    fn column_at(&self, index: usize) -> Option<&str>;

    /// Index of the column called `name`.
    fn index_of_column(&self, name: &str) -> Option<usize> {
        (0..self.column_count()).find(|&i| self.column_at(i) == Some(name))
    }

    /// Number of rows.
    fn row_count(&self) -> usize;

    /// The cells of the row at `index`, one per column.
    fn row_at(&self, index: usize) -> Option<Vec<String>>;
}

/// Looks up tables by name when a statement runs.
pub trait TableResolver: Send + Sync {
    /// Returns the table called `name`, if there is one.
    fn resolve(&self, name: &str) -> Option<Arc<dyn TabularData>>;
}

impl<F> TableResolver for F
where
    F: Fn(&str) -> Option<Arc<dyn TabularData>> + Send + Sync,
{
    fn resolve(&self, name: &str) -> Option<Arc<dyn TabularData>> {
        self(name)
    }
}

/// A named set of tables.
#[derive(Default, Clone)]
pub struct Catalog {
    tables: HashMap<String, Arc<dyn TabularData>>,
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `table` under `name`, replacing any previous table.
    pub fn register(&mut self, name: impl Into<String>, table: impl TabularData + 'static) {
        self.tables.insert(name.into(), Arc::new(table));
    }

    /// Builder-style [`Catalog::register`].
    #[must_use]
    pub fn with_table(mut self, name: impl Into<String>, table: impl TabularData + 'static) -> Self {
        self.register(name, table);
        self
    }

    /// Names of the registered tables, sorted.
    #[must_use]
    pub fn table_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns true if no table is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl TableResolver for Catalog {
    fn resolve(&self, name: &str) -> Option<Arc<dyn TabularData>> {
        self.tables.get(name).cloned()
    }
}

impl core::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Catalog")
            .field("tables", &self.table_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people() -> MemoryTable {
        MemoryTable::from_rows(&["name", "age"], &[&["Ann", "30"]]).unwrap()
    }

    #[test]
    fn test_catalog_resolves_registered_tables() {
        let catalog = Catalog::new().with_table("people", people());
        assert_eq!(catalog.len(), 1);
        let table = catalog.resolve("people").unwrap();
        assert_eq!(table.row_count(), 1);
        assert!(catalog.resolve("ghosts").is_none());
        assert!(catalog.resolve("People").is_none());
    }

    #[test]
    fn test_closure_resolver() {
        let shared: Arc<dyn TabularData> = Arc::new(people());
        let resolver = move |name: &str| (name == "p").then(|| Arc::clone(&shared));
        assert!(resolver.resolve("p").is_some());
        assert!(resolver.resolve("q").is_none());
    }

    #[test]
    fn test_catalog_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Catalog>();
        assert_send_sync::<Arc<dyn TabularData>>();
    }

    #[test]
    fn test_default_index_of_column() {
        let table = people();
        assert_eq!(table.index_of_column("age"), Some(1));
        assert_eq!(table.index_of_column("AGE"), None);
    }
}
