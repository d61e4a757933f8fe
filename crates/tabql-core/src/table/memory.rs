//! An in-memory table.

use thiserror::Error;

use super::TabularData;

/// Errors building a [`MemoryTable`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// A row has a different number of cells than there are columns.
    #[error("row {row} has {found} cells, expected {expected}")]
    RowWidth {
        /// Index of the offending row.
        row: usize,
        /// Number of columns.
        expected: usize,
        /// Number of cells in the row.
        found: usize,
    },
}

/// A table held entirely in memory. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemoryTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl MemoryTable {
    /// Creates a table from column names and rows.
    ///
    /// # Errors
    ///
    /// Returns `TableError::RowWidth` for the first row whose width differs
    /// from the number of columns.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, TableError> {
        if let Some((row, cells)) = rows
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != columns.len())
        {
            return Err(TableError::RowWidth {
                row,
                expected: columns.len(),
                found: cells.len(),
            });
        }
        Ok(Self { columns, rows })
    }

    /// Creates a table from borrowed strings.
    ///
    /// # Errors
    ///
    /// Same as [`MemoryTable::new`].
    pub fn from_rows(columns: &[&str], rows: &[&[&str]]) -> Result<Self, TableError> {
        Self::new(
            columns.iter().map(|c| (*c).to_owned()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|cell| (*cell).to_owned()).collect())
                .collect(),
        )
    }

    /// Column names.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }
}

impl TabularData for MemoryTable {
    fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn column_at(&self, index: usize) -> Option<&str> {
        self.columns.get(index).map(String::as_str)
    }

    fn index_of_column(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn row_at(&self, index: usize) -> Option<Vec<String>> {
        self.rows.get(index).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_ragged_rows() {
        let err = MemoryTable::from_rows(&["a", "b"], &[&["1", "2"], &["3"]]).unwrap_err();
        assert_eq!(
            err,
            TableError::RowWidth {
                row: 1,
                expected: 2,
                found: 1
            }
        );
        assert_eq!(err.to_string(), "row 1 has 1 cells, expected 2");
    }

    #[test]
    fn test_tabular_access() {
        let table = MemoryTable::from_rows(&["a", "b"], &[&["1", "2"]]).unwrap();
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.column_at(1), Some("b"));
        assert_eq!(table.column_at(2), None);
        assert_eq!(table.row_at(0), Some(vec![String::from("1"), String::from("2")]));
        assert_eq!(table.row_at(1), None);
    }

    #[test]
    fn test_empty_table() {
        let table = MemoryTable::from_rows(&["a"], &[]).unwrap();
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MemoryTable>();
    }
}
