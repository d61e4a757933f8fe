//! The result of running a statement.

/// One cell of a result. `None` is the null an outer join pads with.
pub type Cell = Option<String>;

/// Rows produced by a SELECT, with their column names.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultTable {
    /// Output column names, one per projected column.
    pub columns: Vec<String>,
    /// Result rows; each has one cell per column.
    pub rows: Vec<Vec<Cell>>,
}

impl ResultTable {
    /// Creates a result table.
    #[must_use]
    pub const fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { columns, rows }
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the first column called `name`.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// The cell at `row` in column `name`. `None` if either is out of
    /// range; `Some(None)` for a null cell.
    #[must_use]
    pub fn get(&self, row: usize, name: &str) -> Option<Option<&str>> {
        let column = self.column_index(name)?;
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map(Option::as_deref)
    }

    /// Every row with nulls replaced by `null`.
    pub fn rows_with_nulls<'a>(&'a self, null: &'a str) -> impl Iterator<Item = Vec<&'a str>> + 'a {
        self.rows
            .iter()
            .map(move |cells| cells.iter().map(|c| c.as_deref().unwrap_or(null)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResultTable {
        ResultTable::new(
            vec![String::from("a"), String::from("b")],
            vec![vec![Some(String::from("1")), None]],
        )
    }

    #[test]
    fn test_get() {
        let table = sample();
        assert_eq!(table.get(0, "a"), Some(Some("1")));
        assert_eq!(table.get(0, "b"), Some(None));
        assert_eq!(table.get(1, "a"), None);
        assert_eq!(table.get(0, "c"), None);
    }

    #[test]
    fn test_rows_with_nulls() {
        let table = sample();
        let rows: Vec<Vec<&str>> = table.rows_with_nulls("-").collect();
        assert_eq!(rows, vec![vec!["1", "-"]]);
    }
}
