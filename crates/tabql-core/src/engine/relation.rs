//! Intermediate rows flowing between the engine's stages.

use tracing::warn;

use crate::ast::ColumnRef;
use crate::table::TabularData;

use super::result::Cell;

/// A column together with the table it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedColumn {
    pub table: String,
    pub name: String,
}

/// A table-qualified schema and its rows.
#[derive(Debug, Clone, Default)]
pub struct Relation {
    pub columns: Vec<QualifiedColumn>,
    pub rows: Vec<Vec<Cell>>,
}

impl Relation {
    /// Reads every row of `source`, qualifying its columns with `table`.
    ///
    /// A source that breaks its own shape is read as far as possible: a
    /// missing column name becomes empty, a missing row is skipped, and
    /// rows are padded with nulls or cut to the column count. Each case is
    /// logged at `warn`.
    pub fn load(table: &str, source: &dyn TabularData) -> Self {
        let width = source.column_count();
        let columns = (0..width)
            .map(|index| {
                let name = source.column_at(index).unwrap_or_else(|| {
                    warn!(table, index, "table has no name for column");
                    ""
                });
                QualifiedColumn {
                    table: table.to_owned(),
                    name: name.to_owned(),
                }
            })
            .collect();

        let mut rows = Vec::with_capacity(source.row_count());
        for index in 0..source.row_count() {
            let Some(cells) = source.row_at(index) else {
                warn!(table, row = index, "table has no row at index, skipping");
                continue;
            };
            if cells.len() != width {
                warn!(
                    table,
                    row = index,
                    expected = width,
                    found = cells.len(),
                    "row width differs from column count"
                );
            }
            let mut row: Vec<Cell> = cells.into_iter().map(Some).collect();
            row.resize(width, None);
            rows.push(row);
        }
        Self { columns, rows }
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Index of the column `column` names: the matching qualified column,
    /// or the first column with that name when it is unqualified.
    pub fn resolve(&self, column: &ColumnRef) -> Option<usize> {
        let name = column.column_name()?;
        self.columns.iter().position(|c| {
            c.name == name && column.table.as_deref().map_or(true, |table| c.table == table)
        })
    }

    /// Whether any column comes from `table`.
    pub fn has_table(&self, table: &str) -> bool {
        self.columns.iter().any(|c| c.table == table)
    }

    /// Indexes of the columns that come from `table`.
    pub fn columns_of<'a>(&'a self, table: &'a str) -> impl Iterator<Item = usize> + 'a {
        self.columns
            .iter()
            .enumerate()
            .filter(move |(_, c)| c.table == table)
            .map(|(i, _)| i)
    }

    pub fn into_rows(self) -> Vec<Vec<Cell>> {
        self.rows
    }
}
