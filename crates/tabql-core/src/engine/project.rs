//! The select list.

use crate::ast::{ColumnName, ColumnRef};
use crate::error::ResolutionError;

use super::relation::Relation;
use super::result::Cell;

/// Select-list entries bound to column indexes, with output names.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Projection {
    indexes: Vec<usize>,
    names: Vec<String>,
}

impl Projection {
    /// Binds `columns` against `relation`, expanding wildcards.
    ///
    /// `*` yields every column, `t.*` the columns of table `t`. A named
    /// column is output under its alias, else under its bare name.
    pub fn compile(
        columns: &[ColumnRef],
        relation: &Relation,
    ) -> Result<Self, ResolutionError> {
        let mut projection = Self::default();
        for column in columns {
            match (&column.table, &column.column) {
                (None, ColumnName::Wildcard) => {
                    for index in 0..relation.width() {
                        projection.push_source(relation, index);
                    }
                }
                (Some(table), ColumnName::Wildcard) => {
                    if !relation.has_table(table) {
                        return Err(ResolutionError::TableNotFound(table.clone()));
                    }
                    for index in relation.columns_of(table) {
                        projection.push_source(relation, index);
                    }
                }
                (_, ColumnName::Named(name)) => {
                    let index = relation.resolve(column).ok_or_else(|| {
                        ResolutionError::ColumnNotFound {
                            column: column.to_string(),
                            context: String::from("select list"),
                        }
                    })?;
                    projection.indexes.push(index);
                    projection
                        .names
                        .push(column.alias.clone().unwrap_or_else(|| name.clone()));
                }
            }
        }
        Ok(projection)
    }

    fn push_source(&mut self, relation: &Relation, index: usize) {
        self.indexes.push(index);
        self.names.push(relation.columns[index].name.clone());
    }

    pub fn into_names(self) -> Vec<String> {
        self.names
    }

    pub fn apply(&self, row: &[Cell]) -> Vec<Cell> {
        self.indexes
            .iter()
            .map(|&index| row.get(index).cloned().flatten())
            .collect()
    }
}
