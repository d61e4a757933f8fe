//! Runs a parsed SELECT against tables supplied by a [`TableResolver`].
//!
//! Execution is a pipeline over materialized relations:
//!
//! 1. resolve the FROM table
//! 2. apply each join in order
//! 3. filter with the compiled WHERE conditions
//! 4. sort, when there is an ORDER BY
//! 5. skip OFFSET rows and keep at most LIMIT
//! 6. project the select list
//!
//! Every name in the statement is bound before any row is filtered, so a
//! bad column fails the statement even when no row would reach it.

mod compare;
mod join;
mod order;
mod predicate;
mod project;
mod relation;
mod result;

use tracing::{debug, info};

use crate::ast::SelectStatement;
use crate::error::{ResolutionError, Result};
use crate::grammar::parse_select;
use crate::table::TableResolver;

use predicate::Predicate;
use project::Projection;
use relation::Relation;

pub use result::{Cell, ResultTable};

/// Executes statements against the tables of a resolver.
pub struct Engine<'r> {
    resolver: &'r dyn TableResolver,
}

impl<'r> Engine<'r> {
    /// Creates an engine reading tables from `resolver`.
    #[must_use]
    pub fn new(resolver: &'r dyn TableResolver) -> Self {
        Self { resolver }
    }

    fn load(&self, name: &str) -> Result<Relation> {
        let table = self
            .resolver
            .resolve(name)
            .ok_or_else(|| ResolutionError::TableNotFound(name.to_owned()))?;
        Ok(Relation::load(name, table.as_ref()))
    }

    /// Runs `statement` and returns its rows.
    ///
    /// # Errors
    ///
    /// Returns `Error::Resolution` when a table, a join key column, a
    /// select-list column or an ORDER BY column does not exist. Columns in
    /// WHERE conditions never fail: a condition on an unknown column is
    /// false.
    pub fn execute(&self, statement: &SelectStatement) -> Result<ResultTable> {
        let mut relation = self.load(&statement.table.name)?;
        for join in &statement.joins {
            let right = self.load(&join.table.name)?;
            relation = join::apply(relation, join, right)?;
        }

        let predicate = Predicate::compile(&statement.conditions, &relation);
        let projection = Projection::compile(&statement.columns, &relation)?;
        let keys = order::bind_keys(&statement.order_by, &statement.columns, &relation)?;

        let offset = to_usize(statement.offset.unwrap_or(0));
        let limit = statement.limit.map(to_usize);
        let scanned = relation.rows.len();

        let rows: Vec<_> = if keys.is_empty() {
            // Without ORDER BY, stop as soon as enough rows matched.
            let wanted = limit.map_or(usize::MAX, |limit| offset.saturating_add(limit));
            relation
                .into_rows()
                .into_iter()
                .filter(|row| predicate.matches(row))
                .take(wanted)
                .collect()
        } else {
            let mut rows: Vec<_> = relation
                .into_rows()
                .into_iter()
                .filter(|row| predicate.matches(row))
                .collect();
            order::sort_rows(&mut rows, &keys);
            rows
        };
        debug!(scanned, matched = rows.len(), "filtered rows");

        let rows: Vec<_> = rows
            .iter()
            .skip(offset)
            .take(limit.unwrap_or(usize::MAX))
            .map(|row| projection.apply(row))
            .collect();
        info!(
            table = %statement.table,
            joins = statement.joins.len(),
            rows = rows.len(),
            "executed SELECT"
        );
        Ok(ResultTable::new(projection.into_names(), rows))
    }

    /// Parses and runs `sql`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Syntax` if `sql` does not parse, and the errors of
    /// [`Engine::execute`] otherwise.
    pub fn query(&self, sql: &str) -> Result<ResultTable> {
        let statement = parse_select(sql)?;
        self.execute(&statement)
    }
}

fn to_usize(n: u64) -> usize {
    usize::try_from(n).unwrap_or(usize::MAX)
}
