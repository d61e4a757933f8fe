//! The SELECT grammar, built from the combinators in [`crate::parser`].
//!
//! Each rule is a plain function from the remaining input to a
//! [`ReadResult`](crate::parser::ReadResult) carrying the AST piece it
//! recognized; [`from_fn`](crate::parser::from_fn) lifts a rule into a
//! reader when it takes part in a combinator.

mod column;
mod condition;
mod join;
mod select;

pub use column::{column_ref, identifier, plain_column_ref, table_ref};
pub use condition::{comparison_operator, condition, condition_separator, operand};
pub use join::{
    cross_join, full_outer_join, inner_join, join, left_outer_join, natural_join,
    right_outer_join,
};
pub use select::select_statement;

use crate::ast::SelectStatement;
use crate::parser::ParseError;

/// SQL-subset parser.
pub struct Parser<'a> {
    input: &'a str,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self { input }
    }

    /// Parses a single SELECT statement.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not a valid statement; the
    /// error's `position` is the byte offset of the failure.
    pub fn parse_statement(&self) -> Result<SelectStatement, ParseError> {
        select_statement(self.input)
            .map(|(_, statement)| statement)
            .map_err(|err| err.locate(self.input))
    }
}

/// Parses a single SELECT statement.
///
/// # Errors
///
/// Returns a `ParseError` if `sql` is not a valid statement.
pub fn parse_select(sql: &str) -> Result<SelectStatement, ParseError> {
    Parser::new(sql).parse_statement()
}
