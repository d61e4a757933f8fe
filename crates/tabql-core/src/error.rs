//! Error types for tabql.

use thiserror::Error;

use crate::ast::JoinKind;
use crate::parser::ParseError;

/// Errors that can occur while parsing or running a statement.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The statement text is not valid.
    #[error("syntax error: {0}")]
    Syntax(#[from] ParseError),

    /// The statement names something the tables do not have.
    #[error("resolution error: {0}")]
    Resolution(#[from] ResolutionError),
}

/// A name in a statement that could not be bound while it ran.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// No table with this name.
    #[error("table not found: {0}")]
    TableNotFound(String),

    /// No column with this name.
    #[error("column not found: {column} ({context})")]
    ColumnNotFound {
        /// The column as written.
        column: String,
        /// Where it was referenced.
        context: String,
    },

    /// A keyed join without an `ON` key.
    #[error("{0} requires an ON key")]
    MissingJoinKey(JoinKind),
}

/// Result type alias for tabql operations.
pub type Result<T> = std::result::Result<T, Error>;
