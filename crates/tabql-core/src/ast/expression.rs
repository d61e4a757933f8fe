//! Column references and WHERE conditions.

use core::cmp::Ordering;
use core::fmt;

use crate::parser::{is_word_char, Number};

/// The column part of a column reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnName {
    /// A named column.
    Named(String),
    /// `*`: every column.
    Wildcard,
}

/// A column reference: `*`, `t.*`, `c`, `t.c`, optionally `AS alias`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    /// Table qualifier.
    pub table: Option<String>,
    /// Column name or wildcard.
    pub column: ColumnName,
    /// Output alias. Never set on a wildcard.
    pub alias: Option<String>,
}

impl ColumnRef {
    /// An unqualified column.
    #[must_use]
    pub fn named(column: impl Into<String>) -> Self {
        Self {
            table: None,
            column: ColumnName::Named(column.into()),
            alias: None,
        }
    }

    /// A table-qualified column.
    #[must_use]
    pub fn qualified(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: Some(table.into()),
            column: ColumnName::Named(column.into()),
            alias: None,
        }
    }

    /// `*`.
    #[must_use]
    pub const fn wildcard() -> Self {
        Self {
            table: None,
            column: ColumnName::Wildcard,
            alias: None,
        }
    }

    /// `table.*`.
    #[must_use]
    pub fn table_wildcard(table: impl Into<String>) -> Self {
        Self {
            table: Some(table.into()),
            column: ColumnName::Wildcard,
            alias: None,
        }
    }

    /// Adds an alias. Returns `None` for wildcards, which cannot be aliased.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Option<Self> {
        if self.is_wildcard() {
            return None;
        }
        self.alias = Some(alias.into());
        Some(self)
    }

    /// Returns true for `*` and `t.*`.
    #[must_use]
    pub const fn is_wildcard(&self) -> bool {
        matches!(self.column, ColumnName::Wildcard)
    }

    /// The column name, if this is not a wildcard.
    #[must_use]
    pub fn column_name(&self) -> Option<&str> {
        match &self.column {
            ColumnName::Named(name) => Some(name),
            ColumnName::Wildcard => None,
        }
    }

    /// The name this column gets in a result: the alias, else the column name.
    #[must_use]
    pub fn output_name(&self) -> Option<&str> {
        self.alias.as_deref().or_else(|| self.column_name())
    }
}

/// Words the grammar reads as keywords wherever they appear.
const KEYWORDS: &[&str] = &[
    "AND", "AS", "ASC", "BY", "CROSS", "DESC", "FROM", "FULL", "INNER", "JOIN", "LEFT", "LIMIT",
    "NATURAL", "NOT", "OFFSET", "ON", "OR", "ORDER", "OUTER", "RIGHT", "SELECT", "WHERE",
];

/// Returns true if `name` reads back as the same identifier without backticks.
fn is_bare_identifier(name: &str) -> bool {
    name.chars().next().is_some_and(|c| !c.is_ascii_digit())
        && name.chars().all(is_word_char)
        && !KEYWORDS.iter().any(|kw| kw.eq_ignore_ascii_case(name))
}

/// Writes an identifier, backtick-quoting it when it is not a bare word.
/// Names starting with a digit and keywords are quoted too.
pub fn write_identifier(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    if is_bare_identifier(name) {
        f.write_str(name)
    } else {
        write!(f, "`{name}`")
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(table) = &self.table {
            write_identifier(f, table)?;
            f.write_str(".")?;
        }
        match &self.column {
            ColumnName::Named(name) => write_identifier(f, name)?,
            ColumnName::Wildcard => f.write_str("*")?,
        }
        if let Some(alias) = &self.alias {
            f.write_str(" AS ")?;
            write_identifier(f, alias)?;
        }
        Ok(())
    }
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// Equal (=)
    Eq,
    /// Not equal (!= or <>)
    Ne,
    /// Greater than (>)
    Gt,
    /// Greater than or equal (>=)
    Gte,
    /// Less than (<)
    Lt,
    /// Less than or equal (<=)
    Lte,
}

impl CompareOp {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
        }
    }

    /// Whether `left <op> right` holds given how `left` compares to `right`.
    #[must_use]
    pub const fn holds(&self, ordering: Ordering) -> bool {
        match self {
            Self::Eq => matches!(ordering, Ordering::Equal),
            Self::Ne => !matches!(ordering, Ordering::Equal),
            Self::Gt => matches!(ordering, Ordering::Greater),
            Self::Gte => !matches!(ordering, Ordering::Less),
            Self::Lt => matches!(ordering, Ordering::Less),
            Self::Lte => !matches!(ordering, Ordering::Greater),
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One side of a condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Numeric literal.
    Number(Number),
    /// String literal.
    String(String),
    /// Column of the current row.
    Column(ColumnRef),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "\"{}\"", s.replace('"', "\"\"")),
            Self::Column(c) => write!(f, "{c}"),
        }
    }
}

/// `operand OP operand`, possibly negated.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// Whether a `NOT` is bound to this condition.
    pub negated: bool,
    /// Left operand.
    pub left: Operand,
    /// Comparison operator.
    pub op: CompareOp,
    /// Right operand.
    pub right: Operand,
}

impl Condition {
    /// Creates a condition.
    #[must_use]
    pub const fn new(left: Operand, op: CompareOp, right: Operand) -> Self {
        Self {
            negated: false,
            left,
            op,
            right,
        }
    }

    /// Returns the negated condition.
    #[must_use]
    pub const fn negate(mut self) -> Self {
        self.negated = !self.negated;
        self
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            f.write_str("NOT ")?;
        }
        write!(f, "{} {} {}", self.left, self.op, self.right)
    }
}

/// How a condition combines with the result accumulated before it.
///
/// Conditions are evaluated strictly left to right; there is no operator
/// precedence and no grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Separator {
    /// `AND` (also used for the first condition and for a bare `NOT`).
    #[default]
    And,
    /// `OR`.
    Or,
}

impl Separator {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }

    /// Folds the next condition's value into the accumulated value.
    #[must_use]
    pub const fn combine(&self, accumulated: bool, next: bool) -> bool {
        match self {
            Self::And => accumulated && next,
            Self::Or => accumulated || next,
        }
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
