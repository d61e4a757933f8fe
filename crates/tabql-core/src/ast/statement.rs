//! SELECT statement AST types.

use core::fmt;

use super::expression::{write_identifier, ColumnRef, Condition, Separator};

/// Order direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDirection {
    /// Ascending order (default).
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl OrderDirection {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// An ORDER BY clause entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    /// The column to order by.
    pub column: ColumnRef,
    /// The direction (ASC or DESC).
    pub direction: OrderDirection,
}

impl OrderBy {
    /// Ascending order on `column`.
    #[must_use]
    pub const fn asc(column: ColumnRef) -> Self {
        Self {
            column,
            direction: OrderDirection::Asc,
        }
    }

    /// Descending order on `column`.
    #[must_use]
    pub const fn desc(column: ColumnRef) -> Self {
        Self {
            column,
            direction: OrderDirection::Desc,
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column)?;
        if self.direction == OrderDirection::Desc {
            f.write_str(" DESC")?;
        }
        Ok(())
    }
}

/// A table named in FROM or JOIN. Resolved only when the statement runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableRef {
    /// Table name.
    pub name: String,
}

impl TableRef {
    /// Creates a table reference.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_identifier(f, &self.name)
    }
}

/// Join kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinKind {
    /// CROSS JOIN (also `FROM a, b`).
    Cross,
    /// INNER JOIN.
    Inner,
    /// LEFT OUTER JOIN.
    LeftOuter,
    /// RIGHT OUTER JOIN.
    RightOuter,
    /// FULL OUTER JOIN.
    FullOuter,
    /// NATURAL JOIN.
    Natural,
}

impl JoinKind {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cross => "CROSS JOIN",
            Self::Inner => "INNER JOIN",
            Self::LeftOuter => "LEFT OUTER JOIN",
            Self::RightOuter => "RIGHT OUTER JOIN",
            Self::FullOuter => "FULL OUTER JOIN",
            Self::Natural => "NATURAL JOIN",
        }
    }

    /// Whether this kind joins on an explicit `ON a = b` key.
    #[must_use]
    pub const fn is_keyed(&self) -> bool {
        !matches!(self, Self::Cross | Self::Natural)
    }
}

impl fmt::Display for JoinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `ON left = right` key of a join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinKey {
    /// Left column.
    pub left: ColumnRef,
    /// Right column.
    pub right: ColumnRef,
}

/// A JOIN clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    /// The kind of join.
    pub kind: JoinKind,
    /// The table joined in.
    pub table: TableRef,
    /// The join key; present for every keyed kind.
    pub key: Option<JoinKey>,
}

impl Join {
    /// A cross join with `table`.
    #[must_use]
    pub const fn cross(table: TableRef) -> Self {
        Self {
            kind: JoinKind::Cross,
            table,
            key: None,
        }
    }

    /// A natural join with `table`.
    #[must_use]
    pub const fn natural(table: TableRef) -> Self {
        Self {
            kind: JoinKind::Natural,
            table,
            key: None,
        }
    }

    /// A join of a keyed kind on `left = right`.
    #[must_use]
    pub const fn keyed(kind: JoinKind, table: TableRef, left: ColumnRef, right: ColumnRef) -> Self {
        Self {
            kind,
            table,
            key: Some(JoinKey { left, right }),
        }
    }
}

impl fmt::Display for Join {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.table)?;
        if let Some(key) = &self.key {
            write!(f, " ON {} = {}", key.left, key.right)?;
        }
        Ok(())
    }
}

/// A SELECT statement.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectStatement {
    /// The columns to select.
    pub columns: Vec<ColumnRef>,
    /// The FROM table.
    pub table: TableRef,
    /// Joins, applied in order.
    pub joins: Vec<Join>,
    /// WHERE conditions with the separator preceding each one. The first
    /// entry's separator is always `And`.
    pub conditions: Vec<(Separator, Condition)>,
    /// ORDER BY entries.
    pub order_by: Vec<OrderBy>,
    /// LIMIT clause.
    pub limit: Option<u64>,
    /// OFFSET clause.
    pub offset: Option<u64>,
}

impl SelectStatement {
    /// `SELECT columns FROM table` with no other clauses.
    #[must_use]
    pub const fn new(columns: Vec<ColumnRef>, table: TableRef) -> Self {
        Self {
            columns,
            table,
            joins: Vec::new(),
            conditions: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    /// Every table this statement reads, FROM table first.
    pub fn tables(&self) -> impl Iterator<Item = &TableRef> {
        core::iter::once(&self.table).chain(self.joins.iter().map(|join| &join.table))
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for SelectStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT ")?;
        write_list(f, &self.columns)?;
        write!(f, " FROM {}", self.table)?;
        for join in &self.joins {
            write!(f, " {join}")?;
        }
        if !self.conditions.is_empty() {
            f.write_str(" WHERE ")?;
            for (i, (separator, condition)) in self.conditions.iter().enumerate() {
                if i > 0 {
                    write!(f, " {separator} ")?;
                }
                write!(f, "{condition}")?;
            }
        }
        if !self.order_by.is_empty() {
            f.write_str(" ORDER BY ")?;
            write_list(f, &self.order_by)?;
        }
        if let Some(limit) = self.limit {
            write!(f, " LIMIT {limit}")?;
        }
        if let Some(offset) = self.offset {
            write!(f, " OFFSET {offset}")?;
        }
        Ok(())
    }
}
