//! Identifiers, column references and table references.

use crate::ast::{ColumnName, ColumnRef, TableRef};
use crate::parser::{
    from_fn, keyword, literal, Between, Either, ParseError, ReadResult, Reader, Whitespace, Word,
};

/// Reads an identifier: a bare word or a backtick-quoted name.
///
/// Backticks allow names that are not bare words, such as CSV headers
/// containing spaces (`` `first name` ``).
///
/// # Errors
///
/// Returns a `ParseError` if no identifier starts the input.
pub fn identifier(input: &str) -> ReadResult<'_, String> {
    if input.starts_with('`') {
        Between::new("`", "`", from_fn("quoted identifier", quoted_identifier_body)).read(input)
    } else {
        Word.read(input)
    }
}

fn quoted_identifier_body(input: &str) -> ReadResult<'_, String> {
    if input.is_empty() {
        return Err(ParseError::new(
            "empty quoted identifier",
            "identifier",
            input,
        ));
    }
    Ok(("", input.to_owned()))
}

/// Reads ` AS alias`.
fn alias(input: &str) -> ReadResult<'_, String> {
    let (rest, (_, (), _, name)) = (
        Whitespace::required(),
        keyword("AS"),
        Whitespace::required(),
        from_fn("alias", identifier),
    )
        .read(input)?;
    Ok((rest, name))
}

/// Reads `name`, `table.name` or `table.*`.
///
/// The first identifier is taken as the column name unless a `.` follows,
/// in which case it names the table and the column comes after the dot.
fn qualified_column(input: &str) -> ReadResult<'_, ColumnRef> {
    let (rest, first) = identifier(input)?;
    let after_dot = Either::new()
        .or(literal("*").map(|()| ColumnName::Wildcard))
        .or(from_fn("column name", identifier).map(ColumnName::Named));
    let (rest, second) = (literal("."), after_dot)
        .map(|((), column)| column)
        .optional()
        .read(rest)?;
    let column = match second {
        Some(column) => ColumnRef {
            table: Some(first),
            column,
            alias: None,
        },
        None => ColumnRef::named(first),
    };
    Ok((rest, column))
}

/// Reads a column reference: `*`, `t.*`, `c`, `t.c`, each optionally
/// followed by `AS alias`. Wildcards cannot be aliased.
///
/// # Errors
///
/// Returns a `ParseError` if no column reference starts the input, or if
/// a wildcard is given an alias.
pub fn column_ref(input: &str) -> ReadResult<'_, ColumnRef> {
    let head = Either::new()
        .or(literal("*").map(|()| ColumnRef::wildcard()))
        .or(from_fn("column name", qualified_column));
    let (rest, column) = head.read(input)?;
    let (rest, alias) = from_fn("alias", alias).optional().read(rest)?;
    match alias {
        None => Ok((rest, column)),
        Some(alias) => column.with_alias(alias).map(|c| (rest, c)).ok_or_else(|| {
            ParseError::new("a wildcard cannot be aliased", "column name", input)
        }),
    }
}

/// Reads a column reference that names a single column: no wildcard and
/// no alias. Used for operands, join keys and ORDER BY entries.
///
/// # Errors
///
/// Returns a `ParseError` if no column reference starts the input or the
/// reference is a wildcard or carries an alias.
pub fn plain_column_ref(input: &str) -> ReadResult<'_, ColumnRef> {
    from_fn("column reference", column_ref)
        .try_map(|column| {
            if column.is_wildcard() {
                Err(String::from("a wildcard is not allowed here"))
            } else if column.alias.is_some() {
                Err(String::from("an alias is not allowed here"))
            } else {
                Ok(column)
            }
        })
        .read(input)
}

/// Reads a table name.
///
/// # Errors
///
/// Returns a `ParseError` if no identifier starts the input.
pub fn table_ref(input: &str) -> ReadResult<'_, TableRef> {
    from_fn("table name", identifier)
        .map(TableRef::new)
        .read(input)
}
