//! JOIN clause grammar: one small reader per join kind.

use super::column::{plain_column_ref, table_ref};
use crate::ast::{ColumnRef, Join, JoinKind, TableRef};
use crate::parser::{from_fn, keyword, literal, Either, ReadResult, Reader, Whitespace};

/// The keyword phrase introducing a join, most specific spelling first.
fn join_keyword<'p>(phrases: &[&'p str]) -> Either<'p, ()> {
    phrases
        .iter()
        .fold(Either::new(), |either, phrase| either.or(keyword(*phrase)))
}

fn join_table<'a>(phrases: &[&str], input: &'a str) -> ReadResult<'a, TableRef> {
    let (rest, ((), _, table)) = (
        join_keyword(phrases),
        Whitespace::required(),
        from_fn("table name", table_ref),
    )
        .read(input)?;
    Ok((rest, table))
}

/// Reads `left = right` after `ON`.
fn join_key(input: &str) -> ReadResult<'_, (ColumnRef, ColumnRef)> {
    let (rest, (left, _, (), _, right)) = (
        from_fn("join column", plain_column_ref),
        Whitespace::optional(),
        literal("="),
        Whitespace::optional(),
        from_fn("join column", plain_column_ref),
    )
        .read(input)?;
    Ok((rest, (left, right)))
}

fn keyed_join<'a>(kind: JoinKind, phrases: &[&str], input: &'a str) -> ReadResult<'a, Join> {
    let (rest, table) = join_table(phrases, input)?;
    let (rest, (_, (), _, (left, right))) = (
        Whitespace::required(),
        keyword("ON"),
        Whitespace::required(),
        from_fn("join key", join_key),
    )
        .read(rest)?;
    Ok((rest, Join::keyed(kind, table, left, right)))
}

/// Reads `CROSS JOIN table`.
///
/// # Errors
///
/// Returns a `ParseError` if the input does not start with a cross join.
pub fn cross_join(input: &str) -> ReadResult<'_, Join> {
    let (rest, table) = join_table(&["CROSS JOIN"], input)?;
    Ok((rest, Join::cross(table)))
}

/// Reads `NATURAL JOIN table`.
///
/// # Errors
///
/// Returns a `ParseError` if the input does not start with a natural join.
pub fn natural_join(input: &str) -> ReadResult<'_, Join> {
    let (rest, table) = join_table(&["NATURAL JOIN"], input)?;
    Ok((rest, Join::natural(table)))
}

/// Reads `[INNER] JOIN table ON a = b`.
///
/// # Errors
///
/// Returns a `ParseError` if the input does not start with an inner join.
pub fn inner_join(input: &str) -> ReadResult<'_, Join> {
    keyed_join(JoinKind::Inner, &["INNER JOIN", "JOIN"], input)
}

/// Reads `LEFT [OUTER] JOIN table ON a = b`.
///
/// # Errors
///
/// Returns a `ParseError` if the input does not start with a left join.
pub fn left_outer_join(input: &str) -> ReadResult<'_, Join> {
    keyed_join(JoinKind::LeftOuter, &["LEFT OUTER JOIN", "LEFT JOIN"], input)
}

/// Reads `RIGHT [OUTER] JOIN table ON a = b`.
///
/// # Errors
///
/// Returns a `ParseError` if the input does not start with a right join.
pub fn right_outer_join(input: &str) -> ReadResult<'_, Join> {
    keyed_join(
        JoinKind::RightOuter,
        &["RIGHT OUTER JOIN", "RIGHT JOIN"],
        input,
    )
}

/// Reads `FULL [OUTER] JOIN table ON a = b`.
///
/// # Errors
///
/// Returns a `ParseError` if the input does not start with a full join.
pub fn full_outer_join(input: &str) -> ReadResult<'_, Join> {
    keyed_join(JoinKind::FullOuter, &["FULL OUTER JOIN", "FULL JOIN"], input)
}

/// Reads a join of any kind.
///
/// # Errors
///
/// Returns a `ParseError` if no join starts the input.
pub fn join(input: &str) -> ReadResult<'_, Join> {
    Either::new()
        .or(from_fn("CROSS JOIN", cross_join))
        .or(from_fn("NATURAL JOIN", natural_join))
        .or(from_fn("INNER JOIN", inner_join))
        .or(from_fn("LEFT OUTER JOIN", left_outer_join))
        .or(from_fn("RIGHT OUTER JOIN", right_outer_join))
        .or(from_fn("FULL OUTER JOIN", full_outer_join))
        .read(input)
}
