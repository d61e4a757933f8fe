//! The SELECT statement reader.

use tracing::trace;

use super::column::{column_ref, plain_column_ref, table_ref};
use super::condition::{condition, condition_separator};
use super::join::join;
use crate::ast::{Join, OrderBy, OrderDirection, SelectStatement, Separator};
use crate::parser::{
    from_fn, keyword, literal, Either, Empty, End, Number, NumberLiteral, ParseError, ReadResult,
    Reader, RepeatWithSeparator, Whitespace,
};

/// A comma with optional whitespace around it.
fn comma() -> impl Reader<Output = ()> {
    (Whitespace::optional(), literal(","), Whitespace::optional()).map(|_| ())
}

/// Reads whitespace followed by a clause keyword, if present.
///
/// Only the keyword is optional: once it matched, the clause body is
/// required and its failure is a syntax error.
fn clause<'a>(phrase: &str, input: &'a str) -> ReadResult<'a, bool> {
    let (rest, found) = (Whitespace::required(), keyword(phrase))
        .optional()
        .read(input)?;
    match found {
        Some(_) => {
            let (rest, ()) = Whitespace::required().read(rest)?;
            Ok((rest, true))
        }
        None => Ok((input, false)),
    }
}

/// Reads a non-negative integer for LIMIT and OFFSET.
fn count(input: &str) -> ReadResult<'_, u64> {
    NumberLiteral
        .try_map(|number| match number {
            Number::Integer(n) => {
                u64::try_from(n).map_err(|_| String::from("expected a non-negative integer"))
            }
            Number::Float(_) => Err(String::from("expected an integer")),
        })
        .read(input)
}

fn order_entry(input: &str) -> ReadResult<'_, OrderBy> {
    let direction = Either::new()
        .or(keyword("ASC").map(|()| OrderDirection::Asc))
        .or(keyword("DESC").map(|()| OrderDirection::Desc));
    let (rest, (column, direction)) = (
        from_fn("column reference", plain_column_ref),
        (Whitespace::required(), direction)
            .map(|(_, direction)| direction)
            .optional(),
    )
        .read(input)?;
    Ok((
        rest,
        OrderBy {
            column,
            direction: direction.unwrap_or_default(),
        },
    ))
}

/// Reads one SELECT statement, including an optional trailing `;`.
///
/// The statement is built in a single pass: each clause reader returns
/// its piece of the AST and this function assembles them.
///
/// # Errors
///
/// Returns a `ParseError` for the first required element that did not
/// match. No partial statement is returned.
pub fn select_statement(input: &str) -> ReadResult<'_, SelectStatement> {
    let (rest, (_, (), _)) = (
        Whitespace::optional(),
        keyword("SELECT"),
        Whitespace::required(),
    )
        .read(input)?;
    let (rest, columns) =
        RepeatWithSeparator::new(from_fn("column reference", column_ref), comma())
            .at_least_one()
            .read(rest)?;

    let (rest, (_, (), _)) = (
        Whitespace::required(),
        keyword("FROM"),
        Whitespace::required(),
    )
        .read(rest)?;
    let (rest, tables) = RepeatWithSeparator::new(from_fn("table name", table_ref), comma())
        .at_least_one()
        .read(rest)?;
    let mut tables = tables.into_iter();
    let table = tables
        .next()
        .ok_or_else(|| ParseError::expected("table name", rest))?;
    // `FROM a, b` is a cross join of a and b.
    let mut joins: Vec<Join> = tables.map(Join::cross).collect();

    let join_clause = (Whitespace::required(), from_fn("join clause", join)).map(|(_, j)| j);
    let (rest, explicit_joins) = RepeatWithSeparator::new(join_clause, Empty)
        .optional()
        .read(rest)?;
    joins.extend(explicit_joins.unwrap_or_default());

    let (rest, has_where) = clause("WHERE", rest)?;
    let (rest, conditions) = if has_where {
        let (rest, entries) = RepeatWithSeparator::new(
            from_fn("condition", condition),
            from_fn("AND, OR or NOT", condition_separator),
        )
        .at_least_one()
        .interleaved()
        .read(rest)?;
        let conditions = entries
            .into_iter()
            .map(|(separator, condition)| match separator {
                None => (Separator::And, condition),
                Some((separator, true)) => (separator, condition.negate()),
                Some((separator, false)) => (separator, condition),
            })
            .collect();
        (rest, conditions)
    } else {
        (rest, Vec::new())
    };

    let (rest, has_order) = clause("ORDER BY", rest)?;
    let (rest, order_by) = if has_order {
        RepeatWithSeparator::new(from_fn("order entry", order_entry), comma())
            .at_least_one()
            .read(rest)?
    } else {
        (rest, Vec::new())
    };

    let (rest, has_limit) = clause("LIMIT", rest)?;
    let (rest, limit) = if has_limit {
        let (rest, n) = from_fn("row count", count).read(rest)?;
        (rest, Some(n))
    } else {
        (rest, None)
    };

    let (rest, has_offset) = clause("OFFSET", rest)?;
    let (rest, offset) = if has_offset {
        let (rest, n) = from_fn("row count", count).read(rest)?;
        (rest, Some(n))
    } else {
        (rest, None)
    };

    let (rest, _) = (
        Whitespace::optional(),
        literal(";").optional(),
        Whitespace::optional(),
        End,
    )
        .read(rest)?;

    let statement = SelectStatement {
        columns,
        table,
        joins,
        conditions,
        order_by,
        limit,
        offset,
    };
    trace!(statement = %statement, "parsed SELECT");
    Ok((rest, statement))
}
