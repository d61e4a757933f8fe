//! WHERE clause grammar: operators, operands, conditions and separators.

use super::column::plain_column_ref;
use crate::ast::{CompareOp, Condition, Operand, Separator};
use crate::parser::{
    from_fn, keyword, literal, Either, QuotedString, NumberLiteral, ReadResult, Reader,
    Whitespace,
};

/// Reads a comparison operator, longest spelling first.
///
/// # Errors
///
/// Returns a `ParseError` if no operator starts the input.
pub fn comparison_operator(input: &str) -> ReadResult<'_, CompareOp> {
    Either::new()
        .or(literal(">=").map(|()| CompareOp::Gte))
        .or(literal("<=").map(|()| CompareOp::Lte))
        .or(literal("<>").map(|()| CompareOp::Ne))
        .or(literal("!=").map(|()| CompareOp::Ne))
        .or(literal("=").map(|()| CompareOp::Eq))
        .or(literal(">").map(|()| CompareOp::Gt))
        .or(literal("<").map(|()| CompareOp::Lt))
        .read(input)
}

/// Reads an operand: a string literal, a number, or a column reference,
/// tried in that order.
///
/// # Errors
///
/// Returns a `ParseError` if none of them starts the input.
pub fn operand(input: &str) -> ReadResult<'_, Operand> {
    Either::new()
        .or(QuotedString.map(Operand::String))
        .or(NumberLiteral.map(Operand::Number))
        .or(from_fn("column reference", plain_column_ref).map(Operand::Column))
        .read(input)
}

/// Reads `[NOT] operand OP operand`.
///
/// # Errors
///
/// Returns a `ParseError` if the input does not start with a condition.
pub fn condition(input: &str) -> ReadResult<'_, Condition> {
    let negation = (keyword("NOT"), Whitespace::required()).optional();
    let (rest, (negated, left, _, op, _, right)) = (
        negation,
        from_fn("operand", operand),
        Whitespace::optional(),
        from_fn("comparison operator", comparison_operator),
        Whitespace::optional(),
        from_fn("operand", operand),
    )
        .read(input)?;
    let condition = Condition::new(left, op, right);
    Ok((
        rest,
        if negated.is_some() {
            condition.negate()
        } else {
            condition
        },
    ))
}

/// Reads the separator between two conditions.
///
/// Yields the separator and whether the following condition is negated:
/// `AND NOT` and a bare `NOT` both combine with AND and negate.
///
/// # Errors
///
/// Returns a `ParseError` if no separator starts the input.
pub fn condition_separator(input: &str) -> ReadResult<'_, (Separator, bool)> {
    let connective = Either::new()
        .or(keyword("AND NOT").map(|()| (Separator::And, true)))
        .or(keyword("OR NOT").map(|()| (Separator::Or, true)))
        .or(keyword("AND").map(|()| (Separator::And, false)))
        .or(keyword("OR").map(|()| (Separator::Or, false)))
        .or(keyword("NOT").map(|()| (Separator::And, true)));
    let (rest, (_, separator, _)) =
        (Whitespace::required(), connective, Whitespace::required()).read(input)?;
    Ok((rest, separator))
}
