//! Combinators composing readers into larger readers.
//!
//! Sequencing needs no dedicated type: a tuple of readers is itself a
//! reader (see the `Reader` impls for tuples).

use tracing::trace;

use super::error::ParseError;
use super::reader::{BoxedReader, ReadResult, Reader};

/// Upper bound on the number of items a repetition reads.
pub const DEFAULT_REPEAT_LIMIT: usize = 1000;

/// Ordered alternation: the first alternative that matches wins.
///
/// Alternatives are tried against the same input in the order they were
/// added, so more specific alternatives must come first (`LEFT OUTER JOIN`
/// before `LEFT JOIN`, `>=` before `>`).
pub struct Either<'r, T> {
    alternatives: Vec<BoxedReader<'r, T>>,
}

impl<'r, T> Either<'r, T> {
    /// Creates an alternation with no alternatives.
    #[must_use]
    pub fn new() -> Self {
        Self {
            alternatives: Vec::new(),
        }
    }

    /// Appends an alternative.
    #[must_use]
    pub fn or(mut self, reader: impl Reader<Output = T> + 'r) -> Self {
        self.alternatives.push(reader.boxed());
        self
    }
}

impl<T> Default for Either<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Reader for Either<'_, T> {
    type Output = T;

    fn read<'a>(&self, input: &'a str) -> ReadResult<'a, Self::Output> {
        for alternative in &self.alternatives {
            if let Ok(matched) = alternative.read(input) {
                return Ok(matched);
            }
        }
        Err(ParseError::new(
            "none of the alternatives matched",
            self.description(),
            input,
        ))
    }

    fn description(&self) -> String {
        let names: Vec<String> = self
            .alternatives
            .iter()
            .map(|alternative| alternative.description())
            .collect();
        names.join(" or ")
    }
}

/// Repeats `item`, with `separator` between consecutive items.
///
/// Reading stops, without error, when the input is exhausted, when the
/// separator does not match, or when the repetition limit is reached. The
/// input consumed by a separator that is not followed by an item is given
/// back only if that separator consumed nothing; otherwise the separator
/// has committed to another item and the item's failure is returned.
pub struct RepeatWithSeparator<I, S> {
    item: I,
    separator: S,
    limit: usize,
    at_least_one: bool,
}

impl<I: Reader, S: Reader> RepeatWithSeparator<I, S> {
    /// Creates a repetition with the default limit.
    #[must_use]
    pub const fn new(item: I, separator: S) -> Self {
        Self {
            item,
            separator,
            limit: DEFAULT_REPEAT_LIMIT,
            at_least_one: false,
        }
    }

    /// Sets the maximum number of items read.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Rejects empty input instead of returning zero items.
    #[must_use]
    pub const fn at_least_one(mut self) -> Self {
        self.at_least_one = true;
        self
    }

    /// Keeps the separators' values, pairing each with the item after it.
    #[must_use]
    pub const fn interleaved(self) -> Interleaved<I, S> {
        Interleaved { repeat: self }
    }

    #[allow(clippy::type_complexity)]
    fn collect<'a>(
        &self,
        input: &'a str,
    ) -> ReadResult<'a, Vec<(Option<S::Output>, I::Output)>> {
        if input.is_empty() {
            if self.at_least_one {
                return Err(ParseError::expected(self.item.description(), input));
            }
            return Ok((input, Vec::new()));
        }
        if self.limit == 0 {
            return Ok((input, Vec::new()));
        }

        let (mut rest, first) = self.item.read(input)?;
        let mut items = vec![(None, first)];
        while !rest.is_empty() {
            if items.len() >= self.limit {
                trace!(limit = self.limit, "repetition limit reached");
                break;
            }
            let Ok((after_separator, separator)) = self.separator.read(rest) else {
                break;
            };
            match self.item.read(after_separator) {
                // No progress at all: stop rather than loop.
                Ok((after_item, _)) if after_item.len() == rest.len() => break,
                Ok((after_item, item)) => {
                    items.push((Some(separator), item));
                    rest = after_item;
                }
                Err(_) if after_separator.len() == rest.len() => break,
                Err(err) => return Err(err),
            }
        }
        Ok((rest, items))
    }
}

impl<I: Reader, S: Reader> Reader for RepeatWithSeparator<I, S> {
    type Output = Vec<I::Output>;

    fn read<'a>(&self, input: &'a str) -> ReadResult<'a, Self::Output> {
        let (rest, items) = self.collect(input)?;
        Ok((rest, items.into_iter().map(|(_, item)| item).collect()))
    }

    fn description(&self) -> String {
        format!("list of {}", self.item.description())
    }
}

/// A [`RepeatWithSeparator`] that also returns the separators.
///
/// The first item carries `None`; every later item carries the separator
/// that preceded it.
pub struct Interleaved<I, S> {
    repeat: RepeatWithSeparator<I, S>,
}

impl<I: Reader, S: Reader> Reader for Interleaved<I, S> {
    type Output = Vec<(Option<S::Output>, I::Output)>;

    fn read<'a>(&self, input: &'a str) -> ReadResult<'a, Self::Output> {
        self.repeat.collect(input)
    }

    fn description(&self) -> String {
        self.repeat.description()
    }
}

/// Reads the text between two delimiters with `inner`.
///
/// The first occurrence of `left` is located, then the first occurrence of
/// `right` after it. `inner` must consume the whole slice in between; the
/// input after `right` is returned.
pub struct Between<'d, R> {
    left: &'d str,
    right: &'d str,
    inner: R,
}

impl<'d, R: Reader> Between<'d, R> {
    /// Creates a delimited reader.
    #[must_use]
    pub const fn new(left: &'d str, right: &'d str, inner: R) -> Self {
        Self { left, right, inner }
    }
}

impl<R: Reader> Reader for Between<'_, R> {
    type Output = R::Output;

    fn read<'a>(&self, input: &'a str) -> ReadResult<'a, Self::Output> {
        let Some(start) = input.find(self.left) else {
            return Err(ParseError::expected(format!("`{}`", self.left), input));
        };
        let after_left = &input[start + self.left.len()..];
        let Some(end) = after_left.find(self.right) else {
            return Err(ParseError::new(
                "missing closing delimiter",
                format!("`{}`", self.right),
                after_left,
            ));
        };
        let (rest, value) = self.inner.read(&after_left[..end])?;
        if !rest.is_empty() {
            return Err(ParseError::new(
                "unexpected text before closing delimiter",
                format!("`{}`", self.right),
                rest,
            ));
        }
        Ok((&after_left[end + self.right.len()..], value))
    }

    fn description(&self) -> String {
        format!(
            "{} between `{}` and `{}`",
            self.inner.description(),
            self.left,
            self.right
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::primitives::{literal, Empty, NumberLiteral, Whitespace, Word};

    fn comma() -> impl Reader<Output = ()> {
        (Whitespace::optional(), literal(","), Whitespace::optional()).map(|_| ())
    }

    #[test]
    fn test_either_prefers_first_match() {
        let reader = Either::new()
            .or(literal(">").map(|()| "gt"))
            .or(literal(">=").map(|()| "gte"));
        assert_eq!(reader.read(">= 1").unwrap(), ("= 1", "gt"));
    }

    #[test]
    fn test_either_tries_later_alternatives() {
        let reader = Either::new()
            .or(literal(">=").map(|()| "gte"))
            .or(literal(">").map(|()| "gt"));
        assert_eq!(reader.read(">= 1").unwrap(), (" 1", "gte"));
        assert_eq!(reader.read("> 1").unwrap(), (" 1", "gt"));
    }

    #[test]
    fn test_either_combined_failure() {
        let reader = Either::new()
            .or(literal("AND").map(|()| 1))
            .or(literal("OR").map(|()| 2));
        let err = reader.read("XOR").unwrap_err();
        assert_eq!(err.message, "none of the alternatives matched");
        assert_eq!(err.expected, "`AND` or `OR`");
        assert_eq!(err.remaining, "XOR");
    }

    #[test]
    fn test_either_without_alternatives_fails() {
        let reader: Either<'_, ()> = Either::new();
        assert!(reader.read("x").is_err());
    }

    #[test]
    fn test_repeat_on_empty_input() {
        let reader = RepeatWithSeparator::new(Word, comma());
        assert_eq!(reader.read("").unwrap(), ("", Vec::new()));
    }

    #[test]
    fn test_repeat_at_least_one_rejects_empty_input() {
        let reader = RepeatWithSeparator::new(Word, comma()).at_least_one();
        assert!(reader.read("").is_err());
    }

    #[test]
    fn test_repeat_stops_when_separator_missing() {
        let reader = RepeatWithSeparator::new(Word, comma());
        let (rest, items) = reader.read("a, b ,c FROM t").unwrap();
        assert_eq!(items, vec!["a", "b", "c"]);
        assert_eq!(rest, " FROM t");
    }

    #[test]
    fn test_repeat_fails_when_item_missing_after_separator() {
        let reader = RepeatWithSeparator::new(Word, comma());
        let err = reader.read("a, , b").unwrap_err();
        assert_eq!(err.expected, "identifier");
    }

    #[test]
    fn test_repeat_with_empty_separator_stops_at_first_miss() {
        let item = (Whitespace::required(), NumberLiteral).map(|(_, n)| n);
        let reader = RepeatWithSeparator::new(item, Empty);
        let (rest, items) = reader.read(" 1 2 3 x").unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(rest, " x");
    }

    #[test]
    fn test_repeat_limit_stops_gracefully() {
        let reader = RepeatWithSeparator::new(Word, comma()).with_limit(2);
        let (rest, items) = reader.read("a, b, c").unwrap();
        assert_eq!(items, vec!["a", "b"]);
        assert_eq!(rest, ", c");
    }

    #[test]
    fn test_repeat_does_not_spin_on_empty_matches() {
        let reader = RepeatWithSeparator::new(Whitespace::optional(), Empty);
        let (rest, items) = reader.read("x").unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(rest, "x");
    }

    #[test]
    fn test_interleaved_keeps_separators() {
        let separator = Either::new()
            .or(literal("+").map(|()| '+'))
            .or(literal("-").map(|()| '-'));
        let reader = RepeatWithSeparator::new(Word, separator).interleaved();
        let (_, items) = reader.read("a+b-c").unwrap();
        assert_eq!(
            items,
            vec![
                (None, String::from("a")),
                (Some('+'), String::from("b")),
                (Some('-'), String::from("c")),
            ]
        );
    }

    #[test]
    fn test_between_extracts_inner_text() {
        let reader = Between::new("[", "]", Word);
        assert_eq!(
            reader.read("[name] rest").unwrap(),
            (" rest", String::from("name"))
        );
    }

    #[test]
    fn test_between_missing_delimiters() {
        let reader = Between::new("[", "]", Word);
        assert!(reader.read("name").is_err());
        let err = reader.read("[name").unwrap_err();
        assert_eq!(err.message, "missing closing delimiter");
    }

    #[test]
    fn test_between_requires_inner_to_consume_everything() {
        let reader = Between::new("[", "]", Word);
        let err = reader.read("[two words]").unwrap_err();
        assert_eq!(err.message, "unexpected text before closing delimiter");
    }
}
