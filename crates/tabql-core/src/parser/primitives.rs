//! Token primitives: the atomic readers every grammar rule is built from.

use core::fmt;

use super::error::ParseError;
use super::reader::{ReadResult, Reader};

/// Returns true for characters allowed in a bare identifier.
#[must_use]
pub const fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Returns true for the whitespace characters the grammar skips.
#[must_use]
pub const fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Case-insensitive match of a fixed piece of text.
#[derive(Debug, Clone, Copy)]
pub struct Literal<'t> {
    text: &'t str,
}

/// Creates a [`Literal`] reader.
#[must_use]
pub const fn literal(text: &str) -> Literal<'_> {
    Literal { text }
}

impl Literal<'_> {
    fn strip<'a>(&self, input: &'a str) -> Option<&'a str> {
        let head = input.get(..self.text.len())?;
        if head.eq_ignore_ascii_case(self.text) {
            Some(&input[self.text.len()..])
        } else {
            None
        }
    }
}

impl Reader for Literal<'_> {
    type Output = ();

    fn read<'a>(&self, input: &'a str) -> ReadResult<'a, Self::Output> {
        self.strip(input)
            .map(|rest| (rest, ()))
            .ok_or_else(|| ParseError::expected(self.description(), input))
    }

    fn description(&self) -> String {
        format!("`{}`", self.text)
    }
}

/// A keyword or keyword phrase such as `ORDER BY`.
///
/// Each word of the phrase is matched case-insensitively and must end at
/// a word boundary; words are separated by any non-empty whitespace run.
#[derive(Debug, Clone, Copy)]
pub struct Keyword<'t> {
    phrase: &'t str,
}

/// Creates a [`Keyword`] reader.
#[must_use]
pub const fn keyword(phrase: &str) -> Keyword<'_> {
    Keyword { phrase }
}

impl Reader for Keyword<'_> {
    type Output = ();

    fn read<'a>(&self, input: &'a str) -> ReadResult<'a, Self::Output> {
        let fail = || ParseError::expected(self.description(), input);
        let mut rest = input;
        for (i, word) in self.phrase.split_whitespace().enumerate() {
            if i > 0 {
                rest = Whitespace::required().read(rest).map_err(|_| fail())?.0;
            }
            rest = literal(word).strip(rest).ok_or_else(fail)?;
            if rest.chars().next().is_some_and(is_word_char) {
                return Err(fail());
            }
        }
        Ok((rest, ()))
    }

    fn description(&self) -> String {
        format!("`{}`", self.phrase)
    }
}

/// A run of spaces, tabs and line breaks.
#[derive(Debug, Clone, Copy)]
pub struct Whitespace {
    required: bool,
}

impl Whitespace {
    /// Whitespace that must consume at least one character.
    #[must_use]
    pub const fn required() -> Self {
        Self { required: true }
    }

    /// Whitespace that may be empty.
    #[must_use]
    pub const fn optional() -> Self {
        Self { required: false }
    }
}

impl Reader for Whitespace {
    type Output = ();

    fn read<'a>(&self, input: &'a str) -> ReadResult<'a, Self::Output> {
        let rest = input.trim_start_matches(is_whitespace);
        if self.required && rest.len() == input.len() {
            return Err(ParseError::expected(self.description(), input));
        }
        Ok((rest, ()))
    }

    fn description(&self) -> String {
        String::from("whitespace")
    }
}

/// A bare identifier: a non-empty run of `[A-Za-z0-9_]`.
#[derive(Debug, Clone, Copy)]
pub struct Word;

impl Reader for Word {
    type Output = String;

    fn read<'a>(&self, input: &'a str) -> ReadResult<'a, Self::Output> {
        if input.starts_with('"') {
            return Err(ParseError::new(
                "quoted text is not an identifier",
                self.description(),
                input,
            ));
        }
        let end = input.find(|c: char| !is_word_char(c)).unwrap_or(input.len());
        if end == 0 {
            return Err(ParseError::expected(self.description(), input));
        }
        Ok((&input[end..], input[..end].to_owned()))
    }

    fn description(&self) -> String {
        String::from("identifier")
    }
}

/// A double-quoted string; `""` inside it stands for one `"`.
#[derive(Debug, Clone, Copy)]
pub struct QuotedString;

impl Reader for QuotedString {
    type Output = String;

    fn read<'a>(&self, input: &'a str) -> ReadResult<'a, Self::Output> {
        let Some(body) = input.strip_prefix('"') else {
            return Err(ParseError::expected(self.description(), input));
        };
        let mut value = String::new();
        let mut chars = body.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            if c != '"' {
                value.push(c);
                continue;
            }
            if chars.next_if(|&(_, next)| next == '"').is_some() {
                value.push('"');
                continue;
            }
            return Ok((&body[i + 1..], value));
        }
        Err(ParseError::new(
            "unterminated string literal",
            "closing `\"`",
            input,
        ))
    }

    fn description(&self) -> String {
        String::from("string literal")
    }
}

/// A numeric literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Integer literal.
    Integer(i64),
    /// Literal with a fractional part.
    Float(f64),
}

impl Number {
    /// Returns the value as a float.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_f64(self) -> f64 {
        match self {
            Self::Integer(n) => n as f64,
            Self::Float(f) => f,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            // Keep the decimal point so the text reads back as a float.
            Self::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{x:.1}"),
            Self::Float(x) => write!(f, "{x}"),
        }
    }
}

/// Reads a [`Number`]: an optional `-`, digits, and an optional fraction.
#[derive(Debug, Clone, Copy)]
pub struct NumberLiteral;

impl Reader for NumberLiteral {
    type Output = Number;

    fn read<'a>(&self, input: &'a str) -> ReadResult<'a, Self::Output> {
        let unsigned = input.strip_prefix('-').unwrap_or(input);
        let sign_len = input.len() - unsigned.len();
        let int_len = digit_run(unsigned);
        if int_len == 0 {
            return Err(ParseError::expected(self.description(), input));
        }
        let after_int = &unsigned[int_len..];
        let frac_len = after_int
            .strip_prefix('.')
            .map_or(0, |fraction| match digit_run(fraction) {
                0 => 0,
                n => n + 1,
            });
        let end = sign_len + int_len + frac_len;
        let text = &input[..end];
        let number = if frac_len == 0 {
            text.parse::<i64>().map(Number::Integer).map_err(|_| {
                ParseError::new("integer literal out of range", self.description(), input)
            })?
        } else {
            text.parse::<f64>()
                .map(Number::Float)
                .map_err(|_| ParseError::expected(self.description(), input))?
        };
        Ok((&input[end..], number))
    }

    fn description(&self) -> String {
        String::from("number")
    }
}

fn digit_run(input: &str) -> usize {
    input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len())
}

/// Succeeds without consuming anything.
#[derive(Debug, Clone, Copy)]
pub struct Empty;

impl Reader for Empty {
    type Output = ();

    fn read<'a>(&self, input: &'a str) -> ReadResult<'a, Self::Output> {
        Ok((input, ()))
    }

    fn description(&self) -> String {
        String::from("nothing")
    }
}

/// Succeeds only when no input is left.
#[derive(Debug, Clone, Copy)]
pub struct End;

impl Reader for End {
    type Output = ();

    fn read<'a>(&self, input: &'a str) -> ReadResult<'a, Self::Output> {
        if input.is_empty() {
            Ok((input, ()))
        } else {
            Err(ParseError::new(
                "unexpected trailing input",
                self.description(),
                input,
            ))
        }
    }

    fn description(&self) -> String {
        String::from("end of statement")
    }
}
