//! Parser error types.

/// Number of characters of remaining input shown in error messages.
const CONTEXT_CHARS: usize = 24;

/// A syntax error raised when a required reader did not match.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}: expected {expected} {}", location(.position, .remaining))]
pub struct ParseError {
    /// The error message.
    pub message: String,
    /// Description of the reader that failed.
    pub expected: String,
    /// The unconsumed input at the point of failure.
    pub remaining: String,
    /// Byte offset of the failure in the statement text, once known.
    pub position: Option<usize>,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(message: impl Into<String>, expected: impl Into<String>, remaining: &str) -> Self {
        Self {
            message: message.into(),
            expected: expected.into(),
            remaining: remaining.to_owned(),
            position: None,
        }
    }

    /// Creates a plain "syntax error" for a reader that did not match.
    #[must_use]
    pub fn expected(expected: impl Into<String>, remaining: &str) -> Self {
        Self::new("syntax error", expected, remaining)
    }

    /// Records where in `source` the error happened.
    ///
    /// `remaining` is always a suffix of the text handed to the outermost
    /// reader, so the offset is the difference in lengths.
    #[must_use]
    pub fn locate(mut self, source: &str) -> Self {
        if self.position.is_none() && source.ends_with(self.remaining.as_str()) {
            self.position = Some(source.len() - self.remaining.len());
        }
        self
    }

    /// Returns true if the failure happened with no input left.
    #[must_use]
    pub fn at_end_of_input(&self) -> bool {
        self.remaining.is_empty()
    }
}

fn location(position: &Option<usize>, remaining: &str) -> String {
    let near = if remaining.is_empty() {
        String::from("at end of input")
    } else {
        let head: String = remaining.chars().take(CONTEXT_CHARS).collect();
        let ellipsis = if head.len() < remaining.len() { "..." } else { "" };
        format!("near `{head}{ellipsis}`")
    };
    match position {
        Some(pos) => format!("{near} (position {pos})"),
        None => near,
    }
}
