//! Parser combinator framework.
//!
//! Every piece of the grammar is a [`Reader`]: it consumes a prefix of the
//! remaining input and returns what is left together with a typed value.
//! Primitives read single tokens; combinators compose readers into
//! sequences (tuples), alternations, repetitions and delimited sections.

mod combinators;
mod error;
mod primitives;
mod reader;

pub use combinators::{Between, Either, Interleaved, RepeatWithSeparator, DEFAULT_REPEAT_LIMIT};
pub use error::ParseError;
pub use primitives::{
    is_whitespace, is_word_char, keyword, literal, Empty, End, Keyword, Literal, Number,
    NumberLiteral, QuotedString, Whitespace, Word,
};
pub use reader::{from_fn, BoxedReader, FromFn, Map, Optional, ReadResult, Reader, TryMap};
