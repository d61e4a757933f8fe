//! The `Reader` trait and its adaptors.

use core::marker::PhantomData;

use super::error::ParseError;

/// Outcome of a read: the remaining input and the value produced.
pub type ReadResult<'a, T> = Result<(&'a str, T), ParseError>;

/// A boxed reader, used where alternatives of different types meet.
pub type BoxedReader<'r, T> = Box<dyn Reader<Output = T> + 'r>;

/// Something that consumes a prefix of the remaining input.
///
/// On success a reader returns the input it did not consume together with
/// the value it produced. On failure it returns a [`ParseError`]; whether
/// the failure is fatal is decided by the caller (see [`Optional`]).
pub trait Reader {
    /// The value produced by a successful read.
    type Output;

    /// Tries to consume a prefix of `input`.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input does not start with what this
    /// reader accepts.
    fn read<'a>(&self, input: &'a str) -> ReadResult<'a, Self::Output>;

    /// A short human-readable description used in error messages.
    fn description(&self) -> String;

    /// Makes this reader optional: failure yields `None` and consumes nothing.
    fn optional(self) -> Optional<Self>
    where
        Self: Sized,
    {
        Optional { reader: self }
    }

    /// Transforms the produced value.
    fn map<F, U>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Output) -> U,
    {
        Map { reader: self, f }
    }

    /// Transforms the produced value with a check that may reject it.
    ///
    /// A rejection becomes a `ParseError` positioned at the start of the
    /// input this reader was given.
    fn try_map<F, U>(self, f: F) -> TryMap<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Output) -> Result<U, String>,
    {
        TryMap { reader: self, f }
    }

    /// Boxes this reader.
    fn boxed<'r>(self) -> BoxedReader<'r, Self::Output>
    where
        Self: Sized + 'r,
    {
        Box::new(self)
    }
}

impl<R: Reader + ?Sized> Reader for &R {
    type Output = R::Output;

    fn read<'a>(&self, input: &'a str) -> ReadResult<'a, Self::Output> {
        (**self).read(input)
    }

    fn description(&self) -> String {
        (**self).description()
    }
}

impl<R: Reader + ?Sized> Reader for Box<R> {
    type Output = R::Output;

    fn read<'a>(&self, input: &'a str) -> ReadResult<'a, Self::Output> {
        (**self).read(input)
    }

    fn description(&self) -> String {
        (**self).description()
    }
}

/// See [`Reader::optional`].
#[derive(Debug, Clone, Copy)]
pub struct Optional<R> {
    reader: R,
}

impl<R: Reader> Reader for Optional<R> {
    type Output = Option<R::Output>;

    fn read<'a>(&self, input: &'a str) -> ReadResult<'a, Self::Output> {
        match self.reader.read(input) {
            Ok((rest, value)) => Ok((rest, Some(value))),
            Err(_) => Ok((input, None)),
        }
    }

    fn description(&self) -> String {
        format!("optional {}", self.reader.description())
    }
}

/// See [`Reader::map`].
#[derive(Clone, Copy)]
pub struct Map<R, F> {
    reader: R,
    f: F,
}

impl<R, F, U> Reader for Map<R, F>
where
    R: Reader,
    F: Fn(R::Output) -> U,
{
    type Output = U;

    fn read<'a>(&self, input: &'a str) -> ReadResult<'a, Self::Output> {
        let (rest, value) = self.reader.read(input)?;
        Ok((rest, (self.f)(value)))
    }

    fn description(&self) -> String {
        self.reader.description()
    }
}

/// See [`Reader::try_map`].
#[derive(Clone, Copy)]
pub struct TryMap<R, F> {
    reader: R,
    f: F,
}

impl<R, F, U> Reader for TryMap<R, F>
where
    R: Reader,
    F: Fn(R::Output) -> Result<U, String>,
{
    type Output = U;

    fn read<'a>(&self, input: &'a str) -> ReadResult<'a, Self::Output> {
        let (rest, value) = self.reader.read(input)?;
        match (self.f)(value) {
            Ok(mapped) => Ok((rest, mapped)),
            Err(message) => Err(ParseError::new(message, self.reader.description(), input)),
        }
    }

    fn description(&self) -> String {
        self.reader.description()
    }
}

/// A reader backed by a plain function.
pub struct FromFn<F, T> {
    description: String,
    f: F,
    output: PhantomData<fn() -> T>,
}

/// Wraps a function as a [`Reader`].
///
/// Grammar rules are ordinary functions; this is how they take part in
/// combinators.
pub fn from_fn<F, T>(description: impl Into<String>, f: F) -> FromFn<F, T>
where
    F: for<'a> Fn(&'a str) -> ReadResult<'a, T>,
{
    FromFn {
        description: description.into(),
        f,
        output: PhantomData,
    }
}

impl<F, T> Reader for FromFn<F, T>
where
    F: for<'a> Fn(&'a str) -> ReadResult<'a, T>,
{
    type Output = T;

    fn read<'a>(&self, input: &'a str) -> ReadResult<'a, Self::Output> {
        (self.f)(input)
    }

    fn description(&self) -> String {
        self.description.clone()
    }
}

macro_rules! impl_sequence {
    ($($item:ident),+) => {
        /// A tuple of readers applied one after another.
        impl<$($item: Reader),+> Reader for ($($item,)+) {
            type Output = ($($item::Output,)+);

            #[allow(non_snake_case)]
            fn read<'a>(&self, input: &'a str) -> ReadResult<'a, Self::Output> {
                let ($($item,)+) = self;
                let rest = input;
                $(let (rest, $item) = $item.read(rest)?;)+
                Ok((rest, ($($item,)+)))
            }

            #[allow(non_snake_case)]
            fn description(&self) -> String {
                let ($($item,)+) = self;
                let parts: Vec<String> = vec![$($item.description()),+];
                parts.join(" ")
            }
        }
    };
}

impl_sequence!(A, B);
impl_sequence!(A, B, C);
impl_sequence!(A, B, C, D);
impl_sequence!(A, B, C, D, E);
impl_sequence!(A, B, C, D, E, F);
impl_sequence!(A, B, C, D, E, F, G);
impl_sequence!(A, B, C, D, E, F, G, H);
