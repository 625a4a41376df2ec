use crate::error::Error;
use std::any::Any;
use std::fmt;

/// Input to [`StatusRegistry::resolve`](crate::StatusRegistry::resolve)
///
/// A `Code` or `Float` is looked up as a status code. A `Text` is looked up as a status code if
/// it starts with a number, and as a reason phrase otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Query<'a> {
    Code(i64),
    /// Only floats without a fractional part can match a status code
    Float(f64),
    Text(&'a str),
}

/// Output of [`StatusRegistry::resolve`](crate::StatusRegistry::resolve)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved<'a> {
    /// The reason phrase of a code
    Message(&'a str),
    /// The code of a reason phrase
    Code(u16),
}

impl<'a> Resolved<'a> {
    /// Returns the reason phrase if this was resolved from a code
    pub fn message(&self) -> Option<&'a str> {
        match *self {
            Self::Message(m) => Some(m),
            Self::Code(_) => None,
        }
    }

    /// Returns the code if this was resolved from a reason phrase
    pub fn code(&self) -> Option<u16> {
        match *self {
            Self::Code(c) => Some(c),
            Self::Message(_) => None,
        }
    }
}

impl fmt::Display for Resolved<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message(m) => f.write_str(m),
            Self::Code(c) => write!(f, "{c}"),
        }
    }
}

fn saturate<T: TryInto<i64>>(n: T, negative: bool) -> i64 {
    n.try_into()
        .unwrap_or(if negative { i64::MIN } else { i64::MAX })
}

macro_rules! from_impls {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Query<'_> {
                #[allow(unused_comparisons)]
                fn from(value: $t) -> Self {
                    Query::Code(saturate(value, value < 0))
                }
            }
        )*
    }
}

from_impls! { u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize }

impl From<f64> for Query<'_> {
    fn from(value: f64) -> Self {
        Query::Float(value)
    }
}

impl From<f32> for Query<'_> {
    fn from(value: f32) -> Self {
        Query::Float(f64::from(value))
    }
}

impl<'a> From<&'a str> for Query<'a> {
    fn from(value: &'a str) -> Self {
        Query::Text(value)
    }
}

impl<'a> From<&'a String> for Query<'a> {
    fn from(value: &'a String) -> Self {
        Query::Text(value.as_str())
    }
}

macro_rules! downcast_number {
    ($value:ident, $($t:ty),*) => {
        $(
            if let Some(n) = $value.downcast_ref::<$t>() {
                return Ok(Query::from(*n));
            }
        )*
    }
}

impl<'a> Query<'a> {
    /// Builds a query from a dynamically typed value
    ///
    /// Integer primitives become [`Query::Code`], `f32` and `f64` become [`Query::Float`], and
    /// `&str` and `String` become [`Query::Text`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgumentType`] for any other type.
    pub fn from_any(value: &'a dyn Any) -> Result<Self, Error> {
        downcast_number!(value, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
        downcast_number!(value, f32, f64);

        if let Some(s) = value.downcast_ref::<&'static str>() {
            return Ok(Query::Text(*s));
        }

        if let Some(s) = value.downcast_ref::<String>() {
            return Ok(Query::Text(s.as_str()));
        }

        Err(Error::InvalidArgumentType)
    }
}

/// An integer as written in a string: an optional sign followed by ASCII digits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct IntText<'a> {
    negative: bool,
    digits: &'a str,
}

impl IntText<'_> {
    // Splits an optional sign off `text`. The digit run is everything up to the first non-digit.
    fn scan(text: &str) -> Option<(IntText<'_>, &str)> {
        let (negative, rest) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };

        let len = rest.bytes().take_while(u8::is_ascii_digit).count();

        if len == 0 {
            return None;
        }

        let (digits, tail) = rest.split_at(len);
        Some((IntText { negative, digits }, tail))
    }

    /// The value of the integer. Digit runs that do not fit in an `i64` saturate.
    pub(crate) fn value(&self) -> i64 {
        let magnitude = self.digits.bytes().fold(0i64, |acc, b| {
            acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
        });

        if self.negative {
            magnitude.saturating_neg()
        } else {
            magnitude
        }
    }
}

// Prints the integer without its `+` sign or leading zeros, regardless of how large it is
impl fmt::Display for IntText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.digits.trim_start_matches('0');

        if digits.is_empty() {
            return f.write_str("0");
        }

        if self.negative {
            f.write_str("-")?;
        }

        f.write_str(digits)
    }
}

pub(crate) fn leading_int(text: &str) -> Option<IntText<'_>> {
    IntText::scan(text.trim_start()).map(|(int, _)| int)
}

pub(crate) fn whole_int(text: &str) -> Option<IntText<'_>> {
    match IntText::scan(text.trim()) {
        Some((int, "")) => Some(int),
        _ => None,
    }
}

/// Parses the integer at the start of `text`, ignoring anything after it.
///
/// Leading whitespace and a single `+` or `-` sign are accepted. `"404"`, `"404abc"` and
/// `" 404 Not Found"` all yield `404`, while `"abc"` yields `None`.
///
/// Digit runs that do not fit in an `i64` saturate.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    leading_int(text).map(|int| int.value())
}

/// Parses `text` as an integer only if nothing but whitespace surrounds it.
///
/// Digit runs that do not fit in an `i64` saturate.
pub fn parse_whole_int(text: &str) -> Option<i64> {
    whole_int(text).map(|int| int.value())
}
