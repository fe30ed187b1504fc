//! # Parsing
//! Movetext is parsed with small *parser combinators* built on the
//! [`PartialFromStr`] trait.
//!
//! Unlike [`FromStr`](std::str::FromStr), the `Ok` variant returned by
//! [`PartialFromStr`] contains two values:
//! - The parsed value
//! - A suffix of the input that was not part of the parsed value.
//!
//! A string like "d4rest" would return `Ok((d4, "rest"))` when parsed as a square.
//! On failure nothing is consumed: the caller still holds the input it passed in,
//! so every rule backtracks for free.

use std::convert::Infallible;

pub trait PartialFromStr: Sized {
    type Err;

    fn partial_from_str(s: &str) -> Result<(Self, &str), Self::Err>;
}
impl<T: PartialFromStr> PartialFromStr for Option<T> {
    type Err = Infallible;

    fn partial_from_str(s: &str) -> Result<(Self, &str), Self::Err> {
        match T::partial_from_str(s) {
            Ok((value, rest)) => Ok((Some(value), rest)),
            Err(_) => Ok((None, s)),
        }
    }
}

/// Parses an optional rule, returning `None` and the untouched input if it fails.
#[inline]
pub fn optional<T: PartialFromStr>(s: &str) -> (Option<T>, &str) {
    match T::partial_from_str(s) {
        Ok((value, rest)) => (Some(value), rest),
        Err(_) => (None, s),
    }
}

/// Matches an exact literal at the start of the input.
pub fn match_literal<'a>(s: &'a str, literal: &str) -> Option<&'a str> {
    s.strip_prefix(literal)
}

/// Matches a single character at the start of the input.
pub fn match_char(s: &str, c: char) -> Option<&str> {
    s.strip_prefix(c)
}

/// Returns the rest of the input after skipping any whitespace.
pub fn walk_whitespace(s: &str) -> &str {
    s.trim_start()
}

/// Parses an unsigned decimal integer.
pub fn parse_int(s: &str) -> Result<(u32, &str), ()> {
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(s.len(), |(i, _)| i);
    if end == 0 {
        return Err(());
    }
    let value = s[..end].parse().map_err(|_| ())?;
    Ok((value, &s[end..]))
}
