//! JSON decoding helpers, chiefly [`nice_from_str`], which reports where in the input a decode
//! error happened.

use std::cmp::min;
use std::fmt::{self, Display};

use serde::{Deserialize, Deserializer};
use serde_json::Error as JsonError;
use serde_json::error::Category;

/// An error decoding JSON from Discord.
#[derive(Debug)]
pub enum Error {
    Serde(serde_json::Error),
    Span(SpanError),
}

/// A [`serde_json::Error`] along with the part of the line it occurred on.
#[derive(Debug)]
pub struct SpanError {
    span: String,
    idx: usize,
    error: JsonError,
}

impl SpanError {
    const PADDING: usize = 20;

    fn new(line: &str, error: JsonError) -> Self {
        // serde_json columns are 1 based, except when they're 0
        let col = floor_char_boundary(line, min(error.column().saturating_sub(1), line.len()));
        let start = floor_char_boundary(line, col.saturating_sub(Self::PADDING));
        let end = ceil_char_boundary(line, min(col + Self::PADDING, line.len()));
        Self {
            span: line[start..end].to_string(),
            idx: col - start,
            error,
        }
    }

    /// The underlying json error
    pub const fn json(&self) -> &JsonError {
        &self.error
    }
}

fn floor_char_boundary(s: &str, mut i: usize) -> usize {
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn ceil_char_boundary(s: &str, mut i: usize) -> usize {
    while !s.is_char_boundary(i) {
        i += 1;
    }
    i
}

impl Display for SpanError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.error)?;
        writeln!(f, "{}", self.span)?;
        write!(f, "{}^ here", " ".repeat(self.idx))
    }
}

impl std::error::Error for SpanError {}

impl Error {
    /// The underlying json error, regardless of whether span information was attached
    pub const fn json(&self) -> &JsonError {
        match self {
            Self::Serde(e) => e,
            Self::Span(span) => span.json(),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Serde(e) => Display::fmt(e, f),
            Self::Span(span) => Display::fmt(span, f),
        }
    }
}

impl std::error::Error for Error {}

/// [`serde_json::from_str`], but syntax and data errors come with the surrounding text of the
/// line they happened on.
pub fn nice_from_str<'a, T: Deserialize<'a>>(s: &'a str) -> Result<T, Error> {
    serde_json::from_str(s).map_err(|e| match e.classify() {
        Category::Syntax | Category::Data => {
            let line = s.lines()
                .nth(e.line().saturating_sub(1))
                .unwrap_or(s);
            Error::Span(SpanError::new(line, e))
        }
        Category::Eof | Category::Io => Error::Serde(e),
    })
}

/// For `#[serde(skip_serializing_if = "bool::is_false")]`.
pub trait BoolExt {
    fn is_false(&self) -> bool;
}

impl BoolExt for bool {
    fn is_false(&self) -> bool { !*self }
}

/// Deserialize `null` as `T::default()`, for fields Discord sometimes nulls instead of omitting.
pub fn null_as_t<'de, D, T>(d: D) -> Result<T, D::Error>
    where D: Deserializer<'de>,
          T: Default,
          Option<T>: Deserialize<'de> {
    Ok(<Option<T>>::deserialize(d)?
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize, Debug)]
    struct Thing {
        #[allow(dead_code)]
        count: u32,
        #[serde(default, deserialize_with = "null_as_t")]
        names: Vec<String>,
    }

    #[test]
    fn span_points_at_error() {
        let err = nice_from_str::<Thing>(r#"{"count": "three"}"#).unwrap_err();
        let Error::Span(span) = &err else { panic!("expected span error, got {err:?}") };
        let shown = span.to_string();
        assert!(shown.contains(r#"{"count": "three"}"#), "{shown}");
        assert!(shown.ends_with("^ here"), "{shown}");
    }

    #[test]
    fn eof_has_no_span() {
        let err = nice_from_str::<Thing>(r#"{"count": 3"#).unwrap_err();
        assert!(matches!(err, Error::Serde(_)));
        assert!(err.json().is_eof());
    }

    #[test]
    fn null_list_is_empty() {
        let thing: Thing = nice_from_str(r#"{"count": 3, "names": null}"#).unwrap();
        assert!(thing.names.is_empty());
        let thing: Thing = nice_from_str(r#"{"count": 3}"#).unwrap();
        assert!(thing.names.is_empty());
    }
}
