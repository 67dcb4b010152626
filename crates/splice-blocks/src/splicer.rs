//! Spans and splicing

use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::error::{Error, Result};

/// A half-open byte range `[start, end)` into a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Check that the span is ordered, in bounds and on char boundaries.
    pub fn validate(&self, source: &str) -> Result<()> {
        let valid = self.start <= self.end
            && self.end <= source.len()
            && source.is_char_boundary(self.start)
            && source.is_char_boundary(self.end);
        if valid {
            Ok(())
        } else {
            Err(Error::InvalidSpan {
                start: self.start,
                end: self.end,
                len: source.len(),
            })
        }
    }

    /// The text the span covers.
    pub fn slice<'a>(&self, source: &'a str) -> Result<&'a str> {
        self.validate(source)?;
        Ok(&source[self.range()])
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.range()
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Build `source[..start] + replacement + source[end..]`.
///
/// Every byte outside the span is copied unchanged.
pub fn splice(source: &str, span: Span, replacement: &str) -> Result<String> {
    span.validate(source)?;

    let mut out = String::with_capacity(source.len() - span.len() + replacement.len());
    out.push_str(&source[..span.start]);
    out.push_str(replacement);
    out.push_str(&source[span.end..]);
    Ok(out)
}
