//! Edit types for block replacement.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::splicer::{Span, splice};

/// One replacement of a span's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edit {
    /// Location of the replaced text in the source the edit was made for.
    pub span: Span,
    /// The text the span covered before the edit.
    pub removed: String,
    /// The text put in its place.
    pub inserted: String,
}

impl Edit {
    /// Capture the replacement of `span` in `source` by `replacement`.
    pub fn replace(source: &str, span: Span, replacement: impl Into<String>) -> Result<Self> {
        let removed = span.slice(source)?.to_string();
        Ok(Self {
            span,
            removed,
            inserted: replacement.into(),
        })
    }

    /// Apply the edit to `source`.
    pub fn apply(&self, source: &str) -> Result<String> {
        splice(source, self.span, &self.inserted)
    }

    /// Where the inserted text sits once the edit is applied.
    pub fn inserted_span(&self) -> Span {
        Span::new(self.span.start, self.span.start + self.inserted.len())
    }

    /// The edit that restores the original text.
    pub fn invert(&self) -> Self {
        Self {
            span: self.inserted_span(),
            removed: self.inserted.clone(),
            inserted: self.removed.clone(),
        }
    }

    /// True when applying the edit would not change anything.
    pub fn is_noop(&self) -> bool {
        self.removed == self.inserted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invert_restores_source() {
        let source = "a: { x: 1 }\nb: {}";
        let edit = Edit::replace(source, Span::new(0, 11), "a: {\n  x: 2,\n}").unwrap();
        let updated = edit.apply(source).unwrap();

        assert_eq!(edit.invert().apply(&updated).unwrap(), source);
    }

    #[test]
    fn inserted_span_covers_new_text() {
        let edit = Edit::replace("0123456789", Span::new(2, 8), "ab").unwrap();
        let updated = edit.apply("0123456789").unwrap();
        assert_eq!(edit.inserted_span().slice(&updated).unwrap(), "ab");
    }

    #[test]
    fn identical_text_is_noop() {
        let edit = Edit::replace("a: {}", Span::new(0, 5), "a: {}").unwrap();
        assert!(edit.is_noop());
    }
}
