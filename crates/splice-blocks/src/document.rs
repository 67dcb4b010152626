//! Document with a single pending edit

use crate::delimiter::BlockOptions;
use crate::edit::Edit;
use crate::error::{Error, Result};
use crate::replace::locate_block;
use crate::splicer::Span;

/// An immutable source plus at most one staged [`Edit`].
///
/// Applying the staged edit consumes the document and yields a new one,
/// so a locate/stage/apply cycle always works against the text the span
/// was computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    source: String,
    pending: Option<Edit>,
}

impl Document {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            pending: None,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn into_source(self) -> String {
        self.source
    }

    /// Find the span of the block introduced by `key`.
    pub fn locate(&self, key: &str, options: &BlockOptions) -> Result<Span> {
        locate_block(&self.source, key, options)
    }

    /// Text currently covered by `span`.
    pub fn block(&self, span: Span) -> Result<&str> {
        span.slice(&self.source)
    }

    /// Stage the replacement of `span`. Fails if an edit is already staged.
    pub fn stage(&mut self, span: Span, replacement: impl Into<String>) -> Result<&Edit> {
        if self.pending.is_some() {
            return Err(Error::EditPending);
        }
        let edit = Edit::replace(&self.source, span, replacement)?;
        Ok(self.pending.insert(edit))
    }

    pub fn pending(&self) -> Option<&Edit> {
        self.pending.as_ref()
    }

    /// Drop the staged edit, returning it.
    pub fn discard(&mut self) -> Option<Edit> {
        self.pending.take()
    }

    /// Apply the staged edit, if any, producing the next document.
    pub fn apply(self) -> Result<Document> {
        match self.pending {
            Some(edit) => Ok(Document::new(edit.apply(&self.source)?)),
            None => Ok(self),
        }
    }

    /// Locate `key`, stage `replacement` over its block and apply it.
    pub fn replace_block(
        mut self,
        key: &str,
        replacement: &str,
        options: &BlockOptions,
    ) -> Result<(Document, Edit)> {
        let span = self.locate(key, options)?;
        let edit = self.stage(span, replacement)?.clone();
        Ok((self.apply()?, edit))
    }
}

impl From<String> for Document {
    fn from(source: String) -> Self {
        Self::new(source)
    }
}

impl From<&str> for Document {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn stage_then_apply() {
        let mut doc = Document::new("a: { x: 1 }\nb: {}");
        let span = doc.locate("a", &BlockOptions::default()).unwrap();
        assert_eq!(doc.block(span).unwrap(), "a: { x: 1 }");

        doc.stage(span, "a: { x: 2 }").unwrap();
        let next = doc.apply().unwrap();

        assert_eq!(next.source(), "a: { x: 2 }\nb: {}");
        assert!(next.pending().is_none());
    }

    #[test]
    fn second_stage_is_rejected() {
        let mut doc = Document::new("a: {}");
        doc.stage(Span::new(0, 5), "a: { x }").unwrap();
        assert_eq!(doc.stage(Span::new(0, 5), "other"), Err(Error::EditPending));
    }

    #[test]
    fn discard_allows_restaging() {
        let mut doc = Document::new("a: {}");
        doc.stage(Span::new(0, 5), "first").unwrap();
        assert_eq!(doc.discard().unwrap().inserted, "first");
        doc.stage(Span::new(0, 5), "second").unwrap();
        assert_eq!(doc.apply().unwrap().source(), "second");
    }

    #[test]
    fn apply_without_pending_edit_is_identity() {
        let doc = Document::new("a: {}");
        assert_eq!(doc.clone().apply().unwrap(), doc);
    }

    #[test]
    fn stage_rejects_invalid_span() {
        let mut doc = Document::new("abc");
        assert!(doc.stage(Span::new(1, 9), "x").is_err());
        assert!(doc.pending().is_none());
    }

    #[test]
    fn replace_block_returns_edit() {
        let (doc, edit) = Document::new("  a: {\n  }\n")
            .replace_block("a", "  a: { y }", &BlockOptions::default())
            .unwrap();
        assert_eq!(doc.source(), "  a: { y }\n");
        assert_eq!(edit.removed, "  a: {\n  }");
    }
}
