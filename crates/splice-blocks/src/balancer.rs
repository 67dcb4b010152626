//! Delimiter balancing.
//!
//! Starting at a key's line, walk forward counting opening and closing
//! delimiters. The block ends at the closer that brings the depth back to
//! zero after the first opener has been seen.
//!
//! In [`ScanMode::Naive`] every delimiter character counts, including ones
//! inside quoted strings, so `label: "}"` inside a block ends it early.
//! [`ScanMode::StringAware`] skips quoted runs to avoid that.

use crate::delimiter::{DelimiterPair, ScanMode};
use crate::error::{Error, Result, Unbalance};

/// Running depth plus whether the first opener has been seen yet.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct DepthCounter {
    depth: isize,
    entered: bool,
}

impl DepthCounter {
    fn open(&mut self) {
        self.depth += 1;
        self.entered = true;
    }

    /// Returns true when this closer balances the block.
    fn close(&mut self) -> bool {
        self.depth -= 1;
        self.entered && self.depth == 0
    }

    fn failure(self) -> Unbalance {
        if self.entered {
            Unbalance::Unclosed { depth: self.depth }
        } else {
            Unbalance::NoOpening
        }
    }
}

/// Tracks whether the scan is inside `"..."`, `'...'` or `` `...` ``.
#[derive(Debug, Default, Clone, Copy)]
struct QuoteState {
    quote: Option<u8>,
    escaped: bool,
}

impl QuoteState {
    /// Feed one byte; returns true if it belongs to quoted text and must
    /// not be counted as a delimiter.
    fn consume(&mut self, byte: u8) -> bool {
        match self.quote {
            Some(quote) => {
                if self.escaped {
                    self.escaped = false;
                } else if byte == b'\\' {
                    self.escaped = true;
                } else if byte == quote {
                    self.quote = None;
                }
                true
            }
            None if matches!(byte, b'"' | b'\'' | b'`') => {
                self.quote = Some(byte);
                true
            }
            None => false,
        }
    }
}

/// Return the offset one past the delimiter that closes the block whose
/// scan begins at `start`.
///
/// `start` is normally a [`KeyMatch::open`](crate::KeyMatch::open); any
/// offset at or before the opening delimiter works.
pub fn find_block_end(
    source: &str,
    start: usize,
    delimiters: DelimiterPair,
    scan: ScanMode,
) -> Result<usize> {
    if start > source.len() || !source.is_char_boundary(start) {
        return Err(Error::InvalidSpan {
            start,
            end: start,
            len: source.len(),
        });
    }

    let (open, close) = (delimiters.open_byte(), delimiters.close_byte());
    let mut counter = DepthCounter::default();
    let mut quotes = QuoteState::default();

    // Delimiters are ASCII, so byte comparison never matches inside a
    // multi-byte character.
    for (offset, &byte) in source.as_bytes()[start..].iter().enumerate() {
        if scan == ScanMode::StringAware && quotes.consume(byte) {
            continue;
        }
        if byte == open {
            counter.open();
        } else if byte == close && counter.close() {
            let end = start + offset + 1;
            tracing::trace!(start, end, "block balanced");
            return Ok(end);
        }
    }

    let reason = counter.failure();
    tracing::debug!(start, %reason, "scan reached end of document");
    Err(Error::UnbalancedBlock { start, reason })
}
