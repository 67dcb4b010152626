//! Key-anchored block replacement for object-literal style documents.
//!
//! A block is the text introduced by a line-anchored `key:` and closed by
//! the delimiter that balances the first opener after it:
//!
//! ```text
//! a: {
//!   x: 1,
//!   y: { z: 2 }
//! }
//! b: { w: 3 }
//! ```
//!
//! Replacing `a` here swaps everything from the start of the `a:` line up
//! to and including its final `}` and leaves `b` byte for byte intact.
//!
//! The pipeline is split the same way the work is:
//!
//! - [`locator`] finds the first line that opens the key's block.
//! - [`balancer`] walks forward counting delimiter depth to find its end.
//! - [`splicer`] rebuilds the text around a [`Span`].
//! - [`Document`] holds a source with at most one pending [`Edit`].
//!
//! ```
//! use splice_blocks::replace_block;
//!
//! let source = "a: {\n  x: 1,\n  y: { z: 2 }\n}\nb: { w: 3 }";
//! let updated = replace_block(source, "a", "a: { x: 9 }").unwrap();
//! assert_eq!(updated, "a: { x: 9 }\nb: { w: 3 }");
//! ```

pub mod balancer;
pub mod delimiter;
pub mod document;
pub mod edit;
pub mod error;
pub mod locator;
pub mod replace;
pub mod splicer;

pub use balancer::find_block_end;
pub use delimiter::{BlockOptions, DelimiterPair, ScanMode};
pub use document::Document;
pub use edit::Edit;
pub use error::{Error, Result, Unbalance};
pub use locator::{KeyMatch, locate_key};
pub use replace::{locate_block, replace_block, replace_block_with};
pub use splicer::{Span, splice};
