//! Locate-and-replace entry points

use crate::balancer::find_block_end;
use crate::delimiter::BlockOptions;
use crate::error::Result;
use crate::locator::locate_key;
use crate::splicer::{Span, splice};

/// Span of the block introduced by `key`: from the start of its line to
/// one past its balancing closer.
///
/// Balancing starts at the opening delimiter, so quote characters in the
/// key itself never reach the string-aware scanner.
pub fn locate_block(source: &str, key: &str, options: &BlockOptions) -> Result<Span> {
    let found = locate_key(source, key, options.delimiters)?;
    let end = find_block_end(source, found.open, options.delimiters, options.scan)?;
    Ok(Span::new(found.start, end))
}

/// Replace the block introduced by `key` using default options
/// (`{}` delimiters, naive scan).
///
/// On error nothing is produced, so callers still hold the original text.
pub fn replace_block(source: &str, key: &str, replacement: &str) -> Result<String> {
    replace_block_with(source, key, replacement, &BlockOptions::default())
}

pub fn replace_block_with(
    source: &str,
    key: &str,
    replacement: &str,
    options: &BlockOptions,
) -> Result<String> {
    let span = locate_block(source, key, options)?;
    tracing::debug!(key, %span, "replacing block");
    splice(source, span, replacement)
}
