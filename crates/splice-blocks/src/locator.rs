//! Key location.
//!
//! A key only counts when it starts a line (after optional spaces or tabs)
//! and is followed by `:`, optional whitespace and the opening delimiter:
//!
//! ```text
//! ^[ \t]*<key>:\s*{
//! ```
//!
//! The same name inside a value or after other text on the line never
//! matches.

use regex::Regex;

use crate::delimiter::DelimiterPair;
use crate::error::{Error, Result};

/// Where a key's block begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyMatch {
    /// Start of the matched line's leading whitespace (or the key itself).
    pub start: usize,
    /// Byte offset of the opening delimiter.
    pub open: usize,
    /// 1-based line number of `start`.
    pub line: usize,
}

/// Check that `key` can be used as a line anchor.
pub fn validate_key(key: &str, delimiters: DelimiterPair) -> Result<()> {
    if key.is_empty() {
        return Err(Error::invalid_key(key, "key is empty"));
    }
    if key.contains(['\n', '\r']) {
        return Err(Error::invalid_key(key, "key spans more than one line"));
    }
    if key.contains(':') {
        return Err(Error::invalid_key(key, "key contains ':'"));
    }
    if key.trim() != key {
        return Err(Error::invalid_key(key, "key has surrounding whitespace"));
    }
    if key.chars().any(|c| delimiters.contains(c)) {
        return Err(Error::invalid_key(key, "key contains a block delimiter"));
    }
    Ok(())
}

/// Build the line-anchored pattern for `key`.
///
/// `R` makes `^` honour `\r` line breaks as well, so CR-only documents
/// anchor correctly.
pub fn key_pattern(key: &str, delimiters: DelimiterPair) -> Result<Regex> {
    validate_key(key, delimiters)?;
    let pattern = format!(
        r"(?mR)^[ \t]*{}:\s*{}",
        regex::escape(key),
        regex::escape(&delimiters.open().to_string())
    );
    Regex::new(&pattern)
        .map_err(|_| Error::invalid_key(key, "key cannot be compiled into a pattern"))
}

/// Find the first line-anchored occurrence of `key`, scanning from the top.
pub fn locate_key(source: &str, key: &str, delimiters: DelimiterPair) -> Result<KeyMatch> {
    let pattern = key_pattern(key, delimiters)?;

    let mut matches = pattern.find_iter(source);
    let Some(found) = matches.next() else {
        tracing::debug!(key, "no line-anchored match");
        return Err(Error::KeyNotFound {
            key: key.to_string(),
        });
    };

    let extra = matches.count();
    if extra > 0 {
        tracing::warn!(key, extra, "key appears more than once; using the first match");
    }

    let key_match = KeyMatch {
        start: found.start(),
        // The match always ends with the single-byte opener.
        open: found.end() - 1,
        line: line_number(source, found.start()),
    };
    tracing::debug!(key, start = key_match.start, line = key_match.line, "located key");
    Ok(key_match)
}

/// 1-based line of `offset`, counting `\n`, `\r\n` and lone `\r` breaks.
pub fn line_number(source: &str, offset: usize) -> usize {
    let bytes = &source.as_bytes()[..offset.min(source.len())];
    let breaks = bytes
        .iter()
        .enumerate()
        .filter(|&(i, &b)| b == b'\n' || (b == b'\r' && bytes.get(i + 1) != Some(&b'\n')))
        .count();
    breaks + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const BRACES: DelimiterPair = DelimiterPair::BRACES;

    #[test]
    fn finds_key_at_document_start() {
        let found = locate_key("a: {\n}\n", "a", BRACES).unwrap();
        assert_eq!(found, KeyMatch { start: 0, open: 3, line: 1 });
    }

    #[test]
    fn start_includes_leading_indentation() {
        let source = "export const en = {\n    bigramNarrative: {\n    },\n};\n";
        let found = locate_key(source, "bigramNarrative", BRACES).unwrap();
        assert_eq!(found.start, source.find("    bigramNarrative").unwrap());
        assert_eq!(found.line, 2);
        assert_eq!(&source[found.open..=found.open], "{");
    }

    #[test]
    fn ignores_key_inside_a_value() {
        let source = "title: \"a: { nope }\",\nb: {}\n";
        let err = locate_key(source, "a", BRACES).unwrap_err();
        assert!(err.is_key_not_found());
    }

    #[test]
    fn ignores_longer_key_with_same_suffix() {
        let source = "xa: {}\na: { y: 1 }\n";
        let found = locate_key(source, "a", BRACES).unwrap();
        assert_eq!(found.start, 7);
    }

    #[test]
    fn requires_opening_delimiter() {
        let err = locate_key("a: 1\n", "a", BRACES).unwrap_err();
        assert!(err.is_key_not_found());
    }

    #[test]
    fn opener_may_sit_on_the_next_line() {
        let found = locate_key("a:\n{\n}\n", "a", BRACES).unwrap();
        assert_eq!(found.open, 3);
    }

    #[test]
    fn anchors_after_crlf_and_lone_cr() {
        assert_eq!(locate_key("x: 1\r\n  a: {}", "a", BRACES).unwrap().start, 6);
        let cr_only = locate_key("x: 1\r  a: {}", "a", BRACES).unwrap();
        assert_eq!(cr_only.start, 5);
        assert_eq!(cr_only.line, 2);
    }

    #[test]
    fn regex_metacharacters_in_key_are_literal() {
        let source = "a.b: {}\naxb: {}\n";
        assert_eq!(locate_key(source, "a.b", BRACES).unwrap().start, 0);
        assert_eq!(locate_key(source, "axb", BRACES).unwrap().start, 8);
    }

    #[test]
    fn quoted_keys_match_literally() {
        let source = "{\n  \"a\": {\n  }\n}";
        assert_eq!(locate_key(source, "\"a\"", BRACES).unwrap().line, 2);
    }

    #[test]
    fn bracket_delimiters_change_the_anchor() {
        let source = "items: {}\nitems: [1, 2]\n";
        let found = locate_key(source, "items", DelimiterPair::BRACKETS).unwrap();
        assert_eq!(found.line, 2);
    }

    #[rstest]
    #[case("")]
    #[case("a:b")]
    #[case("a\nb")]
    #[case(" a")]
    #[case("a{")]
    fn rejects_invalid_keys(#[case] key: &str) {
        assert!(matches!(
            locate_key("a: {}", key, BRACES),
            Err(Error::InvalidKey { .. })
        ));
    }

    #[rstest]
    #[case("abc", 0, 1)]
    #[case("a\nb", 2, 2)]
    #[case("a\r\nb", 3, 2)]
    #[case("a\rb\rc", 4, 3)]
    fn counts_lines(#[case] source: &str, #[case] offset: usize, #[case] expected: usize) {
        assert_eq!(line_number(source, offset), expected);
    }
}
