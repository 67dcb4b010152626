//! Delimiter pairs and scan options

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{Error, Result};

/// The opening and closing characters that bound a block.
///
/// Both must be distinct ASCII characters so the balancer can compare raw
/// bytes without landing inside a multi-byte character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DelimiterPair {
    open: u8,
    close: u8,
}

impl DelimiterPair {
    pub const BRACES: Self = Self {
        open: b'{',
        close: b'}',
    };
    pub const BRACKETS: Self = Self {
        open: b'[',
        close: b']',
    };
    pub const PARENS: Self = Self {
        open: b'(',
        close: b')',
    };

    pub fn new(open: char, close: char) -> Result<Self> {
        let value = format!("{open}{close}");
        if !open.is_ascii() || !close.is_ascii() {
            return Err(Error::InvalidDelimiters {
                value,
                reason: "delimiters must be ASCII",
            });
        }
        if open == close {
            return Err(Error::InvalidDelimiters {
                value,
                reason: "opening and closing delimiters must differ",
            });
        }
        if open.is_ascii_whitespace() || close.is_ascii_whitespace() || open == ':' || close == ':' {
            return Err(Error::InvalidDelimiters {
                value,
                reason: "whitespace and ':' cannot be delimiters",
            });
        }
        Ok(Self {
            open: open as u8,
            close: close as u8,
        })
    }

    pub fn open(self) -> char {
        self.open as char
    }

    pub fn close(self) -> char {
        self.close as char
    }

    pub(crate) fn open_byte(self) -> u8 {
        self.open
    }

    pub(crate) fn close_byte(self) -> u8 {
        self.close
    }

    /// True if `c` is either delimiter.
    pub fn contains(self, c: char) -> bool {
        c == self.open() || c == self.close()
    }
}

impl Default for DelimiterPair {
    fn default() -> Self {
        Self::BRACES
    }
}

impl FromStr for DelimiterPair {
    type Err = Error;

    /// Accepts a literal pair such as `{}` or one of the names
    /// `braces`, `brackets`, `parens`.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "braces" | "curly" => return Ok(Self::BRACES),
            "brackets" | "square" => return Ok(Self::BRACKETS),
            "parens" | "parentheses" => return Ok(Self::PARENS),
            _ => {}
        }

        let mut chars = s.trim().chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(open), Some(close), None) => Self::new(open, close),
            _ => Err(Error::InvalidDelimiters {
                value: s.to_string(),
                reason: "expected two characters such as '{}' or a name such as 'brackets'",
            }),
        }
    }
}

impl TryFrom<String> for DelimiterPair {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<DelimiterPair> for String {
    fn from(pair: DelimiterPair) -> Self {
        pair.to_string()
    }
}

impl std::fmt::Display for DelimiterPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.open(), self.close())
    }
}

/// How the balancer treats delimiters that appear inside quoted text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScanMode {
    /// Every delimiter character counts, quoted or not.
    #[default]
    Naive,
    /// Delimiters inside `"..."`, `'...'` or `` `...` `` are ignored.
    ///
    /// Comments are not recognised: an apostrophe in `// don't` opens a
    /// quoted run like any other.
    StringAware,
}

/// Options shared by every locate/replace call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockOptions {
    pub delimiters: DelimiterPair,
    pub scan: ScanMode,
}

impl BlockOptions {
    pub fn with_delimiters(mut self, delimiters: DelimiterPair) -> Self {
        self.delimiters = delimiters;
        self
    }

    pub fn with_scan(mut self, scan: ScanMode) -> Self {
        self.scan = scan;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("{}", DelimiterPair::BRACES)]
    #[case("braces", DelimiterPair::BRACES)]
    #[case("[]", DelimiterPair::BRACKETS)]
    #[case("Brackets", DelimiterPair::BRACKETS)]
    #[case("()", DelimiterPair::PARENS)]
    #[case(" parens ", DelimiterPair::PARENS)]
    fn parses_pairs_and_names(#[case] input: &str, #[case] expected: DelimiterPair) {
        assert_eq!(input.parse::<DelimiterPair>().unwrap(), expected);
    }

    #[rstest]
    #[case("{")]
    #[case("{}}")]
    #[case("||")]
    #[case("«»")]
    #[case(": ")]
    fn rejects_bad_pairs(#[case] input: &str) {
        assert!(matches!(
            input.parse::<DelimiterPair>(),
            Err(Error::InvalidDelimiters { .. })
        ));
    }

    #[test]
    fn displays_as_literal_pair() {
        assert_eq!(DelimiterPair::BRACKETS.to_string(), "[]");
    }

    #[test]
    fn default_options_are_naive_braces() {
        let options = BlockOptions::default();
        assert_eq!(options.delimiters, DelimiterPair::BRACES);
        assert_eq!(options.scan, ScanMode::Naive);
    }
}
