// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Splits a command line into tokens.

use core::fmt;

use crate::config::{MAX_LINE_LEN, MAX_TOKENS};

/// Ordered tokens borrowed from one input line.
pub type Tokens<'a> = heapless::Vec<&'a str, MAX_TOKENS>;

/// The line was longer than [`MAX_LINE_LEN`] bytes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct InputTooLong {
    /// Length of the offending line in bytes.
    pub len: usize,
}

impl fmt::Display for InputTooLong {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Input command too long")
    }
}

/// Trim `line` and split it on `delimiter`, skipping empty pieces.
///
/// An empty (or all-delimiter) line gives an empty sequence rather than one blank token.
pub fn tokenize(line: &str, delimiter: char) -> Result<Tokens<'_>, InputTooLong> {
    let line = line.trim();
    if line.len() > MAX_LINE_LEN {
        return Err(InputTooLong { len: line.len() });
    }

    let mut tokens = Tokens::new();
    for token in line.split(delimiter).filter(|t| !t.is_empty()) {
        // A token and its delimiter take at least two bytes, so this never overflows.
        tokens
            .push(token)
            .map_err(|_| InputTooLong { len: line.len() })?;
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn splits_on_delimiter_and_trims_line() {
        let tokens = tokenize("  a1 b3   c2 \t", ' ').unwrap();
        assert_eq!(tokens.as_slice(), &["a1", "b3", "c2"]);
    }

    #[test]
    fn empty_line_yields_no_tokens() {
        assert!(tokenize("", ' ').unwrap().is_empty());
        assert!(tokenize("     ", ' ').unwrap().is_empty());
    }

    #[test]
    fn custom_delimiter() {
        let tokens = tokenize("a1,,b2,c3", ',').unwrap();
        assert_eq!(tokens.as_slice(), &["a1", "b2", "c3"]);
    }

    #[test]
    fn rejects_long_input() {
        let line = "a1 ".repeat(100);
        let err = tokenize(&line, ' ').unwrap_err();
        assert_eq!(err.len, 299);
    }

    #[test]
    fn accepts_input_at_limit() {
        let line = "x".repeat(MAX_LINE_LEN);
        assert_eq!(tokenize(&line, ' ').unwrap().len(), 1);
    }

    #[test]
    fn retokenizing_a_token_is_identity() {
        for token in tokenize("a1 b2 zz9", ' ').unwrap() {
            assert_eq!(tokenize(token, ' ').unwrap().as_slice(), &[token]);
        }
    }

    proptest! {
        #[test]
        fn joined_tokens_round_trip(tokens in prop::collection::vec("[a-z][0-9]{1,2}", 0..40)) {
            let line = tokens.join(",");
            let parsed = tokenize(&line, ',').unwrap();
            let want: Vec<&str> = tokens.iter().map(String::as_str).collect();
            prop_assert_eq!(parsed.as_slice(), want.as_slice());
        }
    }
}
