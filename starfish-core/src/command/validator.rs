// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Batch validation.
//!
//! Checks run in a fixed priority order: blank, then duplicates, then unknown tokens. The first
//! category that has any offenders decides the rejection, and every offender of that category
//! is collected before returning.

use core::fmt;

use crate::command::table::CommandTable;
use crate::protocol::messages::{Joined, DUPLICATE_COMMANDS, INVALID_COMMANDS, NO_COMMANDS};
use crate::protocol::Tokens;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// No tokens on the line.
    Blank,
    /// At least one token appears more than once.
    Duplicate,
    /// At least one token is not in the command table.
    Unknown,
}

/// A rejected batch and the tokens responsible.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rejection<'a> {
    reason: RejectReason,
    offenders: Tokens<'a>,
}

impl<'a> Rejection<'a> {
    #[inline]
    pub fn reason(&self) -> RejectReason {
        self.reason
    }

    /// Offending tokens. Each duplicate is listed once, in order of first appearance.
    #[inline]
    pub fn offenders(&self) -> &[&'a str] {
        &self.offenders
    }
}

/// Renders the category lines of the operator diagnostic.
impl fmt::Display for Rejection<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let offenders = Joined(&self.offenders);
        match self.reason {
            RejectReason::Blank => write!(f, "{NO_COMMANDS}\r\n"),
            RejectReason::Duplicate => {
                write!(f, "{DUPLICATE_COMMANDS}\r\n{INVALID_COMMANDS}{offenders}\r\n")
            }
            RejectReason::Unknown => write!(f, "{INVALID_COMMANDS}{offenders}\r\n"),
        }
    }
}

/// A non-empty batch of distinct, known tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidBatch<'a> {
    tokens: Tokens<'a>,
}

impl<'a> ValidBatch<'a> {
    #[inline]
    pub fn tokens(&self) -> &[&'a str] {
        &self.tokens
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// A validated batch is never empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn into_tokens(self) -> Tokens<'a> {
        self.tokens
    }
}

/// Classify a batch against `table`.
pub fn validate<'a>(batch: Tokens<'a>, table: &CommandTable<'_>) -> Result<ValidBatch<'a>, Rejection<'a>> {
    if batch.is_empty() {
        return Err(Rejection {
            reason: RejectReason::Blank,
            offenders: Tokens::new(),
        });
    }

    let duplicates = duplicates(&batch);
    if !duplicates.is_empty() {
        return Err(Rejection {
            reason: RejectReason::Duplicate,
            offenders: duplicates,
        });
    }

    let unknown: Tokens<'a> = batch
        .iter()
        .copied()
        .filter(|token| !table.contains(token))
        .collect();
    if !unknown.is_empty() {
        return Err(Rejection {
            reason: RejectReason::Unknown,
            offenders: unknown,
        });
    }

    Ok(ValidBatch { tokens: batch })
}

/// Tokens that occur at least twice, each reported at its first occurrence.
fn duplicates<'a>(batch: &[&'a str]) -> Tokens<'a> {
    batch
        .iter()
        .enumerate()
        .filter(|&(i, token)| !batch[..i].contains(token) && batch[i + 1..].contains(token))
        .map(|(_, &token)| token)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::ArmLayout;
    use crate::protocol::tokenize;
    use proptest::prelude::*;

    fn table() -> CommandTable<'static> {
        CommandTable::from_layout(&ArmLayout::STARFISH).unwrap()
    }

    fn check(line: &str) -> Result<ValidBatch<'_>, Rejection<'_>> {
        validate(tokenize(line, ' ').unwrap(), &table())
    }

    #[test]
    fn accepts_known_distinct_tokens_in_order() {
        let batch = check("c2 a1 d4").unwrap();
        assert_eq!(batch.tokens(), &["c2", "a1", "d4"]);
    }

    #[test]
    fn empty_line_is_blank() {
        let rej = check("").unwrap_err();
        assert_eq!(rej.reason(), RejectReason::Blank);
        assert!(rej.offenders().is_empty());
    }

    #[test]
    fn duplicate_reported_once() {
        let rej = check("a1 a1").unwrap_err();
        assert_eq!(rej.reason(), RejectReason::Duplicate);
        assert_eq!(rej.offenders(), &["a1"]);

        let rej = check("b2 a1 b2 a1 b2").unwrap_err();
        assert_eq!(rej.offenders(), &["b2", "a1"]);
    }

    #[test]
    fn duplicates_outrank_unknown_tokens() {
        let rej = check("zz9 a1 qq a1").unwrap_err();
        assert_eq!(rej.reason(), RejectReason::Duplicate);
        assert_eq!(rej.offenders(), &["a1"]);
    }

    #[test]
    fn unknown_tokens_all_listed() {
        let rej = check("a1 zz9").unwrap_err();
        assert_eq!(rej.reason(), RejectReason::Unknown);
        assert_eq!(rej.offenders(), &["zz9"]);

        let rej = check("A1 b2 e1 c5").unwrap_err();
        assert_eq!(rej.offenders(), &["A1", "e1", "c5"]);
    }

    #[test]
    fn revalidating_a_valid_batch_is_a_no_op() {
        let batch = check("a1 b1").unwrap();
        let again = validate(batch.clone().into_tokens(), &table()).unwrap();
        assert_eq!(again, batch);
    }

    #[test]
    fn diagnostic_text() {
        assert_eq!(check("").unwrap_err().to_string(), "No Commands Entered\r\n");
        assert_eq!(
            check("a1 a1 b1 b1").unwrap_err().to_string(),
            "Duplicate Commands Entered\r\nInvalid Command(s): a1, b1\r\n"
        );
        assert_eq!(
            check("a1 zz9 x").unwrap_err().to_string(),
            "Invalid Command(s): zz9, x\r\n"
        );
    }

    fn known_token() -> impl Strategy<Value = &'static str> {
        prop::sample::select(table().iter().map(|(t, _)| t).collect::<Vec<_>>())
    }

    proptest! {
        #[test]
        fn distinct_known_tokens_are_valid(
            tokens in prop::sample::subsequence(table().iter().map(|(t, _)| t).collect::<Vec<_>>(), 1..=16)
                .prop_shuffle()
        ) {
            let batch = validate(Tokens::from_slice(&tokens).unwrap(), &table()).unwrap();
            prop_assert_eq!(batch.tokens(), tokens.as_slice());
        }

        #[test]
        fn any_repeat_is_a_duplicate(
            mut tokens in prop::collection::vec(prop_oneof![known_token(), Just("zz9"), Just("q")], 1..10),
            repeat in any::<prop::sample::Index>(),
        ) {
            let dup = *repeat.get(&tokens);
            tokens.push(dup);
            let rej = validate(Tokens::from_slice(&tokens).unwrap(), &table()).unwrap_err();
            prop_assert_eq!(rej.reason(), RejectReason::Duplicate);
            prop_assert_eq!(rej.offenders().iter().filter(|&&t| t == dup).count(), 1);
        }

        #[test]
        fn unknown_tokens_are_listed_in_order(
            unknown in prop::sample::subsequence(vec!["e1", "zz9", "A1", "x", "a0", "d5"], 1..=6),
            known in prop::sample::subsequence(table().iter().map(|(t, _)| t).collect::<Vec<_>>(), 0..=8),
        ) {
            let mut tokens = known.clone();
            tokens.extend(unknown.iter().copied());
            let rej = validate(Tokens::from_slice(&tokens).unwrap(), &table()).unwrap_err();
            prop_assert_eq!(rej.reason(), RejectReason::Unknown);
            prop_assert_eq!(rej.offenders(), unknown.as_slice());
        }
    }
}
