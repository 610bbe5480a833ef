// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Operator-facing console text.
//!
//! Every helper writes whole lines terminated with CRLF so the output renders correctly in
//! `screen` and similar terminals.

use core::fmt::{self, Write};

use crate::command::Rejection;
use crate::config::MAX_LINE_LEN;

pub const BANNER: &str = "Initialization Complete";
pub const READY_PROMPT: &str = "Enter a command when ready:";
pub const INPUT_ECHO: &str = "Command(s) Input: ";
pub const NO_COMMANDS: &str = "No Commands Entered";
pub const DUPLICATE_COMMANDS: &str = "Duplicate Commands Entered";
pub const INVALID_COMMANDS: &str = "Invalid Command(s): ";
pub const REENTER_PROMPT: &str = "Please re-enter commands:";
pub const EXECUTING: &str = "Executing Commands: ";
pub const COMPLETED: &str = "Commands Completed";
pub const ERROR_PREFIX: &str = "Error: ";

/// Displays a token list joined with `", "`.
#[derive(Copy, Clone)]
pub struct Joined<'a, 'b>(pub &'a [&'b str]);

impl fmt::Display for Joined<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(token)?;
        }
        Ok(())
    }
}

pub fn banner<W: Write>(out: &mut W) -> fmt::Result {
    write!(out, "{BANNER}\r\n{READY_PROMPT}\r\n\r\n")
}

pub fn echo<W: Write>(out: &mut W, line: &str) -> fmt::Result {
    write!(out, "{INPUT_ECHO}{line}\r\n")
}

/// Echo of a line that did not fit: its first [`MAX_LINE_LEN`] bytes, then `...`.
///
/// `head` must be ASCII, as produced by the line assembler.
pub fn echo_truncated<W: Write>(out: &mut W, head: &str) -> fmt::Result {
    let head = head.trim_start();
    let head = head.get(..MAX_LINE_LEN).unwrap_or(head);
    write!(out, "{INPUT_ECHO}{head}...\r\n")
}

/// Blank line followed by the re-entry prompt.
pub fn reenter<W: Write>(out: &mut W) -> fmt::Result {
    write!(out, "\r\n{REENTER_PROMPT}\r\n")
}

/// Diagnostic for a rejected batch, ending with the re-entry prompt.
pub fn rejection<W: Write>(out: &mut W, rejection: &Rejection<'_>) -> fmt::Result {
    write!(out, "{rejection}")?;
    reenter(out)
}

/// Single `Error: ...` log line, no prompt.
pub fn error<W: Write, E: fmt::Display>(out: &mut W, err: &E) -> fmt::Result {
    write!(out, "{ERROR_PREFIX}{err}\r\n")
}

/// `Error: ...` line followed by the re-entry prompt.
pub fn error_reenter<W: Write, E: fmt::Display>(out: &mut W, err: &E) -> fmt::Result {
    error(out, err)?;
    reenter(out)
}

pub fn executing<W: Write>(out: &mut W, tokens: &[&str]) -> fmt::Result {
    write!(out, "{EXECUTING}{}\r\n", Joined(tokens))
}

pub fn completed<W: Write>(out: &mut W) -> fmt::Result {
    write!(out, "{COMPLETED}\r\n\r\n")
}
