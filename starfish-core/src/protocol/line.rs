// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Line assembler for the serial console.
//!
//! Bytes are pushed one at a time as they arrive from the UART. A complete line is handed back
//! when `\n` is seen. Carriage returns are dropped so both `\n` and `\r\n` terminals work.

use crate::config::MAX_LINE_LEN;
use crate::protocol::tokenizer::InputTooLong;

/// Raw capacity before trimming. Leaves room for surrounding whitespace around a line that is
/// still within [`MAX_LINE_LEN`] once trimmed.
pub const LINE_CAPACITY: usize = MAX_LINE_LEN * 2;

/// One received line, without its terminator.
pub type Line = heapless::String<LINE_CAPACITY>;

/// A line longer than [`LINE_CAPACITY`]. Only its first [`LINE_CAPACITY`] bytes are kept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Overflow {
    pub head: Line,
    /// Total bytes received for the line.
    pub len: usize,
}

impl Overflow {
    #[inline]
    pub fn error(&self) -> InputTooLong {
        InputTooLong { len: self.len }
    }
}

enum State {
    Filling,
    /// Line overflowed; keep the head and discard everything up to the next newline.
    Discarding { len: usize },
}

pub struct LineBuffer {
    buf: Line,
    state: State,
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineBuffer {
    pub const fn new() -> Self {
        Self {
            buf: Line::new(),
            state: State::Filling,
        }
    }

    /// Process a single incoming byte. Returns `Some` once a newline completes a line.
    ///
    /// Non-ASCII bytes are stored as `?`, which the validator then rejects as an unknown token.
    pub fn push(&mut self, byte: u8) -> Option<Result<Line, Overflow>> {
        match byte {
            b'\r' => None,
            b'\n' => Some(self.finish()),
            _ => {
                match self.state {
                    State::Filling => {
                        let c = if byte.is_ascii() { byte as char } else { '?' };
                        if self.buf.push(c).is_err() {
                            self.state = State::Discarding {
                                len: self.buf.len() + 1,
                            };
                        }
                    }
                    State::Discarding { ref mut len } => *len += 1,
                }
                None
            }
        }
    }

    /// Bytes buffered so far for the current line.
    #[inline]
    pub fn pending(&self) -> usize {
        match self.state {
            State::Filling => self.buf.len(),
            State::Discarding { len } => len,
        }
    }

    /// Drop any partial line.
    pub fn clear(&mut self) {
        self.buf.clear();
        self.state = State::Filling;
    }

    fn finish(&mut self) -> Result<Line, Overflow> {
        let state = core::mem::replace(&mut self.state, State::Filling);
        let line = core::mem::take(&mut self.buf);
        match state {
            State::Filling => Ok(line),
            State::Discarding { len } => Err(Overflow { head: line, len }),
        }
    }
}
