// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Serial command protocol: byte stream to lines, lines to tokens, and the text sent back to
//! the operator.

pub mod line;
pub mod messages;
pub mod tokenizer;

pub use line::{Line, LineBuffer, Overflow};
pub use tokenizer::{tokenize, InputTooLong, Tokens};
