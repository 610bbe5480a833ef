// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Command Vocabulary
//!
//! ## Modules
//!
//! - [`table`] - Token to pin mapping, fixed at startup.
//! - [`layout`] - Arm-to-pin wiring and the bindings it generates.
//! - [`validator`] - Blank, duplicate and unknown-token checks on a parsed batch.

pub mod layout;
pub mod table;
pub mod validator;

pub use layout::ArmLayout;
pub use table::{CommandTable, ConfigError, Pin, PinOutOfRange};
pub use validator::{validate, RejectReason, Rejection, ValidBatch};
