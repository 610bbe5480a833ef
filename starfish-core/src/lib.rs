// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # STARFISH Core
//!
//! Hardware-independent command handling for the STARFISH actuator rig: four arms (`a`..`d`)
//! with four pins each, driven from whitespace-delimited serial commands such as `a1 b3 c2`.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`config`] | Compile-time limits and runtime actuation settings |
//! | [`protocol`] | Line assembly, tokenizing and operator-facing messages |
//! | [`command`] | Command table, arm layout and batch validation |
//! | [`actuation`] | Bounded-concurrency pin scheduler and the traits it drives |
//! | [`session`] | Control-loop glue tying the above to a console |
//!
//! Nothing in here touches registers. The firmware crate implements [`actuation::PinDriver`]
//! and [`actuation::Clock`] for the board and feeds serial bytes into a [`session::Session`].
//!
//! ## Testing
//!
//! ```bash
//! cargo test -p starfish-core
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

pub mod actuation;
pub mod command;
pub mod config;
pub mod protocol;
pub mod session;

pub use actuation::{Clock, PinDriver, Scheduler};
pub use command::{CommandTable, Pin, ValidBatch};
pub use config::ActuationConfig;
pub use session::Session;
