// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Pin Actuation
//!
//! ## Modules
//!
//! - [`driver`] - Traits the scheduler needs from the board: PWM outputs and a millisecond clock.
//! - [`scheduler`] - Bounded-concurrency, cooperatively polled actuation of a validated batch.

pub mod driver;
pub mod scheduler;

pub use driver::{Clock, PinDriver};
pub use scheduler::{ActuationError, Completion, Scheduler};
