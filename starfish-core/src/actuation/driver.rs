// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Hardware seams for the actuation scheduler.

use crate::command::Pin;

/// A bank of PWM outputs addressed by logical pin.
pub trait PinDriver {
    /// Whether `pin` is wired to an output on this board.
    fn supports(&self, pin: Pin) -> bool;

    /// Duty value that drives an output fully on.
    fn max_duty(&self) -> u16;

    /// Set the duty of `pin`. Only called for pins where [`supports`](Self::supports) is true.
    fn set_duty(&mut self, pin: Pin, duty: u16);
}

/// Free-running millisecond counter. Wraps at `u32::MAX`.
pub trait Clock {
    fn now_ms(&self) -> u32;
}
