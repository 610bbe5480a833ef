// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Arm-to-pin wiring of the starfish.
//!
//! Each arm (`a`, `b`, `c`, `d`) exposes four pins. Token `<arm><n>` addresses pin `n` of that
//! arm, counted from 1.

use crate::command::table::{Pin, PinOutOfRange};

pub const ARM_COUNT: usize = 4;
pub const PINS_PER_ARM: usize = 4;

static TOKENS: [[&str; PINS_PER_ARM]; ARM_COUNT] = [
    ["a1", "a2", "a3", "a4"],
    ["b1", "b2", "b3", "b4"],
    ["c1", "c2", "c3", "c4"],
    ["d1", "d2", "d3", "d4"],
];

/// Logical pin numbers for every arm.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ArmLayout {
    arms: [[u8; PINS_PER_ARM]; ARM_COUNT],
}

impl ArmLayout {
    /// Reference wiring: arm `a` on pins 0-3 through arm `d` on pins 12-15.
    pub const STARFISH: ArmLayout = ArmLayout::new([
        [0, 1, 2, 3],
        [4, 5, 6, 7],
        [8, 9, 10, 11],
        [12, 13, 14, 15],
    ]);

    pub const fn new(arms: [[u8; PINS_PER_ARM]; ARM_COUNT]) -> Self {
        Self { arms }
    }

    /// `(token, pin)` pairs in arm order.
    pub fn bindings(&self) -> impl Iterator<Item = (&'static str, u8)> + '_ {
        TOKENS
            .iter()
            .zip(self.arms.iter())
            .flat_map(|(names, pins)| names.iter().copied().zip(pins.iter().copied()))
    }

    /// Check every pin before any of them is configured.
    pub fn validate(&self) -> Result<(), PinOutOfRange> {
        self.pins().try_for_each(|pin| pin.map(drop))
    }

    /// Every pin in the layout, range-checked, in arm order. This is the set of outputs the
    /// board configures at startup.
    pub fn pins(&self) -> impl Iterator<Item = Result<Pin, PinOutOfRange>> + '_ {
        self.arms.iter().flatten().map(|&pin| Pin::new(pin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starfish_bindings_follow_arm_order() {
        let bindings: Vec<_> = ArmLayout::STARFISH.bindings().collect();
        assert_eq!(bindings.len(), ARM_COUNT * PINS_PER_ARM);
        assert_eq!(bindings[0], ("a1", 0));
        assert_eq!(bindings[5], ("b2", 5));
        assert_eq!(bindings[15], ("d4", 15));
    }

    #[test]
    fn starfish_pins_cover_every_output_once() {
        let pins: Vec<u8> = ArmLayout::STARFISH
            .pins()
            .map(|pin| pin.unwrap().number())
            .collect();
        assert_eq!(pins, (0..16).collect::<Vec<u8>>());
    }

    #[test]
    fn validate_reports_first_bad_pin() {
        // Mega-style wiring from the first rig revision.
        let layout = ArmLayout::new([[2, 3, 4, 5], [6, 7, 8, 9], [10, 11, 12, 13], [44, 45, 46, 47]]);
        assert_eq!(layout.validate(), Err(PinOutOfRange { pin: 44 }));
        assert_eq!(layout.pins().filter(Result::is_err).count(), 4);
        assert!(ArmLayout::STARFISH.validate().is_ok());
    }
}
