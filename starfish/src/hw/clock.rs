// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Millisecond time base from SysTick.
//!
//! The binary forwards its `SysTick` exception handler to [`tick`]. The counter wraps after
//! roughly 49.7 days; consumers compare timestamps with wrapping arithmetic.

use core::sync::atomic::{AtomicU32, Ordering};

use cortex_m::peripheral::{syst::SystClkSource, SYST};
use starfish_core::Clock;

static MILLIS: AtomicU32 = AtomicU32::new(0);

/// Advance the millisecond counter. Call once per SysTick interrupt.
#[inline]
pub fn tick() {
    MILLIS.fetch_add(1, Ordering::Relaxed);
}

pub struct SysTickClock {
    _syst: SYST,
}

impl SysTickClock {
    /// Configure SysTick to fire every millisecond from the core clock.
    pub fn start(mut syst: SYST, sysclk_hz: u32) -> Self {
        syst.set_clock_source(SystClkSource::Core);
        syst.set_reload(sysclk_hz / 1_000 - 1);
        syst.clear_current();
        syst.enable_interrupt();
        syst.enable_counter();
        Self { _syst: syst }
    }
}

impl Clock for SysTickClock {
    fn now_ms(&self) -> u32 {
        MILLIS.load(Ordering::Relaxed)
    }
}
