// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Limits and tunables for command handling and actuation.
//!
//! The `const` items size the fixed-capacity buffers and are baked in at compile time.
//! [`ActuationConfig`] carries the settings that may differ per deployment.

/// Number of addressable pins. Valid pin numbers are `0..MAX_PIN_NUMBER`.
pub const MAX_PIN_NUMBER: u8 = 16;

/// Longest accepted input line in bytes, after trimming.
pub const MAX_LINE_LEN: usize = 256;

/// Upper bound on tokens in one line: every token needs at least one byte plus a delimiter.
pub const MAX_TOKENS: usize = MAX_LINE_LEN / 2;

/// Largest batch the scheduler accepts.
pub const MAX_BATCH_LEN: usize = 16;

/// Default number of pins allowed to be active at once.
pub const MAX_CONCURRENT_ACTUATIONS: usize = 2;

/// Scheduler polling interval (ms).
pub const POLL_INTERVAL_MS: u32 = 100;

/// Default time a pin is held active (ms).
pub const DEFAULT_DWELL_MS: u32 = 5_000;

/// Default duty cycle while a pin is active (percent).
pub const DEFAULT_DUTY_PERCENT: u8 = 100;

/// Token delimiter on the command line.
pub const DELIMITER: char = ' ';

/// Runtime actuation settings.
///
/// Fields are only reachable through the `with_*` setters, which keep every value in range.
///
/// ```
/// use starfish_core::ActuationConfig;
///
/// let cfg = ActuationConfig::default()
///     .with_dwell_ms(500)
///     .with_duty_percent(40);
/// assert_eq!(cfg.concurrency_cap(), 2);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ActuationConfig {
    duty_percent: u8,
    dwell_ms: u32,
    concurrency_cap: usize,
    max_batch_len: usize,
}

impl Default for ActuationConfig {
    fn default() -> Self {
        Self {
            duty_percent: DEFAULT_DUTY_PERCENT,
            dwell_ms: DEFAULT_DWELL_MS,
            concurrency_cap: MAX_CONCURRENT_ACTUATIONS,
            max_batch_len: MAX_BATCH_LEN,
        }
    }
}

impl ActuationConfig {
    /// Set the duty cycle, clamped to 100%.
    pub fn with_duty_percent(mut self, percent: u8) -> Self {
        self.duty_percent = percent.min(100);
        self
    }

    /// Set the dwell time.
    pub fn with_dwell_ms(mut self, ms: u32) -> Self {
        self.dwell_ms = ms;
        self
    }

    /// Set the concurrency cap. A cap of zero would never start a pin, so it is raised to 1.
    pub fn with_concurrency_cap(mut self, cap: usize) -> Self {
        self.concurrency_cap = cap.max(1);
        self
    }

    /// Set the batch limit, clamped to `1..=MAX_BATCH_LEN`.
    pub fn with_max_batch_len(mut self, len: usize) -> Self {
        self.max_batch_len = len.clamp(1, MAX_BATCH_LEN);
        self
    }

    /// Output level while active, 0..=100.
    #[inline]
    pub fn duty_percent(&self) -> u8 {
        self.duty_percent
    }

    /// How long each pin stays active (ms).
    #[inline]
    pub fn dwell_ms(&self) -> u32 {
        self.dwell_ms
    }

    /// Maximum number of simultaneously active pins. Never zero.
    #[inline]
    pub fn concurrency_cap(&self) -> usize {
        self.concurrency_cap
    }

    /// Largest batch accepted. Never above [`MAX_BATCH_LEN`].
    #[inline]
    pub fn max_batch_len(&self) -> usize {
        self.max_batch_len
    }

    /// Scale the duty percentage onto a channel whose full-on value is `max_duty`.
    #[inline]
    pub fn duty_for(&self, max_duty: u16) -> u16 {
        ((max_duty as u32 * self.duty_percent as u32) / 100) as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duty_scales_onto_channel_range() {
        let cfg = ActuationConfig::default();
        assert_eq!(cfg.duty_for(255), 255);

        let cfg = cfg.with_duty_percent(50);
        assert_eq!(cfg.duty_for(1000), 500);
        assert_eq!(cfg.duty_for(0), 0);
    }

    #[test]
    fn setters_clamp_out_of_range_values() {
        let cfg = ActuationConfig::default()
            .with_duty_percent(180)
            .with_concurrency_cap(0)
            .with_max_batch_len(64);

        assert_eq!(cfg.duty_percent(), 100);
        assert_eq!(cfg.concurrency_cap(), 1);
        assert_eq!(cfg.max_batch_len(), MAX_BATCH_LEN);

        assert_eq!(cfg.with_max_batch_len(0).max_batch_len(), 1);
    }
}
