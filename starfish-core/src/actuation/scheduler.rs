// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Bounded-concurrency actuation scheduler.
//!
//! A validated batch becomes a work-list of pins. At most `concurrency_cap` of them are driven
//! at the duty level at once; each stays on for `dwell_ms` and is then driven to zero, freeing
//! its slot for the next pending pin. A pin that was driven to zero leaves the work-list on the
//! following sweep, so the batch completes one poll interval after its last pin goes off.
//!
//! The scheduler never sleeps. The control loop calls [`Scheduler::poll`] as often as it likes
//! and gets `WouldBlock` until the batch is done, so serial input keeps being serviced while
//! pins are held.
//!
//! Typical usage pattern:
//!
//! ```ignore
//! scheduler.start(&batch, &table, &mut pwm, clock.now_ms(), &mut usart)?;
//!
//! loop {
//!     match scheduler.poll(&mut pwm, clock.now_ms()) {
//!         Ok(done) => break,
//!         Err(nb::Error::WouldBlock) => service_serial(),
//!         Err(nb::Error::Other(e)) => return Err(e),
//!     }
//! }
//! ```

use core::fmt::{self, Write};

use crate::actuation::driver::{Clock, PinDriver};
use crate::command::{CommandTable, Pin, PinOutOfRange, ValidBatch};
use crate::config::{ActuationConfig, MAX_BATCH_LEN, POLL_INTERVAL_MS};
use crate::protocol::messages;

/// Lifecycle of one pin within a batch.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Phase {
    /// Waiting for a free slot.
    Pending,
    /// Driven at the duty level since `since_ms`.
    Active { since_ms: u32 },
    /// Driven to zero on the last sweep. Does not hold a slot.
    Cooling,
    /// Finished; dropped from the work-list at the end of the sweep.
    Done,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct PinSlot {
    pin: Pin,
    phase: Phase,
}

impl PinSlot {
    #[inline]
    fn is_active(&self) -> bool {
        matches!(self.phase, Phase::Active { .. })
    }
}

/// Errors from starting or polling a batch.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActuationError {
    /// A batch is already in flight. The new one is dropped, not queued.
    Busy,
    /// Batch exceeds the configured maximum. Nothing was driven.
    BatchTooLarge { len: usize, max: usize },
    /// `poll` called with no batch in flight.
    Idle,
}

impl fmt::Display for ActuationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActuationError::Busy => f.write_str("Commands still executing"),
            ActuationError::BatchTooLarge { .. } => f.write_str("Too many commands"),
            ActuationError::Idle => f.write_str("No commands executing"),
        }
    }
}

/// Summary of a finished batch.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Completion {
    /// Pins that were driven.
    pub actuated: usize,
    /// Pins skipped because the output bank cannot drive them.
    pub skipped: usize,
    pub started_ms: u32,
    pub finished_ms: u32,
}

impl Completion {
    #[inline]
    pub fn elapsed_ms(&self) -> u32 {
        self.finished_ms.wrapping_sub(self.started_ms)
    }
}

#[derive(Copy, Clone, Debug)]
enum State {
    Idle,
    Running { started_ms: u32, last_poll_ms: u32 },
}

pub struct Scheduler {
    config: ActuationConfig,
    slots: heapless::Vec<PinSlot, MAX_BATCH_LEN>,
    state: State,
    actuated: usize,
    skipped: usize,
}

impl Scheduler {
    pub fn new(config: ActuationConfig) -> Self {
        Self {
            config,
            slots: heapless::Vec::new(),
            state: State::Idle,
            actuated: 0,
            skipped: 0,
        }
    }

    /// True while a batch is in flight.
    #[inline]
    pub fn is_busy(&self) -> bool {
        matches!(self.state, State::Running { .. })
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_active()).count()
    }

    /// Begin executing `batch`.
    ///
    /// Resolves every token, logs and skips pins the driver cannot drive, then immediately
    /// activates the first `concurrency_cap` pins. Tokens missing from `table` are skipped
    /// silently; a validated batch never has any.
    pub fn start<D, W>(
        &mut self,
        batch: &ValidBatch<'_>,
        table: &CommandTable<'_>,
        driver: &mut D,
        now_ms: u32,
        log: &mut W,
    ) -> Result<(), ActuationError>
    where
        D: PinDriver,
        W: Write,
    {
        if self.is_busy() {
            return Err(ActuationError::Busy);
        }
        let max = self.config.max_batch_len();
        let too_large = ActuationError::BatchTooLarge {
            len: batch.len(),
            max,
        };
        if batch.len() > max {
            return Err(too_large);
        }

        let mut slots = heapless::Vec::new();
        let mut skipped = 0;
        for pin in batch.tokens().iter().filter_map(|token| table.lookup(token)) {
            if !driver.supports(pin) {
                let _ = messages::error(log, &PinOutOfRange { pin: pin.number() });
                skipped += 1;
                continue;
            }
            slots
                .push(PinSlot {
                    pin,
                    phase: Phase::Pending,
                })
                .map_err(|_| too_large)?;
        }

        self.slots = slots;
        self.actuated = 0;
        self.skipped = skipped;
        self.state = State::Running {
            started_ms: now_ms,
            last_poll_ms: now_ms,
        };
        self.fill(driver, now_ms);
        Ok(())
    }

    /// Advance the batch.
    ///
    /// Sweeps at most once per [`POLL_INTERVAL_MS`]: pins that cooled on the previous sweep
    /// finish, expired pins are driven to zero, and pending pins take any free slots. Returns
    /// the [`Completion`] once the work-list is empty.
    pub fn poll<D: PinDriver>(
        &mut self,
        driver: &mut D,
        now_ms: u32,
    ) -> nb::Result<Completion, ActuationError> {
        let (started_ms, last_poll_ms) = match self.state {
            State::Idle => return Err(nb::Error::Other(ActuationError::Idle)),
            State::Running {
                started_ms,
                last_poll_ms,
            } => (started_ms, last_poll_ms),
        };

        if !self.slots.is_empty() {
            if now_ms.wrapping_sub(last_poll_ms) < POLL_INTERVAL_MS {
                return Err(nb::Error::WouldBlock);
            }
            self.state = State::Running {
                started_ms,
                last_poll_ms: now_ms,
            };
            self.sweep(driver, now_ms);
        }

        if self.slots.is_empty() {
            self.state = State::Idle;
            Ok(Completion {
                actuated: self.actuated,
                skipped: self.skipped,
                started_ms,
                finished_ms: now_ms,
            })
        } else {
            Err(nb::Error::WouldBlock)
        }
    }

    /// Run `batch` to completion, calling `idle` between polls.
    ///
    /// `idle` is where the caller yields to other duties; it must not block for long, since
    /// dwell expiry is only noticed on the next poll.
    pub fn execute<D, C, W, F>(
        &mut self,
        batch: &ValidBatch<'_>,
        table: &CommandTable<'_>,
        driver: &mut D,
        clock: &C,
        log: &mut W,
        mut idle: F,
    ) -> Result<Completion, ActuationError>
    where
        D: PinDriver,
        C: Clock,
        W: Write,
        F: FnMut(),
    {
        self.start(batch, table, driver, clock.now_ms(), log)?;
        loop {
            match self.poll(driver, clock.now_ms()) {
                Ok(done) => return Ok(done),
                Err(nb::Error::WouldBlock) => idle(),
                Err(nb::Error::Other(e)) => return Err(e),
            }
        }
    }

    fn sweep<D: PinDriver>(&mut self, driver: &mut D, now_ms: u32) {
        let dwell = self.config.dwell_ms();
        for slot in self.slots.iter_mut() {
            match slot.phase {
                Phase::Cooling => slot.phase = Phase::Done,
                Phase::Active { since_ms } if now_ms.wrapping_sub(since_ms) >= dwell => {
                    driver.set_duty(slot.pin, 0);
                    slot.phase = Phase::Cooling;
                }
                _ => {}
            }
        }

        self.fill(driver, now_ms);
        self.slots.retain(|slot| slot.phase != Phase::Done);
    }

    /// Activate pending pins while there are free slots.
    fn fill<D: PinDriver>(&mut self, driver: &mut D, now_ms: u32) {
        let duty = self.config.duty_for(driver.max_duty());
        let cap = self.config.concurrency_cap();
        let mut active = self.active_count();

        for slot in self.slots.iter_mut() {
            if active >= cap {
                break;
            }
            if slot.phase == Phase::Pending {
                driver.set_duty(slot.pin, duty);
                slot.phase = Phase::Active { since_ms: now_ms };
                self.actuated += 1;
                active += 1;
            }
        }
    }
}
