// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Operator session: the control loop's view of the command engine.
//!
//! The firmware main loop does two things per iteration: feeds any received serial byte to
//! [`Session::receive`] and calls [`Session::service`] so the scheduler can advance. Neither
//! blocks, so the console stays responsive while pins are held.
//!
//! All transient state (partial line, scheduler work-list) lives here and is cleared at the
//! end of every batch, accepted or rejected.

use core::fmt::{self, Write};

use crate::actuation::{ActuationError, Completion, PinDriver, Scheduler};
use crate::command::{validate, CommandTable, Rejection};
use crate::config::{ActuationConfig, DELIMITER};
use crate::protocol::{messages, tokenize, InputTooLong, LineBuffer};

/// Why a line did not start a batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error<'a> {
    InputTooLong(InputTooLong),
    Rejected(Rejection<'a>),
    Actuation(ActuationError),
}

impl From<InputTooLong> for Error<'_> {
    fn from(e: InputTooLong) -> Self {
        Error::InputTooLong(e)
    }
}

impl<'a> From<Rejection<'a>> for Error<'a> {
    fn from(e: Rejection<'a>) -> Self {
        Error::Rejected(e)
    }
}

impl From<ActuationError> for Error<'_> {
    fn from(e: ActuationError) -> Self {
        Error::Actuation(e)
    }
}

impl fmt::Display for Error<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InputTooLong(e) => write!(f, "{e}"),
            Error::Rejected(e) => write!(f, "{e}"),
            Error::Actuation(e) => write!(f, "{e}"),
        }
    }
}

pub struct Session<'t> {
    table: CommandTable<'t>,
    scheduler: Scheduler,
    line: LineBuffer,
    delimiter: char,
}

impl<'t> Session<'t> {
    pub fn new(table: CommandTable<'t>, config: ActuationConfig) -> Self {
        Self {
            table,
            scheduler: Scheduler::new(config),
            line: LineBuffer::new(),
            delimiter: DELIMITER,
        }
    }

    /// Use a token delimiter other than space.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[inline]
    pub fn is_busy(&self) -> bool {
        self.scheduler.is_busy()
    }

    /// Bytes of the line currently being received.
    #[inline]
    pub fn pending_input(&self) -> usize {
        self.line.pending()
    }

    pub fn banner<W: Write>(&self, out: &mut W) {
        let _ = messages::banner(out);
    }

    /// Feed one byte from the serial port. A completed line is handled immediately.
    ///
    /// A line too long for the buffer is echoed truncated and reported. While a batch runs it
    /// is reported as busy instead, like any other line.
    pub fn receive<D, W>(&mut self, byte: u8, now_ms: u32, driver: &mut D, out: &mut W)
    where
        D: PinDriver,
        W: Write,
    {
        match self.line.push(byte) {
            None => {}
            Some(Ok(line)) => {
                let _ = self.handle_line(&line, now_ms, driver, out);
            }
            Some(Err(overflow)) => {
                let _ = messages::echo_truncated(out, &overflow.head);
                if self.scheduler.is_busy() {
                    let _ = messages::error_reenter(out, &ActuationError::Busy);
                } else {
                    let _ = messages::error_reenter(out, &overflow.error());
                    self.reset(driver);
                }
            }
        }
    }

    /// Echo, tokenize, validate and start one command line.
    ///
    /// Every failure is reported to `out` with a re-entry prompt before it is returned; the
    /// returned error is for callers that want to inspect it.
    pub fn handle_line<'l, D, W>(
        &mut self,
        line: &'l str,
        now_ms: u32,
        driver: &mut D,
        out: &mut W,
    ) -> Result<(), Error<'l>>
    where
        D: PinDriver,
        W: Write,
    {
        let line = line.trim();
        let _ = messages::echo(out, line);

        if self.scheduler.is_busy() {
            let _ = messages::error_reenter(out, &ActuationError::Busy);
            return Err(ActuationError::Busy.into());
        }

        let result = self.start_line(line, now_ms, driver, out);
        if let Err(e) = &result {
            match e {
                Error::Rejected(rejection) => {
                    let _ = messages::rejection(out, rejection);
                }
                Error::InputTooLong(e) => {
                    let _ = messages::error_reenter(out, e);
                }
                Error::Actuation(e) => {
                    let _ = messages::error_reenter(out, e);
                }
            }
            self.reset(driver);
        }
        result
    }

    /// Advance the running batch, if any. Reports and resets once it completes.
    pub fn service<D, W>(&mut self, now_ms: u32, driver: &mut D, out: &mut W) -> Option<Completion>
    where
        D: PinDriver,
        W: Write,
    {
        if !self.scheduler.is_busy() {
            return None;
        }
        match self.scheduler.poll(driver, now_ms) {
            Ok(done) => {
                let _ = messages::completed(out);
                self.reset(driver);
                Some(done)
            }
            Err(_) => None,
        }
    }

    /// Drive every bound pin to zero and drop any partial input.
    ///
    /// Does nothing while a batch is in flight; batches always run to completion.
    pub fn reset<D: PinDriver>(&mut self, driver: &mut D) {
        if self.scheduler.is_busy() {
            return;
        }
        self.line.clear();
        for pin in self.table.pins() {
            if driver.supports(pin) {
                driver.set_duty(pin, 0);
            }
        }
    }

    fn start_line<'l, D, W>(
        &mut self,
        line: &'l str,
        now_ms: u32,
        driver: &mut D,
        out: &mut W,
    ) -> Result<(), Error<'l>>
    where
        D: PinDriver,
        W: Write,
    {
        let tokens = tokenize(line, self.delimiter)?;
        let batch = validate(tokens, &self.table)?;
        self.scheduler
            .start(&batch, &self.table, driver, now_ms, out)?;
        let _ = messages::executing(out, batch.tokens());
        Ok(())
    }
}
