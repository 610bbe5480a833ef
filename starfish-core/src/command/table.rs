// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Command table: immutable mapping from command token to logical pin.
//!
//! Pin numbers are range-checked once, when the table is built. Everything downstream holds a
//! [`Pin`], which cannot name a pin outside `0..MAX_PIN_NUMBER`.

use core::fmt;

use crate::command::layout::ArmLayout;
use crate::config::MAX_PIN_NUMBER;

/// Maximum number of bindings a table can hold.
pub const TABLE_CAPACITY: usize = 32;

/// Logical pin number, guaranteed to be below [`MAX_PIN_NUMBER`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pin(u8);

impl Pin {
    pub const fn new(number: u8) -> Result<Self, PinOutOfRange> {
        if number < MAX_PIN_NUMBER {
            Ok(Self(number))
        } else {
            Err(PinOutOfRange { pin: number })
        }
    }

    #[inline]
    pub const fn number(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A pin number that is not wired on this rig.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PinOutOfRange {
    pub pin: u8,
}

impl fmt::Display for PinOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid pin {}", self.pin)
    }
}

/// Reasons a command table cannot be built. All indicate a broken deployment.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    PinOutOfRange(PinOutOfRange),
    /// The same token is bound twice.
    DuplicateToken,
    /// More than [`TABLE_CAPACITY`] bindings.
    TableFull,
}

impl From<PinOutOfRange> for ConfigError {
    fn from(e: PinOutOfRange) -> Self {
        ConfigError::PinOutOfRange(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::PinOutOfRange(e) => write!(f, "{e} in command table"),
            ConfigError::DuplicateToken => f.write_str("Duplicate command binding"),
            ConfigError::TableFull => f.write_str("Too many command bindings"),
        }
    }
}

/// Token to pin mapping. Read-only after construction.
///
/// Two tokens may share a pin, but each token is bound exactly once.
#[derive(Clone, Debug)]
pub struct CommandTable<'a> {
    entries: heapless::Vec<(&'a str, Pin), TABLE_CAPACITY>,
}

impl<'a> CommandTable<'a> {
    /// Build a table from `(token, pin)` pairs, failing on the first out-of-range pin or
    /// repeated token.
    pub fn new<I>(bindings: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'a str, u8)>,
    {
        let mut entries: heapless::Vec<(&'a str, Pin), TABLE_CAPACITY> = heapless::Vec::new();
        for (token, pin) in bindings {
            let pin = Pin::new(pin)?;
            if entries.iter().any(|&(name, _)| name == token) {
                return Err(ConfigError::DuplicateToken);
            }
            entries
                .push((token, pin))
                .map_err(|_| ConfigError::TableFull)?;
        }
        Ok(Self { entries })
    }

    /// Pin assigned to `token`, if any. Matching is exact and case-sensitive.
    pub fn lookup(&self, token: &str) -> Option<Pin> {
        self.entries
            .iter()
            .find(|(name, _)| *name == token)
            .map(|&(_, pin)| pin)
    }

    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.lookup(token).is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All bindings in construction order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, Pin)> + '_ {
        self.entries.iter().copied()
    }

    /// Every bound pin, in binding order. A shared pin appears once per binding.
    pub fn pins(&self) -> impl Iterator<Item = Pin> + '_ {
        self.entries.iter().map(|&(_, pin)| pin)
    }
}

impl CommandTable<'static> {
    /// Table for an arm layout: `a1`..`a4` through `d1`..`d4`.
    pub fn from_layout(layout: &ArmLayout) -> Result<Self, ConfigError> {
        Self::new(layout.bindings())
    }
}
