// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # STARFISH Firmware
//!
//! Board support for the STARFISH actuator rig on an STM32F767ZI (Nucleo-144). The command
//! engine itself lives in `starfish-core`; this crate wires it to the USART console, the PWM
//! timers driving the sixteen arm pins, and the SysTick millisecond clock.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`hw`] | MCU-level wrappers around USART, timers, SysTick and the status LED |
//!
//! ## Getting Started
//!
//! Build docs:
//!
//! ```bash
//! cargo doc --no-deps --open
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cargo run -p starfish --release --target thumbv7em-none-eabihf
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![no_std]

pub mod hw;
