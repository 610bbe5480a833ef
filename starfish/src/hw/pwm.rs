// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Edge-aligned PWM on TIM1..TIM4, one timer per arm.
//!
//! Timers are configured directly through their registers: PWM mode 1 with preload on all four
//! channels, outputs active-high, and a prescaler chosen so the auto-reload fits in 16 bits. A
//! compare value of `max_duty()` holds the output high for the whole period.

use starfish_core::{Pin, PinDriver};
use stm32f7xx_hal::pac;

use super::pins::ArmPins;

/// OCxM = 0b110 (PWM mode 1) and OCxPE set, for both channels of a CCMR register.
const CCMR_PWM1_PRELOAD: u32 = (0b110 << 4) | (1 << 3) | (0b110 << 12) | (1 << 11);

/// CC1E..CC4E, all polarities active-high.
const CCER_ALL_ENABLED: u32 = (1 << 0) | (1 << 4) | (1 << 8) | (1 << 12);

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Channel {
    C1,
    C2,
    C3,
    C4,
}

impl Channel {
    const ALL: [Channel; 4] = [Channel::C1, Channel::C2, Channel::C3, Channel::C4];

    fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }
}

/// Returns `(psc, arr)` for the requested PWM frequency. `arr + 1` never exceeds `u16::MAX`.
fn timing(timer_clk_hz: u32, pwm_hz: u32) -> (u32, u32) {
    let ticks = (timer_clk_hz / pwm_hz.max(1)).max(2);
    let psc = ticks / 0x1_0000;
    let arr = ticks / (psc + 1) - 1;
    (psc, arr)
}

/// Four PWM channels of a single timer.
pub struct PwmTimer<TIM> {
    tim: TIM,
    max_duty: u16,
}

impl<TIM> PwmTimer<TIM> {
    /// Compare value for 100% duty.
    #[inline]
    pub fn max_duty(&self) -> u16 {
        self.max_duty
    }
}

macro_rules! pwm_timer {
    ($TIM:ident, $ctor:ident, $enr:ident, $timen:ident $(, |$t:ident| $extra:block)?) => {
        impl PwmTimer<pac::$TIM> {
            /// Enable the timer clock and start PWM at `pwm_hz` with every channel at 0% duty.
            pub fn $ctor(tim: pac::$TIM, timer_clk_hz: u32, pwm_hz: u32) -> Self {
                let rcc = unsafe { &*pac::RCC::ptr() };
                rcc.$enr.modify(|_, w| w.$timen().set_bit());

                // Disable counter while configuring
                tim.cr1.modify(|_, w| w.cen().clear_bit());

                let (psc, arr) = timing(timer_clk_hz, pwm_hz);
                tim.psc.write(|w| unsafe { w.bits(psc) });
                tim.arr.write(|w| unsafe { w.bits(arr) });

                tim.ccmr1_output()
                    .write(|w| unsafe { w.bits(CCMR_PWM1_PRELOAD) });
                tim.ccmr2_output()
                    .write(|w| unsafe { w.bits(CCMR_PWM1_PRELOAD) });

                tim.ccr1().write(|w| unsafe { w.bits(0) });
                tim.ccr2().write(|w| unsafe { w.bits(0) });
                tim.ccr3().write(|w| unsafe { w.bits(0) });
                tim.ccr4().write(|w| unsafe { w.bits(0) });

                tim.ccer.write(|w| unsafe { w.bits(CCER_ALL_ENABLED) });

                $({
                    let $t = &tim;
                    $extra
                })?

                // Latch PSC/ARR/CCRx, then run
                tim.cr1.modify(|_, w| w.arpe().set_bit());
                tim.egr.write(|w| w.ug().set_bit());
                tim.cr1.modify(|_, w| w.cen().set_bit());

                Self {
                    tim,
                    max_duty: (arr + 1) as u16,
                }
            }

            /// Set the compare value of one channel, clamped to `max_duty()`.
            pub fn set_duty(&mut self, channel: Channel, duty: u16) {
                let duty = u32::from(duty.min(self.max_duty));
                match channel {
                    Channel::C1 => self.tim.ccr1().write(|w| unsafe { w.bits(duty) }),
                    Channel::C2 => self.tim.ccr2().write(|w| unsafe { w.bits(duty) }),
                    Channel::C3 => self.tim.ccr3().write(|w| unsafe { w.bits(duty) }),
                    Channel::C4 => self.tim.ccr4().write(|w| unsafe { w.bits(duty) }),
                }
            }
        }
    };
}

pwm_timer!(TIM1, tim1, apb2enr, tim1en, |tim| {
    // Advanced timer: outputs stay off until main output enable is set
    tim.bdtr.modify(|_, w| w.moe().set_bit());
});
pwm_timer!(TIM2, tim2, apb1enr, tim2en);
pwm_timer!(TIM3, tim3, apb1enr, tim3en);
pwm_timer!(TIM4, tim4, apb1enr, tim4en);

/// All sixteen arm outputs, addressed by logical pin number.
pub struct PwmBank {
    a: PwmTimer<pac::TIM1>,
    b: PwmTimer<pac::TIM2>,
    c: PwmTimer<pac::TIM3>,
    d: PwmTimer<pac::TIM4>,
    max_duty: u16,
    _pins: ArmPins,
}

impl PwmBank {
    pub const PINS_PER_TIMER: usize = 4;
    pub const PIN_COUNT: usize = 4 * Self::PINS_PER_TIMER;

    /// Start all four timers at `pwm_hz`. `timer_clk_hz` must be the timer kernel clock of both
    /// APB buses.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        tim1: pac::TIM1,
        tim2: pac::TIM2,
        tim3: pac::TIM3,
        tim4: pac::TIM4,
        pins: ArmPins,
        timer_clk_hz: u32,
        pwm_hz: u32,
    ) -> Self {
        let a = PwmTimer::tim1(tim1, timer_clk_hz, pwm_hz);
        let b = PwmTimer::tim2(tim2, timer_clk_hz, pwm_hz);
        let c = PwmTimer::tim3(tim3, timer_clk_hz, pwm_hz);
        let d = PwmTimer::tim4(tim4, timer_clk_hz, pwm_hz);
        let max_duty = a
            .max_duty()
            .min(b.max_duty())
            .min(c.max_duty())
            .min(d.max_duty());
        Self {
            a,
            b,
            c,
            d,
            max_duty,
            _pins: pins,
        }
    }
}

impl PinDriver for PwmBank {
    fn supports(&self, pin: Pin) -> bool {
        pin.index() < Self::PIN_COUNT
    }

    fn max_duty(&self) -> u16 {
        self.max_duty
    }

    fn set_duty(&mut self, pin: Pin, duty: u16) {
        let Some(channel) = Channel::from_index(pin.index() % Self::PINS_PER_TIMER) else {
            return;
        };
        match pin.index() / Self::PINS_PER_TIMER {
            0 => self.a.set_duty(channel, duty),
            1 => self.b.set_duty(channel, duty),
            2 => self.c.set_duty(channel, duty),
            3 => self.d.set_duty(channel, duty),
            _ => {}
        }
    }
}
