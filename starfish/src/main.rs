// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

#![no_main]
#![no_std]

use cortex_m_rt::{entry, exception};
use panic_halt as _;

use hal::{
    pac,
    prelude::*,
    serial::{Config, Serial},
};
use stm32f7xx_hal as hal;

use starfish::hw::{clock, BoardPins, Led, PwmBank, SysTickClock, Usart};
use starfish_core::{
    command::{ArmLayout, ConfigError, PinOutOfRange},
    protocol::messages,
    ActuationConfig, Clock, CommandTable, PinDriver, Session,
};

const BAUD_RATE: u32 = 115_200;
const PWM_HZ: u32 = 1_000;

/// Check every arm pin before any of them is driven.
fn load_table(layout: &ArmLayout) -> Result<CommandTable<'static>, ConfigError> {
    layout.validate()?;
    CommandTable::from_layout(layout)
}

/// Drive every pin of the layout to zero, failing on one the PWM bank cannot reach.
fn configure_outputs<D: PinDriver>(layout: &ArmLayout, outputs: &mut D) -> Result<(), ConfigError> {
    for pin in layout.pins() {
        let pin = pin?;
        if !outputs.supports(pin) {
            return Err(PinOutOfRange { pin: pin.number() }.into());
        }
        outputs.set_duty(pin, 0);
    }
    Ok(())
}

fn halt<const P: char, const N: u8>(led: &mut Led<P, N>) -> ! {
    led.on();
    loop {
        cortex_m::asm::wfi();
    }
}

#[entry]
fn main() -> ! {
    // Peripherals
    let dp = pac::Peripherals::take().unwrap();
    let cp = cortex_m::Peripherals::take().unwrap();

    // Clocks (HSI, APB buses undivided, so timers run at SYSCLK)
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();
    let sysclk_hz = clocks.sysclk().raw();

    // GPIO
    let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOC, dp.GPIOD, dp.GPIOE);

    // USART3 (ST-LINK VCP)
    let usart_cfg = Config {
        baud_rate: BAUD_RATE.bps(),
        ..Default::default()
    };
    let serial = Serial::new(
        dp.USART3,
        (pins.usart3.tx, pins.usart3.rx),
        &clocks,
        usart_cfg,
    );
    let mut usart = Usart::new(serial);

    let mut led = Led::active_high(pins.led);
    let clock = SysTickClock::start(cp.SYST, sysclk_hz);

    let layout = ArmLayout::STARFISH;
    let table = match load_table(&layout) {
        Ok(table) => table,
        Err(e) => {
            let _ = messages::error(&mut usart, &e);
            halt(&mut led);
        }
    };

    let mut pwm = PwmBank::new(
        dp.TIM1,
        dp.TIM2,
        dp.TIM3,
        dp.TIM4,
        pins.arms,
        sysclk_hz,
        PWM_HZ,
    );

    if let Err(e) = configure_outputs(&layout, &mut pwm) {
        let _ = messages::error(&mut usart, &e);
        halt(&mut led);
    }

    let mut session = Session::new(table, ActuationConfig::default());
    session.banner(&mut usart);

    loop {
        let now = clock.now_ms();
        if let Some(byte) = usart.read_byte() {
            session.receive(byte, now, &mut pwm, &mut usart);
        }
        session.service(now, &mut pwm, &mut usart);
        led.set(session.is_busy());
    }
}

#[exception]
fn SysTick() {
    clock::tick();
}
