// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the STARFISH rig on a Nucleo-F767ZI.
//!
//! Logical pin `n` is arm `n / 4`, coil `n % 4`. Each arm is one timer, each coil one channel:
//!
//! | Arm | Timer | Coil 1 | Coil 2 | Coil 3 | Coil 4 |
//! | --- | ----- | ------ | ------ | ------ | ------ |
//! | a   | TIM1  | PE9    | PE11   | PE13   | PE14   |
//! | b   | TIM2  | PA0    | PA1    | PB10   | PB11   |
//! | c   | TIM3  | PC6    | PC7    | PC8    | PC9    |
//! | d   | TIM4  | PD12   | PD13   | PD14   | PD15   |

use stm32f7xx_hal::{
    gpio::{gpioa, gpiob, gpioc, gpiod, gpioe, Alternate, Output, PushPull},
    pac,
    prelude::*,
};

pub struct BoardPins {
    pub led: gpiob::PB7<Output<PushPull>>, // LD2 (blue)
    pub usart3: Usart3Pins,
    pub arms: ArmPins,
}

/// ST-LINK virtual COM port.
pub struct Usart3Pins {
    pub tx: gpiod::PD8<Alternate<7>>,
    pub rx: gpiod::PD9<Alternate<7>>,
}

pub struct ArmPins {
    pub a: ArmAPins,
    pub b: ArmBPins,
    pub c: ArmCPins,
    pub d: ArmDPins,
}

pub struct ArmAPins {
    pub coil1: gpioe::PE9<Alternate<1>>,  // TIM1_CH1
    pub coil2: gpioe::PE11<Alternate<1>>, // TIM1_CH2
    pub coil3: gpioe::PE13<Alternate<1>>, // TIM1_CH3
    pub coil4: gpioe::PE14<Alternate<1>>, // TIM1_CH4
}

pub struct ArmBPins {
    pub coil1: gpioa::PA0<Alternate<1>>,  // TIM2_CH1
    pub coil2: gpioa::PA1<Alternate<1>>,  // TIM2_CH2
    pub coil3: gpiob::PB10<Alternate<1>>, // TIM2_CH3
    pub coil4: gpiob::PB11<Alternate<1>>, // TIM2_CH4
}

pub struct ArmCPins {
    pub coil1: gpioc::PC6<Alternate<2>>, // TIM3_CH1
    pub coil2: gpioc::PC7<Alternate<2>>, // TIM3_CH2
    pub coil3: gpioc::PC8<Alternate<2>>, // TIM3_CH3
    pub coil4: gpioc::PC9<Alternate<2>>, // TIM3_CH4
}

pub struct ArmDPins {
    pub coil1: gpiod::PD12<Alternate<2>>, // TIM4_CH1
    pub coil2: gpiod::PD13<Alternate<2>>, // TIM4_CH2
    pub coil3: gpiod::PD14<Alternate<2>>, // TIM4_CH3
    pub coil4: gpiod::PD15<Alternate<2>>, // TIM4_CH4
}

impl BoardPins {
    pub fn new(
        gpioa: pac::GPIOA,
        gpiob: pac::GPIOB,
        gpioc: pac::GPIOC,
        gpiod: pac::GPIOD,
        gpioe: pac::GPIOE,
    ) -> Self {
        let gpioa = gpioa.split();
        let gpiob = gpiob.split();
        let gpioc = gpioc.split();
        let gpiod = gpiod.split();
        let gpioe = gpioe.split();

        Self {
            led: gpiob.pb7.into_push_pull_output(),

            usart3: Usart3Pins {
                tx: gpiod.pd8.into_alternate::<7>(),
                rx: gpiod.pd9.into_alternate::<7>(),
            },

            arms: ArmPins {
                a: ArmAPins {
                    coil1: gpioe.pe9.into_alternate::<1>(),
                    coil2: gpioe.pe11.into_alternate::<1>(),
                    coil3: gpioe.pe13.into_alternate::<1>(),
                    coil4: gpioe.pe14.into_alternate::<1>(),
                },
                b: ArmBPins {
                    coil1: gpioa.pa0.into_alternate::<1>(),
                    coil2: gpioa.pa1.into_alternate::<1>(),
                    coil3: gpiob.pb10.into_alternate::<1>(),
                    coil4: gpiob.pb11.into_alternate::<1>(),
                },
                c: ArmCPins {
                    coil1: gpioc.pc6.into_alternate::<2>(),
                    coil2: gpioc.pc7.into_alternate::<2>(),
                    coil3: gpioc.pc8.into_alternate::<2>(),
                    coil4: gpioc.pc9.into_alternate::<2>(),
                },
                d: ArmDPins {
                    coil1: gpiod.pd12.into_alternate::<2>(),
                    coil2: gpiod.pd13.into_alternate::<2>(),
                    coil3: gpiod.pd14.into_alternate::<2>(),
                    coil4: gpiod.pd15.into_alternate::<2>(),
                },
            },
        }
    }
}
