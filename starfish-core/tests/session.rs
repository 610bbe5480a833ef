//! End-to-end console behaviour: serial bytes in, operator text and pin writes out.

use std::cell::Cell;

use proptest::prelude::*;
use starfish_core::command::ArmLayout;
use starfish_core::config::{MAX_PIN_NUMBER, POLL_INTERVAL_MS};
use starfish_core::{ActuationConfig, Clock, CommandTable, Pin, PinDriver, Session};

const DWELL: u32 = 1_000;

#[derive(Default)]
struct Bank {
    levels: [u16; MAX_PIN_NUMBER as usize],
    /// `(time, pin, duty)` for every write.
    log: Vec<(u32, u8, u16)>,
    now: u32,
}

impl Bank {
    fn on(&self) -> Vec<u8> {
        (0..MAX_PIN_NUMBER)
            .filter(|&p| self.levels[p as usize] > 0)
            .collect()
    }
}

impl PinDriver for Bank {
    fn supports(&self, _pin: Pin) -> bool {
        true
    }

    fn max_duty(&self) -> u16 {
        255
    }

    fn set_duty(&mut self, pin: Pin, duty: u16) {
        self.levels[pin.index()] = duty;
        self.log.push((self.now, pin.number(), duty));
    }
}

struct Ticks(Cell<u32>);

impl Clock for Ticks {
    fn now_ms(&self) -> u32 {
        self.0.get()
    }
}

struct Rig {
    session: Session<'static>,
    bank: Bank,
    clock: Ticks,
    out: String,
}

impl Rig {
    fn new() -> Self {
        let table = CommandTable::from_layout(&ArmLayout::STARFISH).unwrap();
        let config = ActuationConfig::default().with_dwell_ms(DWELL);
        Self {
            session: Session::new(table, config),
            bank: Bank::default(),
            clock: Ticks(Cell::new(0)),
            out: String::new(),
        }
    }

    fn send(&mut self, text: &str) {
        for &b in text.as_bytes() {
            let now = self.clock.now_ms();
            self.bank.now = now;
            self.session
                .receive(b, now, &mut self.bank, &mut self.out);
        }
    }

    /// Run the main loop in 10 ms steps until the session is idle.
    fn settle(&mut self) {
        while self.session.is_busy() {
            self.clock.0.set(self.clock.now_ms() + 10);
            let now = self.clock.now_ms();
            self.bank.now = now;
            self.session.service(now, &mut self.bank, &mut self.out);
            assert!(self.bank.on().len() <= 2);
        }
    }

    fn take_output(&mut self) -> String {
        std::mem::take(&mut self.out)
    }
}

#[test]
fn banner_then_prompt() {
    let rig = Rig::new();
    let mut out = String::new();
    rig.session.banner(&mut out);
    assert_eq!(
        out,
        "Initialization Complete\r\nEnter a command when ready:\r\n\r\n"
    );
}

#[test]
fn duplicate_scenario() {
    let mut rig = Rig::new();
    rig.send("a1 a1\r\n");
    assert_eq!(
        rig.take_output(),
        "Command(s) Input: a1 a1\r\n\
         Duplicate Commands Entered\r\n\
         Invalid Command(s): a1\r\n\
         \r\n\
         Please re-enter commands:\r\n"
    );
    assert!(!rig.session.is_busy());
    assert!(rig.bank.on().is_empty());
}

#[test]
fn unknown_scenario() {
    let mut rig = Rig::new();
    rig.send("a1 zz9\n");
    assert_eq!(
        rig.take_output(),
        "Command(s) Input: a1 zz9\r\n\
         Invalid Command(s): zz9\r\n\
         \r\n\
         Please re-enter commands:\r\n"
    );
}

#[test]
fn overlong_line_is_reported_and_discarded() {
    let mut rig = Rig::new();
    let long = format!("{}\n", "a1 ".repeat(200));
    rig.send(&long);
    let out = rig.take_output();
    assert!(out.starts_with("Command(s) Input: a1 a1 a1"));
    assert!(out.ends_with("...\r\nError: Input command too long\r\n\r\nPlease re-enter commands:\r\n"));
    assert!(rig.bank.on().is_empty());

    rig.send("b1\n");
    assert!(rig.take_output().contains("Executing Commands: b1"));
}

#[test]
fn line_over_limit_but_within_buffer_is_rejected_by_length() {
    let mut rig = Rig::new();
    // 300 bytes: fits the line buffer, fails the 256-byte limit after trimming.
    let line = "b2 ".repeat(100);
    rig.send(&format!("  {line}\n"));

    let out = rig.take_output();
    assert_eq!(
        out,
        format!(
            "Command(s) Input: {}\r\n\
             Error: Input command too long\r\n\
             \r\n\
             Please re-enter commands:\r\n",
            line.trim()
        )
    );
    assert!(rig.bank.log.iter().all(|&(_, _, duty)| duty == 0));
    assert!(!rig.session.is_busy());
    assert_eq!(rig.session.pending_input(), 0);

    rig.send("b2\n");
    assert!(rig.take_output().contains("Executing Commands: b2"));
}

#[test]
fn four_pins_run_in_two_rounds() {
    let mut rig = Rig::new();
    rig.send("a1 b1 c1 d1\n");
    assert_eq!(rig.bank.on(), vec![0, 4]);
    rig.settle();

    let on_at = |pin: u8| {
        rig.bank
            .log
            .iter()
            .find(|&&(_, p, d)| p == pin && d > 0)
            .map(|&(t, _, _)| t)
            .unwrap()
    };
    assert_eq!(on_at(0), 0);
    assert_eq!(on_at(4), 0);
    assert!(on_at(8) >= DWELL);
    assert!(on_at(12) >= DWELL);

    let finished = rig.clock.now_ms();
    assert!(finished <= 2 * DWELL + 2 * POLL_INTERVAL_MS);

    let out = rig.take_output();
    assert!(out.starts_with("Command(s) Input: a1 b1 c1 d1\r\nExecuting Commands: a1, b1, c1, d1\r\n"));
    assert!(out.ends_with("Commands Completed\r\n\r\n"));
}

#[test]
fn input_during_batch_is_dropped_not_queued() {
    let mut rig = Rig::new();
    rig.send("c2\n");
    rig.send("d3\n");
    assert!(rig.take_output().contains("Error: Commands still executing"));

    rig.settle();
    assert!(rig
        .bank
        .log
        .iter()
        .all(|&(_, pin, duty)| pin != 14 || duty == 0));
}

fn run_line(rig: &mut Rig, line: &str) -> (String, Vec<(u8, u16)>) {
    rig.take_output();
    let start = rig.bank.log.len();
    rig.send(line);
    rig.send("\n");
    rig.settle();
    let writes = rig.bank.log[start..]
        .iter()
        .map(|&(_, pin, duty)| (pin, duty))
        .collect();
    (rig.take_output(), writes)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn history_does_not_leak_into_next_batch(
        history in prop::collection::vec(
            prop_oneof![
                Just("a1 a1"), Just(""), Just("zz9"), Just("a1 b2"), Just("d4 c3 b2 a1"), Just("x y z"),
            ],
            0..6,
        ),
        probe in prop_oneof![Just("b3 c1"), Just("a2 a2"), Just("q")],
    ) {
        let mut fresh = Rig::new();
        let expected = run_line(&mut fresh, probe);

        let mut used = Rig::new();
        for line in &history {
            run_line(&mut used, line);
        }
        prop_assert_eq!(used.session.pending_input(), 0);
        prop_assert!(!used.session.is_busy());
        prop_assert_eq!(run_line(&mut used, probe), expected);
    }
}
