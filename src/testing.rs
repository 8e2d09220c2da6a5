//! Testing utilities and mock implementations
//!
//! This module provides a simulated SPI master and mock GPIO pins for
//! exercising the engine on the host.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use core::cell::{Cell, RefCell};
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::digital::{ErrorKind, ErrorType, InputPin, OutputPin};

use crate::driver::config::{Word, WordWidth};
use crate::driver::slave::LineEngine;
use crate::line::LineState;

// =============================================================================
// Simulated SPI Master
// =============================================================================

/// Bit-level SPI master driving an engine tick by tick
///
/// Timing is CPOL=1/CPHA=1: the clock idles high, the master changes MOSI
/// on the falling edge and samples MISO just before the rising edge.
/// Every level is held for `half_period` ticks.
///
/// # Example
///
/// ```ignore
/// let master = SpiMaster::new(WordWidth::Bits8);
/// let mut slave = SpiSlave::default();
/// slave.try_load(0x42);
/// assert_eq!(master.transfer(&mut slave, &[0x00]), vec![0x42]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SpiMaster {
    width: WordWidth,
    half_period: usize,
    idle_gap: usize,
}

impl SpiMaster {
    /// Master with 8 ticks per half-period and an 8 tick idle gap
    pub fn new(width: WordWidth) -> Self {
        Self {
            width,
            half_period: 8,
            idle_gap: 8,
        }
    }

    pub fn with_half_period(mut self, ticks: usize) -> Self {
        self.half_period = ticks;
        self
    }

    pub fn with_idle_gap(mut self, ticks: usize) -> Self {
        self.idle_gap = ticks;
        self
    }

    fn hold<E: LineEngine>(engine: &mut E, line: LineState, ticks: usize) {
        for _ in 0..ticks {
            engine.tick(line);
        }
    }

    /// Idle gap, then chip-select low for one half-period
    pub fn select<E: LineEngine>(&self, engine: &mut E) {
        Self::hold(engine, LineState::IDLE, self.idle_gap);
        Self::hold(engine, LineState::IDLE.with_cs_n(false), self.half_period);
    }

    /// Chip-select high with the bus back at rest, held for the idle gap
    pub fn deselect<E: LineEngine>(&self, engine: &mut E) {
        Self::hold(engine, LineState::IDLE, self.idle_gap);
    }

    /// Clock raw bits with chip-select held low, returning MISO per bit
    pub fn clock_bits<E: LineEngine>(&self, engine: &mut E, bits: &[bool]) -> Vec<bool> {
        let selected = LineState::IDLE.with_cs_n(false);
        bits.iter()
            .map(|&bit| {
                Self::hold(engine, selected.with_sck(false).with_mosi(bit), self.half_period);
                let sampled = engine.miso();
                Self::hold(engine, selected.with_sck(true).with_mosi(bit), self.half_period);
                sampled
            })
            .collect()
    }

    /// One chip-select frame carrying `words` back to back
    ///
    /// Returns the words the slave sent in the same frame.
    pub fn transfer<E: LineEngine>(&self, engine: &mut E, words: &[Word]) -> Vec<Word> {
        let bits = self.width.bits();
        self.select(engine);
        let received = words
            .iter()
            .map(|&word| {
                let out: Vec<bool> = (0..bits).rev().map(|i| word >> i & 1 == 1).collect();
                self.clock_bits(engine, &out)
                    .into_iter()
                    .fold(0, |acc, bit| (acc << 1) | Word::from(bit))
            })
            .collect();
        self.deselect(engine);
        received
    }
}

// =============================================================================
// Mock GPIO Pins
// =============================================================================

/// Error returned by a failing mock pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockPinError;

impl embedded_hal::digital::Error for MockPinError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Input pin whose level is set through a shared handle
///
/// # Example
///
/// ```ignore
/// let pin = MockInputPin::new(true);
/// let level = pin.handle();
/// level.set(false);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockInputPin {
    level: Rc<Cell<bool>>,
    fail: Rc<Cell<bool>>,
}

impl MockInputPin {
    pub fn new(level: bool) -> Self {
        Self {
            level: Rc::new(Cell::new(level)),
            fail: Rc::new(Cell::new(false)),
        }
    }

    /// Shared handle to the level the pin reports
    pub fn handle(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.level)
    }

    /// Make every following read fail (or succeed again)
    pub fn set_failing(&self, fail: bool) {
        self.fail.set(fail);
    }
}

impl ErrorType for MockInputPin {
    type Error = MockPinError;
}

impl InputPin for MockInputPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        if self.fail.get() {
            return Err(MockPinError);
        }
        Ok(self.level.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

/// Output pin recording every write
#[derive(Debug, Clone, Default)]
pub struct MockOutputPin {
    level: Rc<Cell<Option<bool>>>,
    writes: Rc<RefCell<Vec<bool>>>,
    fail: Rc<Cell<bool>>,
}

impl MockOutputPin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Level last driven, `None` before the first write
    pub fn level(&self) -> Option<bool> {
        self.level.get()
    }

    /// Every level written so far
    pub fn writes(&self) -> Vec<bool> {
        self.writes.borrow().clone()
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.set(fail);
    }

    fn write(&mut self, high: bool) -> Result<(), MockPinError> {
        if self.fail.get() {
            return Err(MockPinError);
        }
        self.level.set(Some(high));
        self.writes.borrow_mut().push(high);
        Ok(())
    }
}

impl ErrorType for MockOutputPin {
    type Error = MockPinError;
}

impl OutputPin for MockOutputPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::config::TransactionState;

    /// Records every line state it is ticked with
    #[derive(Default)]
    struct Recorder {
        lines: Vec<LineState>,
    }

    impl LineEngine for Recorder {
        fn tick(&mut self, line: LineState) {
            self.lines.push(line);
        }

        fn miso(&self) -> bool {
            true
        }

        fn state(&self) -> TransactionState {
            TransactionState::Idle
        }
    }

    #[test]
    fn master_frame_shape() {
        let master = SpiMaster::new(WordWidth::Bits8)
            .with_half_period(2)
            .with_idle_gap(3);
        let mut rec = Recorder::default();
        let seen = master.transfer(&mut rec, &[0x80]);
        assert_eq!(seen, [0xFF]);

        // gap + select + 8 bits * 2 halves + gap
        assert_eq!(rec.lines.len(), 3 + 2 + 8 * 2 * 2 + 3);
        assert!(rec.lines[..3].iter().all(|&l| l == LineState::IDLE));
        assert!(rec.lines[3..5].iter().all(|l| !l.cs_n && l.sck));

        // First bit: clock low with MOSI high, then clock high
        assert_eq!(rec.lines[5], LineState::new(false, false, true));
        assert_eq!(rec.lines[7], LineState::new(false, true, true));
        // Second bit is zero
        assert_eq!(rec.lines[9], LineState::new(false, false, false));
        assert!(rec.lines[rec.lines.len() - 3..].iter().all(|&l| l == LineState::IDLE));
    }

    #[test]
    fn mock_input_pin_follows_handle() {
        let mut pin = MockInputPin::new(true);
        let level = pin.handle();
        assert_eq!(pin.is_high(), Ok(true));
        level.set(false);
        assert_eq!(pin.is_low(), Ok(true));
        pin.set_failing(true);
        assert_eq!(pin.is_high(), Err(MockPinError));
    }

    #[test]
    fn mock_output_pin_records_writes() {
        let mut pin = MockOutputPin::new();
        let probe = pin.clone();
        assert_eq!(probe.level(), None);
        pin.set_low().unwrap();
        pin.set_high().unwrap();
        assert_eq!(probe.level(), Some(true));
        assert_eq!(probe.writes(), [false, true]);
        probe.set_failing(true);
        assert_eq!(pin.set_low(), Err(MockPinError));
    }
}
