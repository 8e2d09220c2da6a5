//! Receive shifter: serial to parallel.
//!
//! The external master cannot be stalled, so the shifter never waits for
//! its consumer. A word that completes while `downstream_ready` is low is
//! dropped and reception carries on with the next bit.

use crate::driver::config::{Word, WordWidth};
use crate::line::SyncOutput;

/// Result of a word-completing edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RxEvent {
    /// Word completed and the consumer accepted it
    Word(Word),
    /// Word completed while the consumer was not ready; it is lost
    Dropped(Word),
}

/// Serial-to-parallel receive shifter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RxShifter {
    width: WordWidth,
    shift: Word,
    bit_count: u32,
}

impl RxShifter {
    /// Create an empty shifter
    #[must_use]
    pub const fn new(width: WordWidth) -> Self {
        Self {
            width,
            shift: 0,
            bit_count: 0,
        }
    }

    /// Word width
    #[inline(always)]
    pub const fn width(&self) -> WordWidth {
        self.width
    }

    /// Bits accumulated towards the current word
    #[inline(always)]
    pub const fn bit_count(&self) -> u32 {
        self.bit_count
    }

    /// Partial word accumulated so far
    #[inline(always)]
    pub const fn accumulator(&self) -> Word {
        self.shift
    }

    /// Discard any partial word
    pub fn reset(&mut self) {
        self.shift = 0;
        self.bit_count = 0;
    }

    /// Advance one tick
    ///
    /// Returns an event only on the tick whose rising edge completes a word.
    /// `downstream_ready` is sampled on that same tick.
    pub fn tick(&mut self, sync: SyncOutput, downstream_ready: bool) -> Option<RxEvent> {
        if !sync.chip_select_active {
            self.reset();
            return None;
        }
        if !sync.rising_edge {
            return None;
        }

        let shifted = ((self.shift << 1) | Word::from(sync.data)) & self.width.mask();
        if self.bit_count == self.width.bits() - 1 {
            self.reset();
            return Some(if downstream_ready {
                RxEvent::Word(shifted)
            } else {
                RxEvent::Dropped(shifted)
            });
        }

        self.shift = shifted;
        self.bit_count += 1;
        None
    }
}

// =============================================================================
// Tests
// =============================================================================
