//! Transmit shifter: parallel to serial.
//!
//! The output line is the most-significant bit of the shift register at all
//! times. A word is loaded while the slave is deselected, so its MSB is
//! already on the line when the transaction starts; the first falling edge
//! after the load therefore does not shift. Each later falling edge shifts
//! left by one, filling with ones, so once a word has left the register the
//! line carries the idle pattern.

use crate::driver::config::{Word, WordWidth};
use crate::line::SyncOutput;

/// Notable transmit-side transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TxEvent {
    /// A transaction started with a staged word on the line
    Started,
    /// A transaction started with nothing staged; the idle pattern goes out
    Underrun,
    /// All bits of the staged word have been shifted out
    Drained,
}

/// Parallel-to-serial transmit shifter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxShifter {
    width: WordWidth,
    shift: Word,
    bit_count: u32,
    loaded: bool,
    first_bit_sent: bool,
    ready_for_load: bool,
    selected: bool,
}

impl TxShifter {
    /// Create a shifter holding the idle pattern
    #[must_use]
    pub const fn new(width: WordWidth) -> Self {
        Self {
            width,
            shift: width.idle_pattern(),
            bit_count: 0,
            loaded: false,
            first_bit_sent: false,
            ready_for_load: true,
            selected: false,
        }
    }

    /// Word width
    #[inline(always)]
    pub const fn width(&self) -> WordWidth {
        self.width
    }

    /// Serial-data-out level
    #[inline(always)]
    pub const fn output(&self) -> bool {
        self.shift & self.width.msb() != 0
    }

    /// True while a staged word has not been fully shifted out
    #[inline(always)]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// True when the shifter holds no pending word
    #[inline(always)]
    pub const fn is_ready_for_load(&self) -> bool {
        self.ready_for_load
    }

    /// Bits shifted out of the current word
    #[inline(always)]
    pub const fn bit_count(&self) -> u32 {
        self.bit_count
    }

    /// Stage the next word
    ///
    /// Accepted only while chip-select is inactive. Loading again before a
    /// transaction replaces the staged word. Bits above the width are
    /// discarded.
    pub fn try_load(&mut self, word: Word) -> bool {
        if self.selected {
            return false;
        }
        self.shift = word & self.width.mask();
        self.bit_count = 0;
        self.loaded = true;
        self.first_bit_sent = false;
        self.ready_for_load = true;
        true
    }

    /// Drop any staged word and return to the idle pattern
    pub fn rearm(&mut self) {
        self.shift = self.width.idle_pattern();
        self.bit_count = 0;
        self.loaded = false;
        self.first_bit_sent = false;
        self.ready_for_load = true;
    }

    /// Return to the power-on state
    pub fn reset(&mut self) {
        *self = Self::new(self.width);
    }

    /// Advance one tick
    pub fn tick(&mut self, sync: SyncOutput) -> Option<TxEvent> {
        if !sync.chip_select_active {
            if self.selected {
                self.selected = false;
                self.rearm();
            }
            return None;
        }

        let mut event = None;
        if !self.selected {
            self.selected = true;
            self.ready_for_load = !self.loaded;
            event = Some(if self.loaded {
                TxEvent::Started
            } else {
                TxEvent::Underrun
            });
        }

        if sync.falling_edge && self.loaded {
            if self.first_bit_sent {
                self.shift = ((self.shift << 1) | 1) & self.width.mask();
                self.bit_count += 1;
                if self.bit_count == self.width.bits() {
                    self.loaded = false;
                    self.ready_for_load = true;
                    self.bit_count = 0;
                    return Some(TxEvent::Drained);
                }
            } else {
                self.first_bit_sent = true;
            }
        }
        event
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    extern crate std;
    use std::vec::Vec;

    use super::*;

    const IDLE: SyncOutput = SyncOutput {
        chip_select_active: false,
        rising_edge: false,
        falling_edge: false,
        data: true,
    };

    const SELECTED: SyncOutput = SyncOutput {
        chip_select_active: true,
        ..IDLE
    };

    const FALLING: SyncOutput = SyncOutput {
        falling_edge: true,
        ..SELECTED
    };

    /// Output level seen before each of `n` falling edges
    fn clock_out(tx: &mut TxShifter, n: usize) -> Vec<bool> {
        let mut bits = Vec::new();
        for _ in 0..n {
            bits.push(tx.output());
            tx.tick(FALLING);
            tx.tick(SELECTED);
        }
        bits
    }

    fn bits_of(word: Word, width: WordWidth) -> Vec<bool> {
        (0..width.bits()).rev().map(|i| word >> i & 1 == 1).collect()
    }

    #[test]
    fn power_on_outputs_idle_pattern() {
        let tx = TxShifter::new(WordWidth::Bits8);
        assert!(tx.output());
        assert!(!tx.is_loaded());
        assert!(tx.is_ready_for_load());
    }

    #[test]
    fn msb_present_as_soon_as_loaded() {
        let mut tx = TxShifter::new(WordWidth::Bits8);
        assert!(tx.try_load(0x42));
        assert!(!tx.output());
        assert!(tx.try_load(0x80));
        assert!(tx.output());
    }

    #[test]
    fn first_falling_edge_does_not_shift() {
        let mut tx = TxShifter::new(WordWidth::Bits8);
        tx.try_load(0x42);
        assert_eq!(tx.tick(SELECTED), Some(TxEvent::Started));

        // The first falling edge carries the preloaded MSB; the next eight
        // present bits 6..0 and then the fill.
        tx.tick(FALLING);
        assert_eq!(tx.bit_count(), 0);
        let mut expected = bits_of(0x42, WordWidth::Bits8);
        expected.remove(0);
        expected.push(true);
        let mut seen = Vec::new();
        for _ in 0..8 {
            tx.tick(FALLING);
            seen.push(tx.output());
        }
        assert_eq!(seen, expected);
    }

    #[test]
    fn word_drains_after_width_shifts() {
        let mut tx = TxShifter::new(WordWidth::Bits8);
        tx.try_load(0x00);
        tx.tick(SELECTED);
        assert!(!tx.is_ready_for_load());

        let mut events = Vec::new();
        for _ in 0..9 {
            events.extend(tx.tick(FALLING));
        }
        assert_eq!(events, [TxEvent::Drained]);
        assert!(!tx.is_loaded());
        assert!(tx.is_ready_for_load());
        assert!(tx.output());
    }

    #[test]
    fn load_rejected_while_selected() {
        let mut tx = TxShifter::new(WordWidth::Bits8);
        tx.tick(SELECTED);
        assert!(!tx.try_load(0x11));
        assert!(tx.output());

        tx.tick(IDLE);
        assert!(tx.try_load(0x11));
    }

    #[test]
    fn unloaded_transaction_sends_all_ones() {
        let mut tx = TxShifter::new(WordWidth::Bits16);
        assert_eq!(tx.tick(SELECTED), Some(TxEvent::Underrun));
        assert!(clock_out(&mut tx, 16).iter().all(|&b| b));
    }

    #[test]
    fn deselect_rearms_with_idle_pattern() {
        let mut tx = TxShifter::new(WordWidth::Bits8);
        tx.try_load(0x0F);
        tx.tick(SELECTED);
        clock_out(&mut tx, 3);
        assert!(tx.is_loaded());

        tx.tick(IDLE);
        assert!(!tx.is_loaded());
        assert!(tx.is_ready_for_load());
        assert_eq!(tx.bit_count(), 0);
        assert!(tx.output());
    }

    #[test]
    fn load_masks_to_width() {
        let mut tx = TxShifter::new(WordWidth::Bits8);
        tx.try_load(0xFFFF_FF01);
        assert!(!tx.output());
        tx.tick(SELECTED);
        let bits = clock_out(&mut tx, 9);
        assert_eq!(&bits[1..], bits_of(0x01, WordWidth::Bits8).as_slice());
    }

    #[test]
    fn reset_restores_power_on_state() {
        let mut tx = TxShifter::new(WordWidth::Bits32);
        tx.try_load(0x1234_5678);
        tx.tick(SELECTED);
        tx.reset();
        assert_eq!(tx, TxShifter::new(WordWidth::Bits32));
    }
}
