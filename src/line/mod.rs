//! Serial line sampling
//!
//! The three boundary inputs of the slave (chip-select, serial clock and
//! serial data-in) are owned by an external master and change with no
//! relation to the local tick. This module holds the raw snapshot type and
//! the [`Synchronizer`] that moves those lines into the local time base.
//!
//! - [`LineState`]: raw `(cs_n, sck, mosi)` sample taken once per tick
//! - [`Synchronizer`]: staged registers, edge pulses, aligned data
//! - [`SyncOutput`]: what the shifters consume each tick

mod synchronizer;

pub use synchronizer::{SyncOutput, Synchronizer};

/// Raw snapshot of the slave's input lines
///
/// `cs_n` is active-low: `false` means the master has selected this slave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineState {
    /// Chip-select, active low
    pub cs_n: bool,
    /// Serial clock
    pub sck: bool,
    /// Serial data from the master
    pub mosi: bool,
}

impl LineState {
    /// Bus at rest: slave deselected, clock and data high
    pub const IDLE: Self = Self {
        cs_n: true,
        sck: true,
        mosi: true,
    };

    /// Build a snapshot from the three line levels
    #[must_use]
    pub const fn new(cs_n: bool, sck: bool, mosi: bool) -> Self {
        Self { cs_n, sck, mosi }
    }

    /// Copy with the chip-select line changed
    #[must_use]
    pub const fn with_cs_n(mut self, cs_n: bool) -> Self {
        self.cs_n = cs_n;
        self
    }

    /// Copy with the serial clock changed
    #[must_use]
    pub const fn with_sck(mut self, sck: bool) -> Self {
        self.sck = sck;
        self
    }

    /// Copy with the data line changed
    #[must_use]
    pub const fn with_mosi(mut self, mosi: bool) -> Self {
        self.mosi = mosi;
        self
    }

    /// True when the raw chip-select selects this slave
    #[inline(always)]
    #[must_use]
    pub const fn is_selected(&self) -> bool {
        !self.cs_n
    }
}

impl Default for LineState {
    fn default() -> Self {
        Self::IDLE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_deselects_slave() {
        assert!(!LineState::IDLE.is_selected());
        assert_eq!(LineState::default(), LineState::IDLE);
    }

    #[test]
    fn builders_touch_one_line() {
        let line = LineState::IDLE.with_cs_n(false);
        assert!(line.is_selected());
        assert!(line.sck);
        assert!(line.mosi);

        let line = line.with_sck(false).with_mosi(false);
        assert_eq!(line, LineState::new(false, false, false));
    }
}
