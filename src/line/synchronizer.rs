//! Clock-domain synchronizer for the serial lines.
//!
//! Each monitored line runs through a chain of registers clocked by the
//! local tick. Two stages resolve metastability; the serial clock carries a
//! third stage so that edges are found by comparing stage 2 against stage 3.
//! Data and chip-select are read from stage 2, so they line up in time with
//! the edge pulses.
//!
//! ```text
//!   raw ──▶ [stage1] ──▶ [stage2] ──▶ [stage3]      (sck only)
//!                           │            │
//!                           └── edge ◀───┘
//! ```

use super::LineState;

/// Register chain for one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Stages<const N: usize> {
    regs: [bool; N],
}

impl<const N: usize> Stages<N> {
    const fn new(level: bool) -> Self {
        Self { regs: [level; N] }
    }

    /// Clock the chain once, `raw` enters stage 1
    #[inline(always)]
    fn clock(&mut self, raw: bool) {
        self.regs.copy_within(0..N - 1, 1);
        self.regs[0] = raw;
    }

    /// Register value at a 1-based stage number
    #[inline(always)]
    const fn stage(&self, n: usize) -> bool {
        self.regs[n - 1]
    }
}

/// Synchronized view of the serial lines for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SyncOutput {
    /// Chip-select asserted (inverted stage 2 of `cs_n`)
    pub chip_select_active: bool,
    /// Serial clock went low to high; high for exactly one tick
    pub rising_edge: bool,
    /// Serial clock went high to low; high for exactly one tick
    pub falling_edge: bool,
    /// Data line, aligned with the edge pulses
    pub data: bool,
}

/// Three-stage synchronizer for `cs_n`, `sck` and `mosi`
///
/// A raw change sampled by tick `t` appears in the output of tick `t + 1`.
/// The local tick must run at least 6.75 times per external half-period
/// (see [`crate::hal::timing`]); this cannot be checked at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Synchronizer {
    cs_n: Stages<2>,
    sck: Stages<3>,
    mosi: Stages<2>,
}

impl Synchronizer {
    /// Create a synchronizer with every stage at the idle bus level
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cs_n: Stages::new(LineState::IDLE.cs_n),
            sck: Stages::new(LineState::IDLE.sck),
            mosi: Stages::new(LineState::IDLE.mosi),
        }
    }

    /// Return every stage to the idle bus level
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Clock in one raw sample and return the synchronized outputs
    pub fn tick(&mut self, raw: LineState) -> SyncOutput {
        self.cs_n.clock(raw.cs_n);
        self.sck.clock(raw.sck);
        self.mosi.clock(raw.mosi);
        self.output()
    }

    /// Outputs for the current register contents
    #[must_use]
    pub const fn output(&self) -> SyncOutput {
        let sck_now = self.sck.stage(2);
        let sck_prev = self.sck.stage(3);
        SyncOutput {
            chip_select_active: !self.cs_n.stage(2),
            rising_edge: sck_now && !sck_prev,
            falling_edge: !sck_now && sck_prev,
            data: self.mosi.stage(2),
        }
    }
}

impl Default for Synchronizer {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
