//! ISR-safe engine wrapper using critical sections.

use super::primitives::CriticalSectionCell;
use crate::driver::config::{EngineConfig, TransactionState, Word};
use crate::driver::slave::{EngineStats, SpiSlave};
use crate::line::LineState;

/// ISR-safe [`SpiSlave`] wrapper using critical sections.
///
/// All access goes through `critical_section::with()`, disabling interrupts
/// for the duration of the closure. Keep closures short: the tick source is
/// blocked while one runs, and a late tick eats into the timing margin.
///
/// # Example
///
/// ```ignore
/// static SLAVE: SharedSlave = SharedSlave::new(EngineConfig::new());
///
/// SLAVE.with(|slave| {
///     slave.try_load(0x42);
/// });
/// ```
pub struct SharedSlave {
    inner: CriticalSectionCell<SpiSlave>,
}

impl SharedSlave {
    /// Create a new shared engine (const, suitable for static initialization).
    pub const fn new(config: EngineConfig) -> Self {
        Self {
            inner: CriticalSectionCell::new(SpiSlave::new(config)),
        }
    }

    /// Execute a closure with exclusive access to the engine.
    #[inline]
    pub fn with<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut SpiSlave) -> R,
    {
        self.inner.with(f)
    }

    /// Try to execute a closure, returning `None` if already borrowed.
    #[inline]
    pub fn try_with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut SpiSlave) -> R,
    {
        self.inner.try_with(f)
    }

    /// Advance the engine by one tick
    #[inline]
    pub fn tick(&self, line: LineState) {
        self.inner.with(|slave| slave.tick(line));
    }

    /// Serial-data-out level after the last tick
    pub fn miso(&self) -> bool {
        self.inner.with_ref(SpiSlave::miso)
    }

    /// Take the received word, if one is held
    pub fn try_receive(&self) -> Option<Word> {
        self.inner.with(SpiSlave::try_receive)
    }

    /// Stage the next transmit word; fails mid-transaction
    pub fn try_load(&self, word: Word) -> bool {
        self.inner.with(|slave| slave.try_load(word))
    }

    /// Current transaction state
    pub fn state(&self) -> TransactionState {
        self.inner.with_ref(SpiSlave::state)
    }

    /// Copy of the engine counters
    pub fn stats(&self) -> EngineStats {
        self.inner.with_ref(|slave| *slave.stats())
    }

    /// Return the engine to its power-on state
    pub fn reset(&self) {
        self.inner.with(SpiSlave::reset);
    }
}

impl Default for SharedSlave {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
