//! SPI slave engine with receive and transmit queues.
//!
//! [`FifoSlave`] owns a [`SpiSlave`] together with the engine-side ends of
//! two SPSC FIFOs: the [`Producer`] of the receive queue and the
//! [`Consumer`] of the transmit queue. The application keeps the opposite
//! ends and may run in another context.
//!
//! ```text
//!   lines ─▶ SpiSlave ─▶ rx Producer ══▶ rx Consumer ─▶ application
//!   lines ◀─ SpiSlave ◀─ tx Consumer ◀══ tx Producer ◀─ application
//! ```
//!
//! The receive FIFO being full is the backpressure signal: a word that
//! completes while it is full is dropped. While idle, one word per idle
//! window moves from the transmit FIFO into the transmit shifter.

use super::config::{TransactionState, Word, WordWidth};
use super::slave::{EngineStats, LineEngine, SpiSlave};
use crate::fifo::{Consumer, FifoStatus, Producer};
use crate::line::LineState;
use crate::shifter::RxEvent;

/// SPI slave engine feeding and fed by SPSC FIFOs
///
/// # Type Parameters
/// * `RX` - Receive FIFO capacity
/// * `TX` - Transmit FIFO capacity
///
/// # Example
/// ```ignore
/// let mut rx_fifo: Fifo<Word, 16> = Fifo::new(FifoConfig::new())?;
/// let mut tx_fifo: Fifo<Word, 16> = Fifo::new(FifoConfig::new())?;
/// let (rx_in, mut rx_out) = rx_fifo.split();
/// let (mut tx_in, tx_out) = tx_fifo.split();
///
/// let mut slave = FifoSlave::new(SpiSlave::default(), rx_in, tx_out);
/// tx_in.try_push(0x42);
/// slave.tick(sample_lines());
/// while let Some(word) = rx_out.try_pop() { /* ... */ }
/// ```
pub struct FifoSlave<'a, const RX: usize, const TX: usize> {
    engine: SpiSlave,
    rx: Producer<'a, Word, RX>,
    tx: Consumer<'a, Word, TX>,
}

impl<'a, const RX: usize, const TX: usize> FifoSlave<'a, RX, TX> {
    /// Attach an engine to the receive producer and transmit consumer
    pub fn new(engine: SpiSlave, rx: Producer<'a, Word, RX>, tx: Consumer<'a, Word, TX>) -> Self {
        let mut slave = Self { engine, rx, tx };
        slave.stage_next();
        slave
    }

    // =========================================================================
    // State Accessors
    // =========================================================================

    /// Configured word width
    #[inline(always)]
    pub fn width(&self) -> WordWidth {
        self.engine.width()
    }

    /// Current transaction state
    #[inline(always)]
    pub fn state(&self) -> TransactionState {
        self.engine.state()
    }

    /// Serial-data-out level
    #[inline(always)]
    pub fn miso(&self) -> bool {
        self.engine.miso()
    }

    /// Engine counters
    #[inline(always)]
    pub fn stats(&self) -> &EngineStats {
        self.engine.stats()
    }

    /// Underlying engine
    #[inline(always)]
    pub fn engine(&self) -> &SpiSlave {
        &self.engine
    }

    /// Receive FIFO status as seen by the engine
    pub fn rx_status(&self) -> FifoStatus {
        self.rx.status()
    }

    /// Transmit FIFO status as seen by the engine
    pub fn tx_status(&self) -> FifoStatus {
        self.tx.status()
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Advance one tick, moving words between the engine and the FIFOs
    pub fn tick(&mut self, line: LineState) {
        let ready = !self.rx.is_full();
        if let Some(RxEvent::Word(word)) = self.engine.step(line, ready) {
            // Only this context pushes, so a slot seen free above is still free
            let _pushed = self.rx.try_push(word);
            debug_assert!(_pushed);
        }

        self.stage_next();
    }

    /// Return the engine to its power-on state
    ///
    /// Words already queued in either FIFO are kept. A transmit word that
    /// was staged in the shifter is discarded.
    pub fn reset(&mut self) {
        self.engine.reset();
        self.stage_next();
    }

    /// Release the engine and the FIFO ends
    pub fn into_parts(self) -> (SpiSlave, Producer<'a, Word, RX>, Consumer<'a, Word, TX>) {
        (self.engine, self.rx, self.tx)
    }

    fn stage_next(&mut self) {
        if self.engine.state() != TransactionState::Idle || self.engine.is_tx_loaded() {
            return;
        }
        if let Some(word) = self.tx.try_pop() {
            let _loaded = self.engine.try_load(word);
            debug_assert!(_loaded);
        }
    }
}

impl<const RX: usize, const TX: usize> LineEngine for FifoSlave<'_, RX, TX> {
    fn tick(&mut self, line: LineState) {
        FifoSlave::tick(self, line);
    }

    fn miso(&self) -> bool {
        FifoSlave::miso(self)
    }

    fn state(&self) -> TransactionState {
        FifoSlave::state(self)
    }
}

impl<const RX: usize, const TX: usize> core::fmt::Debug for FifoSlave<'_, RX, TX> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FifoSlave")
            .field("engine", &self.engine)
            .field("rx", &self.rx.status())
            .field("tx", &self.tx.status())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
