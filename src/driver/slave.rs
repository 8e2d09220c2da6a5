//! Full-duplex SPI slave protocol engine.
//!
//! This module contains the main [`SpiSlave`] structure, which composes the
//! synchronizer and both shifters into one chip-select delimited engine:
//!
//! - Per-tick advancement of the whole pipeline
//! - A one-word receive holding register with drop-on-backpressure
//! - Transmit staging, accepted only between transactions
//! - Transaction state tracking and counters
//!
//! For a variant with receive and transmit queues, see
//! [`fifo_slave`](super::fifo_slave).

use super::config::{EngineConfig, TransactionState, Word, WordWidth};
use super::error::ConfigResult;
use crate::line::{LineState, SyncOutput, Synchronizer};
use crate::shifter::{RxEvent, RxShifter, TxEvent, TxShifter};

// =============================================================================
// Line Engine Trait
// =============================================================================

/// Anything that advances one tick per raw line sample
///
/// Implemented by [`SpiSlave`] and [`FifoSlave`](super::fifo_slave::FifoSlave)
/// so that the pin bridge and the shared wrapper work with either.
pub trait LineEngine {
    /// Advance by one local tick with the raw line levels of that tick
    fn tick(&mut self, line: LineState);

    /// Current serial-data-out level
    fn miso(&self) -> bool;

    /// Current transaction state
    fn state(&self) -> TransactionState;
}

// =============================================================================
// Statistics
// =============================================================================

/// Event counters since construction or the last reset
///
/// All counters wrap on overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EngineStats {
    /// Chip-select assertions seen
    pub transactions: u32,
    /// Words delivered to the consumer
    pub rx_words: u32,
    /// Words completed while the consumer was not ready
    pub rx_dropped: u32,
    /// Transactions that started with a staged transmit word
    pub tx_words: u32,
    /// Transactions that started with nothing staged
    pub underruns: u32,
    /// Loads refused because a transaction was active
    pub load_rejections: u32,
}

impl EngineStats {
    /// Create zeroed counters
    pub const fn new() -> Self {
        Self {
            transactions: 0,
            rx_words: 0,
            rx_dropped: 0,
            tx_words: 0,
            underruns: 0,
            load_rejections: 0,
        }
    }
}

// =============================================================================
// SPI Slave Engine
// =============================================================================

/// SPI slave protocol engine
///
/// One instance per physical interface. The caller owns it and drives it
/// with [`tick`](Self::tick) once per local clock period; nothing inside
/// blocks or allocates.
///
/// # Example
/// ```ignore
/// let mut slave = SpiSlave::new(EngineConfig::new().with_width(WordWidth::Bits16));
///
/// slave.try_load(0xBEEF);
/// loop {
///     slave.tick(sample_lines());
///     drive_miso(slave.miso());
///     if let Some(word) = slave.try_receive() {
///         handle(word);
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SpiSlave {
    config: EngineConfig,
    sync: Synchronizer,
    rx: RxShifter,
    tx: TxShifter,
    /// Receive holding register; empty means ready for the next word
    holding: Option<Word>,
    state: TransactionState,
    stats: EngineStats,
}

impl SpiSlave {
    /// Create an engine in the power-on state
    pub const fn new(config: EngineConfig) -> Self {
        Self {
            config,
            sync: Synchronizer::new(),
            rx: RxShifter::new(config.width),
            tx: TxShifter::new(config.width),
            holding: None,
            state: TransactionState::Idle,
            stats: EngineStats::new(),
        }
    }

    /// Create an engine from a width given in bits
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnsupportedWidth`](super::error::ConfigError::UnsupportedWidth)
    /// for anything other than 8, 16 or 32.
    pub const fn with_width_bits(bits: u8) -> ConfigResult<Self> {
        match WordWidth::from_bits(bits) {
            Ok(width) => Ok(Self::new(EngineConfig::new().with_width(width))),
            Err(e) => Err(e),
        }
    }

    // =========================================================================
    // State Accessors
    // =========================================================================

    /// Configured word width
    #[inline(always)]
    pub const fn width(&self) -> WordWidth {
        self.config.width
    }

    /// Construction-time configuration
    #[inline(always)]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current transaction state
    #[inline(always)]
    pub const fn state(&self) -> TransactionState {
        self.state
    }

    /// Serial-data-out level, a pure function of the transmit register
    #[inline(always)]
    pub const fn miso(&self) -> bool {
        self.tx.output()
    }

    /// Counters since construction or the last reset
    #[inline(always)]
    pub const fn stats(&self) -> &EngineStats {
        &self.stats
    }

    /// Synchronized line view from the most recent tick
    #[inline(always)]
    pub const fn sync_output(&self) -> SyncOutput {
        self.sync.output()
    }

    /// Bits received towards the current word
    #[inline(always)]
    pub const fn rx_bit_count(&self) -> u32 {
        self.rx.bit_count()
    }

    /// Partial receive word accumulated so far
    #[inline(always)]
    pub const fn rx_accumulator(&self) -> Word {
        self.rx.accumulator()
    }

    /// True while a staged transmit word has not been fully shifted out
    #[inline(always)]
    pub const fn is_tx_loaded(&self) -> bool {
        self.tx.is_loaded()
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Advance the whole engine by one tick
    ///
    /// The synchronizer runs first; both shifters then consume its output
    /// for the same tick.
    pub fn tick(&mut self, line: LineState) {
        let ready = self.holding.is_none();
        if let Some(RxEvent::Word(word)) = self.step(line, ready) {
            self.holding = Some(word);
        }
    }

    /// Take the received word, if one is held
    pub fn try_receive(&mut self) -> Option<Word> {
        self.holding.take()
    }

    /// Stage the next transmit word
    ///
    /// Succeeds only while [`TransactionState::Idle`]. A word staged twice in
    /// the same idle window replaces the earlier one. Bits above the word
    /// width are discarded.
    pub fn try_load(&mut self, word: Word) -> bool {
        if self.state == TransactionState::Transacting || !self.tx.try_load(word) {
            self.stats.load_rejections = self.stats.load_rejections.wrapping_add(1);
            #[cfg(feature = "defmt")]
            defmt::debug!("spi slave: load of {=u32:#x} rejected mid-transaction", word);
            return false;
        }
        true
    }

    /// Return to the power-on state
    ///
    /// Clears the synchronizer, both shifters, the holding register and the
    /// counters.
    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }

    /// Run one tick and update state and counters
    ///
    /// `downstream_ready` is offered to the receive shifter for a word
    /// completing on this tick; the receive event, if any, is returned for
    /// the caller to store.
    pub(crate) fn step(&mut self, line: LineState, downstream_ready: bool) -> Option<RxEvent> {
        let sync = self.sync.tick(line);
        self.track_state(sync.chip_select_active);

        let rx = self.rx.tick(sync, downstream_ready);
        let tx = self.tx.tick(sync);

        match rx {
            Some(RxEvent::Word(_word)) => {
                self.stats.rx_words = self.stats.rx_words.wrapping_add(1);
                #[cfg(feature = "defmt")]
                defmt::trace!("spi slave: received {=u32:#x}", _word);
            }
            Some(RxEvent::Dropped(_word)) => {
                self.stats.rx_dropped = self.stats.rx_dropped.wrapping_add(1);
                #[cfg(feature = "defmt")]
                defmt::debug!("spi slave: dropped {=u32:#x}, consumer not ready", _word);
            }
            None => {}
        }

        match tx {
            Some(TxEvent::Started) => {
                self.stats.tx_words = self.stats.tx_words.wrapping_add(1);
            }
            Some(TxEvent::Underrun) => {
                self.stats.underruns = self.stats.underruns.wrapping_add(1);
                #[cfg(feature = "defmt")]
                defmt::debug!("spi slave: transmit underrun, sending idle pattern");
            }
            Some(TxEvent::Drained) => {
                #[cfg(feature = "defmt")]
                defmt::trace!("spi slave: transmit word drained");
            }
            None => {}
        }

        rx
    }

    fn track_state(&mut self, chip_select_active: bool) {
        match (self.state, chip_select_active) {
            (TransactionState::Idle, true) => {
                self.state = TransactionState::Transacting;
                self.stats.transactions = self.stats.transactions.wrapping_add(1);
                #[cfg(feature = "defmt")]
                defmt::debug!("spi slave: transaction start");
            }
            (TransactionState::Transacting, false) => {
                self.state = TransactionState::Idle;
                #[cfg(feature = "defmt")]
                defmt::debug!("spi slave: transaction end");
            }
            _ => {}
        }
    }
}

impl Default for SpiSlave {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl LineEngine for SpiSlave {
    fn tick(&mut self, line: LineState) {
        SpiSlave::tick(self, line);
    }

    fn miso(&self) -> bool {
        SpiSlave::miso(self)
    }

    fn state(&self) -> TransactionState {
        SpiSlave::state(self)
    }
}

// =============================================================================
// Tests
// =============================================================================
