//! SPI Slave Protocol Engine
//!
//! A `no_std`, `no_alloc` Rust implementation of a cycle-accurate SPI slave.
//!
//! This crate models a clock-synchronous slave the way a hardware block
//! behaves: the external master's lines are sampled once per local tick,
//! moved into the local time base through a register synchronizer, and
//! converted to and from fixed-width words. Words cross into application
//! code through lock-free single-producer/single-consumer FIFOs.
//!
//! # Architecture
//!
//! The engine is organized into four layers:
//!
//! 1. **Line Layer** ([`line`]): raw line snapshots and the synchronizer
//! 2. **Shifter Layer** ([`shifter`]): receive and transmit shift registers
//! 3. **Engine Layer** ([`driver`]): [`SpiSlave`] and [`FifoSlave`]
//! 4. **HAL Layer** ([`hal`]): GPIO sampling and tick-rate checks
//!
//! The [`fifo`] module is independent of the rest and works for any `Copy`
//! element type.
//!
//! ## Protocol
//!
//! - Chip-select is active low and frames one word or a burst
//! - Words travel most-significant bit first
//! - The slave samples MOSI on the rising clock edge and shifts MISO on the
//!   falling edge (CPOL=1, CPHA=1 master timing)
//! - The staged transmit word's MSB is on MISO before the first clock edge
//! - With nothing staged, the slave sends all ones
//!
//! ## Data Loss
//!
//! The external master cannot be stalled. A receive word that completes
//! while the consumer is full is dropped, and a transaction that starts
//! with nothing staged sends the idle pattern. Neither is an error; both
//! are counted in [`EngineStats`].
//!
//! ## Timing
//!
//! The local tick must run at least 6.75 times per half-period of the
//! serial clock. This cannot be detected at runtime; see [`hal::timing`].
//!
//! # Features
//!
//! - `defmt`: Enable defmt formatting and engine event logging
//! - `critical-section`: Enable ISR-safe `SharedSlave` wrapper
//!
//! # Example
//!
//! ```ignore
//! use spi_slave_core::{FifoConfig, FifoSlave, SpiSlave, WordFifoDefault};
//! use spi_slave_core::hal::PinSampler;
//!
//! let mut rx_fifo = WordFifoDefault::new(FifoConfig::new())?;
//! let mut tx_fifo = WordFifoDefault::new(FifoConfig::new())?;
//! let (rx_in, mut rx_out) = rx_fifo.split();
//! let (mut tx_in, tx_out) = tx_fifo.split();
//!
//! let mut slave = FifoSlave::new(SpiSlave::default(), rx_in, tx_out);
//! let mut pins = PinSampler::new(cs, sck, mosi, miso);
//!
//! loop {
//!     pins.poll(&mut slave)?;
//!     while let Some(word) = rx_out.try_pop() {
//!         tx_in.try_push(word);
//!     }
//! }
//! ```

#![no_std]
#![deny(missing_docs)]
#![allow(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]
// Clippy lint levels live here; the same set is mirrored in Cargo.toml.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_lossless,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements
)]

// =============================================================================
// Modules
// =============================================================================

pub mod driver;
pub mod fifo;
pub mod hal;
pub mod line;
pub mod shifter;

// Internal implementation details (pub(crate) only)
mod internal;

#[cfg(feature = "critical-section")]
#[cfg_attr(docsrs, doc(cfg(feature = "critical-section")))]
pub mod sync;

// Test utilities (only available during testing)
#[cfg(test)]
pub mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use driver::config::{EngineConfig, FifoConfig, TransactionState, Word, WordWidth};
pub use driver::error::{ConfigError, ConfigResult, Error, IoError, IoResult, Result};
pub use driver::fifo_slave::FifoSlave;
pub use driver::slave::{EngineStats, LineEngine, SpiSlave};
pub use fifo::{Consumer, Fifo, FifoStatus, Producer, WordFifoDefault, WordFifoLarge, WordFifoSmall};
pub use line::{LineState, SyncOutput};

// Re-export sync types when critical-section is enabled
#[cfg(feature = "critical-section")]
pub use sync::SharedSlave;

/// Shared engine constants.
///
/// These are grouped into a dedicated module to keep the top-level facade
/// focused on engine types.
pub mod constants {
    pub use crate::internal::constants::{
        // FIFO defaults
        DEFAULT_FIFO_DEPTH,
        DEFAULT_NEAR_EMPTY,
        DEFAULT_NEAR_FULL,
        // Word widths
        DEFAULT_WIDTH_BITS,
        // Timing
        MIN_TICKS_PER_HALF_PERIOD_X4,
        SUPPORTED_WIDTHS,
        // Synchronizer
        SYNC_LATENCY_TICKS,
        SYNC_STAGES,
    };
}
