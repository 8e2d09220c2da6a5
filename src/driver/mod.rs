//! Core engine components.
//!
//! This module contains the building blocks for configuring and operating
//! the SPI slave:
//!
//! - [`config`] - Word width, FIFO marks and transaction state
//! - [`error`] - Error types and result aliases
//! - [`slave`] - The protocol engine and its [`LineEngine`] seam
//! - [`fifo_slave`] - The engine wired to receive and transmit FIFOs
//!
//! # Example
//!
//! ```ignore
//! use spi_slave_core::driver::{EngineConfig, SpiSlave, WordWidth};
//!
//! let slave = SpiSlave::new(EngineConfig::new().with_width(WordWidth::Bits16));
//! ```

// Submodules
pub mod config;
pub mod error;
pub mod fifo_slave;
pub mod slave;

// Re-exports for convenience
pub use config::{EngineConfig, FifoConfig, TransactionState, Word, WordWidth};
pub use error::{ConfigError, ConfigResult, Error, IoError, IoResult, Result};
pub use fifo_slave::FifoSlave;
pub use slave::{EngineStats, LineEngine, SpiSlave};
