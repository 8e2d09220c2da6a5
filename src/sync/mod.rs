//! Synchronization and Concurrency Support
//!
//! Interrupt-safe sharing of an engine between a tick source (typically a
//! timer interrupt) and application code.
//!
//! - [`CriticalSectionCell`]: `RefCell` behind a `critical_section::Mutex`
//! - [`SharedSlave`]: a [`SpiSlave`](crate::SpiSlave) in such a cell
//!
//! The FIFO boundary needs none of this: its producer and consumer ends are
//! lock-free (see [`crate::fifo`]).
//!
//! # Feature Flags
//!
//! - `critical-section`: Enables this module
//!
//! # Example
//!
//! ```ignore
//! use spi_slave_core::{EngineConfig, LineState};
//! use spi_slave_core::sync::SharedSlave;
//!
//! static SLAVE: SharedSlave = SharedSlave::new(EngineConfig::new());
//!
//! #[interrupt]
//! fn TIMER0() {
//!     SLAVE.tick(sample_lines());
//! }
//!
//! fn main() {
//!     SLAVE.try_load(0x42);
//!     loop {
//!         if let Some(word) = SLAVE.try_receive() { /* ... */ }
//!     }
//! }
//! ```

mod primitives;

pub use primitives::CriticalSectionCell;

mod shared;

pub use shared::SharedSlave;
