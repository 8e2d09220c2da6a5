//! Bit shifters
//!
//! Both shifters consume one [`SyncOutput`](crate::line::SyncOutput) per
//! tick and own their shift register and bit counter exclusively.
//!
//! - [`RxShifter`]: samples the data line on synchronized rising edges and
//!   assembles words, most-significant bit first
//! - [`TxShifter`]: presents a preloaded word on the output line and shifts
//!   it on synchronized falling edges

pub mod rx;
pub mod tx;

pub use rx::{RxEvent, RxShifter};
pub use tx::{TxEvent, TxShifter};
