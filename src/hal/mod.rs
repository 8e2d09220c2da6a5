//! Hardware Abstraction Layer
//!
//! Glue between the engine and real hardware.
//!
//! # Modules
//!
//! - [`pins`]: GPIO sampling through `embedded-hal` digital pin traits
//! - [`timing`]: tick rate versus serial clock rate precondition
//!
//! # Tick Sources
//!
//! The engine has no notion of time beyond [`tick`](crate::SpiSlave::tick).
//! Drive [`PinSampler::poll`] from a periodic timer interrupt or a tight
//! loop, and check the rate with [`timing::margin_ok`] when configuring it.

pub mod pins;
pub mod timing;

// Re-export commonly used types
pub use pins::PinSampler;
pub use timing::{margin_ok, max_sck_hz, ticks_per_half_period};
