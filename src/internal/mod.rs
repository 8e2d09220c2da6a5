//! Internal Implementation Details
//!
//! This module contains implementation details that are not part of the public API.
//! Types in this module may change without notice between minor versions.
//!
//! # Contents
//!
//! - [`constants`]: Configuration defaults and timing margins
//!
//! # Stability
//!
//! **WARNING:** This module is `pub(crate)` only. Selected constants are
//! re-exported through [`crate::constants`].

pub(crate) mod constants;
