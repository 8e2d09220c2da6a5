//! Centralized Constants
//!
//! This module provides a single source of truth for the magic numbers and
//! configuration defaults used throughout the engine.
//!
//! # Organization
//!
//! Constants are grouped by category:
//! - **Word widths**: supported word sizes
//! - **Synchronizer**: pipeline depth and latency
//! - **Timing**: tick-to-serial-clock margin
//! - **FIFO defaults**: default capacities and threshold marks

// =============================================================================
// Word Widths
// =============================================================================

/// Word widths accepted at construction, in bits
pub const SUPPORTED_WIDTHS: [u8; 3] = [8, 16, 32];

/// Default word width in bits
pub const DEFAULT_WIDTH_BITS: u8 = 8;

// =============================================================================
// Synchronizer
// =============================================================================

/// Number of register stages each monitored signal passes through
///
/// Two stages resolve metastability, the third exists only for edge detection.
pub const SYNC_STAGES: usize = 3;

/// Ticks from a raw input change to the matching synchronized output
pub const SYNC_LATENCY_TICKS: usize = 2;

// =============================================================================
// Timing
// =============================================================================

/// Minimum ticks per external half-period, scaled by 4 (6.75 ticks)
///
/// Below this margin edge detection and sampling are no longer reliable.
pub const MIN_TICKS_PER_HALF_PERIOD_X4: u64 = 27;

// =============================================================================
// FIFO Defaults
// =============================================================================

/// Default FIFO depth in words
pub const DEFAULT_FIFO_DEPTH: usize = 16;

/// Default near-full mark: free slots remaining at or below which the FIFO
/// reports near-full
pub const DEFAULT_NEAR_FULL: usize = 2;

/// Default near-empty mark: filled slots at or below which the FIFO reports
/// near-empty
pub const DEFAULT_NEAR_EMPTY: usize = 2;
