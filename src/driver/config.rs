//! Configuration types for the SPI slave engine
//!
//! Everything here is fixed at construction. There is no runtime
//! reconfiguration: to change the width or FIFO marks, build a new engine.

use super::error::{ConfigError, ConfigResult};
use crate::internal::constants::{DEFAULT_NEAR_EMPTY, DEFAULT_NEAR_FULL};

/// A protocol word, carried in the low `width` bits
///
/// Bits above the configured width are always zero in values produced by
/// the engine, and are masked off in values handed to it.
pub type Word = u32;

/// Word width of an engine instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum WordWidth {
    /// 8-bit words
    #[default]
    Bits8 = 8,
    /// 16-bit words
    Bits16 = 16,
    /// 32-bit words
    Bits32 = 32,
}

impl WordWidth {
    /// Validate a width given in bits
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnsupportedWidth`] for anything other than 8, 16 or 32.
    pub const fn from_bits(bits: u8) -> ConfigResult<Self> {
        match bits {
            8 => Ok(WordWidth::Bits8),
            16 => Ok(WordWidth::Bits16),
            32 => Ok(WordWidth::Bits32),
            _ => Err(ConfigError::UnsupportedWidth),
        }
    }

    /// Number of bits per word
    #[inline(always)]
    #[must_use]
    pub const fn bits(self) -> u32 {
        self as u32
    }

    /// Mask selecting the valid bits of a word
    #[inline(always)]
    #[must_use]
    pub const fn mask(self) -> Word {
        match self {
            WordWidth::Bits8 => 0xFF,
            WordWidth::Bits16 => 0xFFFF,
            WordWidth::Bits32 => 0xFFFF_FFFF,
        }
    }

    /// Most-significant bit of a word
    #[inline(always)]
    #[must_use]
    pub const fn msb(self) -> Word {
        1 << (self.bits() - 1)
    }

    /// Filler word transmitted when nothing was loaded (all ones)
    #[inline(always)]
    #[must_use]
    pub const fn idle_pattern(self) -> Word {
        self.mask()
    }
}

impl TryFrom<u8> for WordWidth {
    type Error = ConfigError;

    fn try_from(bits: u8) -> ConfigResult<Self> {
        Self::from_bits(bits)
    }
}

/// Protocol engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EngineConfig {
    /// Word width
    pub width: WordWidth,
}

impl EngineConfig {
    /// Create a new configuration with defaults (8-bit words)
    #[must_use]
    pub const fn new() -> Self {
        Self {
            width: WordWidth::Bits8,
        }
    }

    /// Set the word width
    #[must_use]
    pub const fn with_width(mut self, width: WordWidth) -> Self {
        self.width = width;
        self
    }
}

/// FIFO threshold configuration
///
/// Both marks count slots remaining: `near_full` counts free slots,
/// `near_empty` counts filled slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FifoConfig {
    /// Report near-full when free slots drop to this value or below
    pub near_full: usize,
    /// Report near-empty when filled slots drop to this value or below
    pub near_empty: usize,
}

impl Default for FifoConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl FifoConfig {
    /// Create a new configuration with the default marks
    #[must_use]
    pub const fn new() -> Self {
        Self {
            near_full: DEFAULT_NEAR_FULL,
            near_empty: DEFAULT_NEAR_EMPTY,
        }
    }

    /// Set the near-full mark (free slots remaining)
    #[must_use]
    pub const fn with_near_full(mut self, slots: usize) -> Self {
        self.near_full = slots;
        self
    }

    /// Set the near-empty mark (filled slots remaining)
    #[must_use]
    pub const fn with_near_empty(mut self, slots: usize) -> Self {
        self.near_empty = slots;
        self
    }

    /// Check both marks against a FIFO capacity
    ///
    /// # Errors
    ///
    /// [`ConfigError::ThresholdOutOfRange`] if either mark exceeds `capacity`.
    pub const fn validate(&self, capacity: usize) -> ConfigResult<()> {
        if self.near_full > capacity || self.near_empty > capacity {
            return Err(ConfigError::ThresholdOutOfRange);
        }
        Ok(())
    }
}

/// Transaction state, per synchronized chip-select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransactionState {
    /// Chip-select inactive; transmit loads accepted
    #[default]
    Idle,
    /// Chip-select active; bits being exchanged
    Transacting,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_accepts_supported_values() {
        assert_eq!(WordWidth::from_bits(8), Ok(WordWidth::Bits8));
        assert_eq!(WordWidth::from_bits(16), Ok(WordWidth::Bits16));
        assert_eq!(WordWidth::from_bits(32), Ok(WordWidth::Bits32));
    }

    #[test]
    fn width_rejects_everything_else() {
        for bits in [0u8, 1, 7, 9, 12, 24, 31, 33, 64, 255] {
            assert_eq!(
                WordWidth::try_from(bits),
                Err(ConfigError::UnsupportedWidth),
                "width {bits} should be rejected"
            );
        }
    }

    #[test]
    fn width_masks_and_patterns() {
        assert_eq!(WordWidth::Bits8.mask(), 0xFF);
        assert_eq!(WordWidth::Bits16.idle_pattern(), 0xFFFF);
        assert_eq!(WordWidth::Bits32.idle_pattern(), 0xFFFF_FFFF);
        assert_eq!(WordWidth::Bits8.msb(), 0x80);
        assert_eq!(WordWidth::Bits32.msb(), 0x8000_0000);
    }

    #[test]
    fn engine_config_default_matches_new() {
        assert_eq!(EngineConfig::default(), EngineConfig::new());
        assert_eq!(EngineConfig::new().width, WordWidth::Bits8);
    }

    #[test]
    fn fifo_config_validate() {
        let config = FifoConfig::new().with_near_full(4).with_near_empty(1);
        assert_eq!(config.validate(8), Ok(()));
        assert_eq!(config.validate(4), Ok(()));
        assert_eq!(config.validate(2), Err(ConfigError::ThresholdOutOfRange));
    }

    #[test]
    fn transaction_state_default() {
        assert_eq!(TransactionState::default(), TransactionState::Idle);
    }
}
