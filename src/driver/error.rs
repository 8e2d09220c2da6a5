//! Error types for the SPI slave engine
//!
//! Errors are organized by domain:
//! - [`ConfigError`]: Construction-time failures (fatal, before any tick)
//! - [`IoError`]: GPIO failures in the pin bridge
//!
//! Runtime data loss inside the engine (a receive word dropped under
//! backpressure, a transmit underrun sending the idle pattern, a rejected
//! load) is not an error. Those paths report through return values and
//! [`EngineStats`](crate::EngineStats) counters.

// =============================================================================
// Configuration Errors
// =============================================================================

/// Configuration errors
///
/// Returned by constructors. No engine or FIFO exists after one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Word width is not 8, 16 or 32 bits
    UnsupportedWidth,
    /// FIFO capacity is zero or not a power of two
    CapacityNotPowerOfTwo,
    /// Near-full or near-empty mark exceeds the FIFO capacity
    ThresholdOutOfRange,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConfigError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigError::UnsupportedWidth => "unsupported word width",
            ConfigError::CapacityNotPowerOfTwo => "FIFO capacity not a power of two",
            ConfigError::ThresholdOutOfRange => "FIFO threshold exceeds capacity",
        }
    }
}

// =============================================================================
// I/O Errors
// =============================================================================

/// Pin bridge errors
///
/// The underlying `embedded-hal` error is discarded; only the direction of
/// the failed access is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IoError {
    /// Reading an input line (CS, SCK or MOSI) failed
    PinRead,
    /// Driving the MISO line failed
    PinWrite,
}

impl core::fmt::Display for IoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl IoError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            IoError::PinRead => "input pin read failed",
            IoError::PinWrite => "output pin write failed",
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
///
/// ```ignore
/// match result {
///     Err(Error::Config(ConfigError::UnsupportedWidth)) => { /* ... */ }
///     Err(Error::Io(IoError::PinRead)) => { /* ... */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration error
    Config(ConfigError),
    /// I/O error
    Io(IoError),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Config(e) => write!(f, "config: {}", e.as_str()),
            Error::Io(e) => write!(f, "io: {}", e.as_str()),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<IoError> for Error {
    fn from(e: IoError) -> Self {
        Error::Io(e)
    }
}

/// Result type alias for engine operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

/// Result type alias for pin I/O operations
pub type IoResult<T> = core::result::Result<T, IoError>;

// =============================================================================
// Unit Tests
// =============================================================================
