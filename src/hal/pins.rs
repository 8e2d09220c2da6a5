//! GPIO bridge for the serial lines
//!
//! [`PinSampler`] reads chip-select, serial clock and data-in from any
//! `embedded_hal::digital::InputPin`, ticks an engine once per sample and
//! drives the data-out line through an `OutputPin`.
//!
//! One [`poll`](PinSampler::poll) is one tick. The caller is responsible for
//! calling it often enough (see [`super::timing`]).

use embedded_hal::digital::{InputPin, OutputPin, PinState};

use crate::driver::error::{IoError, IoResult, Result};
use crate::driver::slave::LineEngine;
use crate::line::LineState;

/// Samples three input pins and drives one output pin per tick
///
/// # Type Parameters
/// * `CS` - Chip-select input, active low
/// * `SCK` - Serial clock input
/// * `MOSI` - Serial data input
/// * `MISO` - Serial data output
///
/// # Example
///
/// ```ignore
/// let mut sampler = PinSampler::new(cs, sck, mosi, miso);
/// let mut slave = SpiSlave::default();
///
/// loop {
///     sampler.poll(&mut slave)?;
///     if let Some(word) = slave.try_receive() { /* ... */ }
/// }
/// ```
#[derive(Debug)]
pub struct PinSampler<CS, SCK, MOSI, MISO> {
    cs: CS,
    sck: SCK,
    mosi: MOSI,
    miso: MISO,
    /// Level last written to MISO; writes happen only on change
    driven: Option<bool>,
}

impl<CS, SCK, MOSI, MISO> PinSampler<CS, SCK, MOSI, MISO>
where
    CS: InputPin,
    SCK: InputPin,
    MOSI: InputPin,
    MISO: OutputPin,
{
    /// Take ownership of the four pins
    pub fn new(cs: CS, sck: SCK, mosi: MOSI, miso: MISO) -> Self {
        Self {
            cs,
            sck,
            mosi,
            miso,
            driven: None,
        }
    }

    /// Read the three input lines once
    ///
    /// # Errors
    ///
    /// [`IoError::PinRead`] if any input pin fails.
    pub fn sample(&mut self) -> IoResult<LineState> {
        let cs_n = self.cs.is_high().map_err(|_| IoError::PinRead)?;
        let sck = self.sck.is_high().map_err(|_| IoError::PinRead)?;
        let mosi = self.mosi.is_high().map_err(|_| IoError::PinRead)?;
        Ok(LineState::new(cs_n, sck, mosi))
    }

    /// Drive the output line, skipping the write if the level is unchanged
    ///
    /// # Errors
    ///
    /// [`IoError::PinWrite`] if the output pin fails.
    pub fn drive(&mut self, level: bool) -> IoResult<()> {
        if self.driven == Some(level) {
            return Ok(());
        }
        self.miso
            .set_state(PinState::from(level))
            .map_err(|_| IoError::PinWrite)?;
        self.driven = Some(level);
        Ok(())
    }

    /// Sample, tick `engine` once and drive its output
    ///
    /// Returns the raw line state fed to the engine. On a read error the
    /// engine is not ticked.
    ///
    /// # Errors
    ///
    /// [`IoError::PinRead`] or [`IoError::PinWrite`], wrapped in
    /// [`Error::Io`](crate::Error::Io).
    pub fn poll<E: LineEngine>(&mut self, engine: &mut E) -> Result<LineState> {
        let line = self.sample()?;
        engine.tick(line);
        self.drive(engine.miso())?;
        Ok(line)
    }

    /// Forget the last driven level so the next poll writes unconditionally
    pub fn resync(&mut self) {
        self.driven = None;
    }

    /// Give the pins back
    pub fn release(self) -> (CS, SCK, MOSI, MISO) {
        (self.cs, self.sck, self.mosi, self.miso)
    }
}
