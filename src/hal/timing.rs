//! Tick-rate precondition
//!
//! The synchronizer needs the local tick to run at least 6.75 times per
//! half-period of the external serial clock. Below that, edges can be missed
//! or data sampled in the wrong bit window. Nothing at runtime can detect
//! the violation; received words simply come out shifted or corrupted. Check
//! the rates here when choosing a tick source.
//!
//! All arithmetic is done in `u64` on rates scaled by 4, so no intermediate
//! overflows for any pair of `u32` rates.

pub use crate::internal::constants::MIN_TICKS_PER_HALF_PERIOD_X4;

/// Whole ticks per half-period of the serial clock, rounded down
///
/// Returns `u32::MAX` for a stopped serial clock.
#[must_use]
pub const fn ticks_per_half_period(tick_hz: u32, sck_hz: u32) -> u32 {
    if sck_hz == 0 {
        return u32::MAX;
    }
    (tick_hz as u64 / (2 * sck_hz as u64)) as u32
}

/// True when `tick_hz` leaves enough margin for a serial clock of `sck_hz`
#[must_use]
pub const fn margin_ok(tick_hz: u32, sck_hz: u32) -> bool {
    // tick_hz / (2 * sck_hz) >= MIN / 4
    4 * tick_hz as u64 >= 2 * MIN_TICKS_PER_HALF_PERIOD_X4 * sck_hz as u64
}

/// Highest serial clock rate a tick rate supports
#[must_use]
pub const fn max_sck_hz(tick_hz: u32) -> u32 {
    (4 * tick_hz as u64 / (2 * MIN_TICKS_PER_HALF_PERIOD_X4)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::config::{Word, WordWidth};
    use crate::driver::slave::SpiSlave;
    use crate::testing::SpiMaster;

    #[test]
    fn margin_boundary() {
        // 27 ticks per 4 half-periods is exactly the minimum
        assert!(margin_ok(27, 2));
        assert!(!margin_ok(26, 2));
        assert!(margin_ok(100_000_000, 7_000_000));
        assert!(!margin_ok(100_000_000, 8_000_000));
    }

    #[test]
    fn stopped_clock_always_fits() {
        assert!(margin_ok(1, 0));
        assert_eq!(ticks_per_half_period(1_000, 0), u32::MAX);
    }

    #[test]
    fn half_period_rounding() {
        assert_eq!(ticks_per_half_period(16_000_000, 1_000_000), 8);
        assert_eq!(ticks_per_half_period(15_000_000, 1_000_000), 7);
        assert_eq!(ticks_per_half_period(u32::MAX, 1), u32::MAX / 2);
    }

    #[test]
    fn max_sck_is_consistent_with_margin() {
        for tick_hz in [27u32, 1_000, 48_000_000, 240_000_000, u32::MAX] {
            let max = max_sck_hz(tick_hz);
            assert!(margin_ok(tick_hz, max));
            assert!(!margin_ok(tick_hz, max + 1));
        }
    }

    #[test]
    fn engine_works_at_minimum_whole_half_period() {
        // 7 ticks is the smallest whole number at or above 6.75
        assert!(margin_ok(14, 1));
        let master = SpiMaster::new(WordWidth::Bits8).with_half_period(7);
        let mut slave = SpiSlave::default();
        let sent: [Word; 3] = [0x5A, 0x01, 0xFE];
        for word in sent {
            slave.try_load(!word & 0xFF);
            assert_eq!(master.transfer(&mut slave, &[word]), [!word & 0xFF]);
            assert_eq!(slave.try_receive(), Some(word));
        }
    }
}
