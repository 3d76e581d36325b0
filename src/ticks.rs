//! Tick-based time values.
//!
//! Both types wrap a signed 64-bit count of 100-nanosecond ticks.
//! [`DateTime`] counts from the fixed epoch 0001-01-01T00:00:00;
//! [`TimeSpan`] is a plain duration. Zero ticks has a dedicated one-byte
//! sentinel on the wire.

use std::fmt;

pub const TICKS_PER_MICROSECOND: i64 = 10;
pub const TICKS_PER_MILLISECOND: i64 = 10_000;
pub const TICKS_PER_SECOND: i64 = 10_000_000;

/// Ticks between the wire epoch (0001-01-01) and the Unix epoch (1970-01-01).
pub const UNIX_EPOCH_TICKS: i64 = 621_355_968_000_000_000;

/// An instant, as ticks since the wire epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct DateTime {
    ticks: i64,
}

impl DateTime {
    /// The wire epoch itself.
    pub const ZERO: DateTime = DateTime { ticks: 0 };

    pub const fn from_ticks(ticks: i64) -> Self {
        DateTime { ticks }
    }

    pub const fn ticks(self) -> i64 {
        self.ticks
    }

    /// Ticks relative to the Unix epoch. Saturates at the `i64` range.
    pub const fn unix_ticks(self) -> i64 {
        self.ticks.saturating_sub(UNIX_EPOCH_TICKS)
    }

    pub const fn from_unix_ticks(unix_ticks: i64) -> Self {
        DateTime {
            ticks: unix_ticks.saturating_add(UNIX_EPOCH_TICKS),
        }
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DateTime({} ticks)", self.ticks)
    }
}

/// A signed duration in ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimeSpan {
    ticks: i64,
}

impl TimeSpan {
    pub const ZERO: TimeSpan = TimeSpan { ticks: 0 };

    pub const fn from_ticks(ticks: i64) -> Self {
        TimeSpan { ticks }
    }

    pub const fn ticks(self) -> i64 {
        self.ticks
    }

    pub const fn from_seconds(seconds: i64) -> Self {
        TimeSpan {
            ticks: seconds.saturating_mul(TICKS_PER_SECOND),
        }
    }

    pub const fn from_milliseconds(milliseconds: i64) -> Self {
        TimeSpan {
            ticks: milliseconds.saturating_mul(TICKS_PER_MILLISECOND),
        }
    }

    /// Whole seconds, truncated toward zero.
    pub const fn whole_seconds(self) -> i64 {
        self.ticks / TICKS_PER_SECOND
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimeSpan({} ticks)", self.ticks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unix_epoch_offset() {
        let unix = DateTime::from_unix_ticks(0);
        assert_eq!(unix.ticks(), UNIX_EPOCH_TICKS);
        assert_eq!(unix.unix_ticks(), 0);
        assert_eq!(DateTime::ZERO.unix_ticks(), -UNIX_EPOCH_TICKS);
    }

    #[test]
    fn timespan_unit_helpers() {
        assert_eq!(TimeSpan::from_seconds(2).ticks(), 2 * TICKS_PER_SECOND);
        assert_eq!(TimeSpan::from_milliseconds(1500).whole_seconds(), 1);
        assert_eq!(TimeSpan::from_seconds(-3).whole_seconds(), -3);
    }
}
