//! Feature-gated integrations with external crates.
//!
//! With the `chrono` feature, the tick types convert to and from calendar
//! values, and `chrono::DateTime<Utc>` / `chrono::TimeDelta` encode directly
//! with the `DateTime` / `TimeSpan` wire kinds. Conversions are range-checked
//! in both directions; out-of-range values are errors, never truncation.

#[cfg(feature = "chrono")]
use bytes::{Bytes, BytesMut};
#[cfg(feature = "chrono")]
use chrono::{TimeDelta, Utc};

#[cfg(feature = "chrono")]
use crate::tag::Kind;
#[cfg(feature = "chrono")]
use crate::ticks::{DateTime, TimeSpan, TICKS_PER_SECOND, UNIX_EPOCH_TICKS};
#[cfg(feature = "chrono")]
use crate::{CodecError, Decode, Encode, Result};

// --- DateTime <-> chrono::DateTime<Utc> ---

#[cfg(feature = "chrono")]
impl DateTime {
    /// The calendar instant, or `None` when the tick count falls outside
    /// chrono's representable range.
    pub fn to_chrono(self) -> Option<chrono::DateTime<Utc>> {
        let unix_ticks = self.ticks().checked_sub(UNIX_EPOCH_TICKS)?;
        let seconds = unix_ticks.div_euclid(TICKS_PER_SECOND);
        let nanos = (unix_ticks.rem_euclid(TICKS_PER_SECOND) * 100) as u32;
        chrono::DateTime::from_timestamp(seconds, nanos)
    }

    /// The tick count for a calendar instant, or `None` when it falls
    /// outside the tick range. Sub-tick precision (nanoseconds not divisible
    /// by 100) is truncated toward zero.
    pub fn from_chrono(value: chrono::DateTime<Utc>) -> Option<Self> {
        let seconds = value.timestamp();
        let sub_ticks = i64::from(value.timestamp_subsec_nanos() / 100);
        let unix_ticks = seconds
            .checked_mul(TICKS_PER_SECOND)?
            .checked_add(sub_ticks)?;
        Some(DateTime::from_ticks(unix_ticks.checked_add(UNIX_EPOCH_TICKS)?))
    }
}

/// Encodes a `chrono::DateTime<Utc>` with the `DateTime` wire kind.
#[cfg(feature = "chrono")]
impl Encode for chrono::DateTime<Utc> {
    const KIND: Kind = Kind::DateTime;

    fn encode(&self, writer: &mut BytesMut) -> Result<()> {
        let ticks = DateTime::from_chrono(*self).ok_or_else(|| CodecError::InvalidPayload {
            kind: Kind::DateTime,
            reason: format!("{self} is outside the tick range"),
        })?;
        ticks.encode(writer)
    }
}
#[cfg(feature = "chrono")]
impl Decode for chrono::DateTime<Utc> {
    const KIND: Kind = Kind::DateTime;

    fn decode_tagged(tag: u8, reader: &mut Bytes) -> Result<Self> {
        let ticks = DateTime::decode_tagged(tag, reader)?;
        ticks.to_chrono().ok_or_else(|| CodecError::InvalidPayload {
            kind: Kind::DateTime,
            reason: format!("{} ticks is outside the calendar range", ticks.ticks()),
        })
    }
}

// --- TimeSpan <-> chrono::TimeDelta ---

#[cfg(feature = "chrono")]
impl TimeSpan {
    /// The duration as a `TimeDelta`, or `None` when it falls outside the
    /// delta's range.
    pub fn to_chrono(self) -> Option<TimeDelta> {
        let seconds = self.ticks().div_euclid(TICKS_PER_SECOND);
        let nanos = (self.ticks().rem_euclid(TICKS_PER_SECOND) * 100) as u32;
        TimeDelta::new(seconds, nanos)
    }

    /// The tick count for a `TimeDelta`. Sub-tick precision is truncated
    /// toward zero.
    pub fn from_chrono(value: TimeDelta) -> Option<Self> {
        let sub_ticks = i64::from(value.subsec_nanos()) / 100;
        let ticks = value
            .num_seconds()
            .checked_mul(TICKS_PER_SECOND)?
            .checked_add(sub_ticks)?;
        Some(TimeSpan::from_ticks(ticks))
    }
}

/// Encodes a `chrono::TimeDelta` with the `TimeSpan` wire kind.
#[cfg(feature = "chrono")]
impl Encode for TimeDelta {
    const KIND: Kind = Kind::TimeSpan;

    fn encode(&self, writer: &mut BytesMut) -> Result<()> {
        let ticks = TimeSpan::from_chrono(*self).ok_or_else(|| CodecError::InvalidPayload {
            kind: Kind::TimeSpan,
            reason: format!("{self} is outside the tick range"),
        })?;
        ticks.encode(writer)
    }
}
#[cfg(feature = "chrono")]
impl Decode for TimeDelta {
    const KIND: Kind = Kind::TimeSpan;

    fn decode_tagged(tag: u8, reader: &mut Bytes) -> Result<Self> {
        let ticks = TimeSpan::decode_tagged(tag, reader)?;
        ticks.to_chrono().ok_or_else(|| CodecError::InvalidPayload {
            kind: Kind::TimeSpan,
            reason: format!("{} ticks is outside the delta range", ticks.ticks()),
        })
    }
}
