#![cfg(feature = "chrono")]

use chrono::{TimeDelta, TimeZone, Utc};
use rowpack::ticks::{DateTime, TimeSpan, UNIX_EPOCH_TICKS};
use rowpack::{decode, encode};

#[test]
fn test_unix_epoch_maps_to_the_epoch_offset() {
    let epoch = chrono::DateTime::from_timestamp(0, 0).unwrap();
    let ticks = DateTime::from_chrono(epoch).unwrap();
    assert_eq!(ticks.ticks(), UNIX_EPOCH_TICKS);
    assert_eq!(ticks.to_chrono().unwrap(), epoch);
}

#[test]
fn test_chrono_datetime_round_trips_through_the_wire() {
    let value = Utc.with_ymd_and_hms(2001, 2, 3, 4, 5, 6).unwrap();
    let mut reader = encode(&value).unwrap();
    assert_eq!(decode::<chrono::DateTime<Utc>>(&mut reader).unwrap(), value);
}

#[test]
fn test_tick_zero_is_year_one() {
    let year_one = DateTime::ZERO.to_chrono().unwrap();
    assert_eq!(year_one, Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0).unwrap());
    // And it still hits the one-byte sentinel on the wire.
    assert_eq!(encode(&year_one).unwrap().len(), 1);
}

#[test]
fn test_subsecond_precision_is_kept_to_100ns() {
    let value = chrono::DateTime::from_timestamp(10, 123_456_789).unwrap();
    let ticks = DateTime::from_chrono(value).unwrap();
    let back = ticks.to_chrono().unwrap();
    // Nanoseconds below one tick are truncated.
    assert_eq!(back.timestamp_subsec_nanos(), 123_456_700);
}

#[test]
fn test_timedelta_round_trips_through_the_wire() {
    for delta in [
        TimeDelta::zero(),
        TimeDelta::seconds(90),
        TimeDelta::milliseconds(-2500),
        TimeDelta::new(86_400, 500).unwrap(),
    ] {
        let mut reader = encode(&delta).unwrap();
        assert_eq!(decode::<TimeDelta>(&mut reader).unwrap(), delta);
    }
}

#[test]
fn test_timespan_conversion_matches_tick_math() {
    let span = TimeSpan::from_seconds(2);
    assert_eq!(span.to_chrono().unwrap(), TimeDelta::seconds(2));
    assert_eq!(TimeSpan::from_chrono(TimeDelta::seconds(2)).unwrap(), span);
}
