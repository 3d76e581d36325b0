use bytes::{Buf, Bytes, BytesMut};
use rowpack::ticks::{DateTime, TimeSpan};
use rowpack::{decode, encode, CodecError, Decode, Encode};
use uuid::Uuid;

/// Encodes twice, checks determinism, decodes, checks the buffer is spent.
fn round_trip<T>(value: T) -> T
where
    T: Encode + Decode + std::fmt::Debug,
{
    let first = encode(&value).unwrap();
    let second = encode(&value).unwrap();
    assert_eq!(first, second, "encoding {value:?} twice must be byte-identical");
    let mut reader = first.clone();
    let decoded = decode::<T>(&mut reader).unwrap();
    assert_eq!(reader.remaining(), 0, "decoding {value:?} must consume the buffer");
    decoded
}

fn assert_round_trip<T>(value: T)
where
    T: Encode + Decode + PartialEq + Copy + std::fmt::Debug,
{
    assert_eq!(round_trip(value), value);
}

#[test]
fn test_bool_values() {
    assert_round_trip(false);
    assert_round_trip(true);
    assert_eq!(encode(&true).unwrap().len(), 1);
    assert_eq!(encode(&false).unwrap().len(), 1);
}

#[test]
fn test_signed_sentinel_boundaries() {
    for value in [i8::MIN, -1, 0, 1, i8::MAX, 42, -42] {
        assert_round_trip(value);
    }
    for value in [i16::MIN, -1, 0, 1, i16::MAX, 12345, -12345] {
        assert_round_trip(value);
    }
    for value in [i32::MIN, -1, 0, 1, i32::MAX, 123456789, -123456789] {
        assert_round_trip(value);
    }
    for value in [i64::MIN, -1, 0, 1, i64::MAX, 1234567890123, -1234567890123] {
        assert_round_trip(value);
    }
}

#[test]
fn test_signed_sentinels_are_one_byte() {
    for value in [i32::MIN, -1, 0, 1, i32::MAX] {
        assert_eq!(encode(&value).unwrap().len(), 1, "{value} must be a sentinel");
    }
    assert_eq!(encode(&2i32).unwrap().len(), 5);
}

#[test]
fn test_unsigned_sentinel_boundaries() {
    for value in [0u8, 1, u8::MAX, 200] {
        assert_round_trip(value);
    }
    for value in [0u16, 1, u16::MAX, 40000] {
        assert_round_trip(value);
    }
    for value in [0u32, 1, u32::MAX, 3_000_000_000] {
        assert_round_trip(value);
    }
    for value in [0u64, 1, u64::MAX, 10_000_000_000_000] {
        assert_round_trip(value);
    }
    for value in [0u64, 1, u64::MAX] {
        assert_eq!(encode(&value).unwrap().len(), 1, "{value} must be a sentinel");
    }
}

#[test]
fn test_float_sentinel_boundaries() {
    for value in [f32::MIN, -1.0, 0.0, 1.0, f32::MAX, 1.5, -2.25] {
        assert_round_trip(value);
    }
    for value in [f64::MIN, -1.0, 0.0, 1.0, f64::MAX, 1.5, -2.25] {
        assert_round_trip(value);
    }
    assert_round_trip(f32::INFINITY);
    assert_round_trip(f32::NEG_INFINITY);
    assert_round_trip(f64::INFINITY);
    assert_round_trip(f64::NEG_INFINITY);
    for value in [f64::MIN, -1.0, 0.0, 1.0, f64::MAX, f64::INFINITY] {
        assert_eq!(encode(&value).unwrap().len(), 1, "{value} must be a sentinel");
    }
}

#[test]
fn test_float_nan_collapses_to_sentinel() {
    let encoded = encode(&f64::NAN).unwrap();
    assert_eq!(encoded.len(), 1);
    assert!(round_trip(f64::NAN).is_nan());
    assert!(round_trip(f32::NAN).is_nan());
    // A NaN with a nonstandard payload still hits the sentinel.
    let odd_nan = f64::from_bits(0x7FF8_0000_0000_1234);
    assert!(odd_nan.is_nan());
    assert_eq!(encode(&odd_nan).unwrap(), encoded);
}

#[test]
fn test_negative_zero_collapses_to_zero() {
    assert_eq!(encode(&-0.0f64).unwrap(), encode(&0.0f64).unwrap());
    assert_eq!(round_trip(-0.0f64), 0.0);
}

#[test]
fn test_char_values() {
    for value in ['\0', 'A', 'é', 'あ', '𝄞'] {
        assert_round_trip(value);
    }
    assert_eq!(encode(&'A').unwrap().len(), 5);
}

#[test]
fn test_string_values() {
    for value in ["", "a", "hello", "héllo wörld", "日本語", "mixed 𝄞 astral"] {
        let decoded = round_trip(value.to_string());
        assert_eq!(decoded, value);
    }
    assert_eq!(encode(&String::new()).unwrap().len(), 1);
}

#[test]
fn test_utf16_entry_point_decodes_identically() {
    for value in ["", "a", "héllo", "日本語", "astral 𝄞 pair"] {
        let mut writer = BytesMut::new();
        rowpack::core::encode_str_utf16(&mut writer, value).unwrap();
        let mut reader = writer.freeze();
        assert_eq!(decode::<String>(&mut reader).unwrap(), value);
        assert_eq!(reader.remaining(), 0);
    }
}

#[test]
fn test_guid_values() {
    assert_round_trip(Uuid::nil());
    assert_round_trip(Uuid::from_u128(0x0123_4567_89AB_CDEF_0011_2233_4455_6677));
    assert_eq!(encode(&Uuid::nil()).unwrap().len(), 1);
}

#[test]
fn test_datetime_and_timespan_values() {
    for ticks in [0, 1, -1, 621_355_968_000_000_000, i64::MAX, i64::MIN] {
        assert_round_trip(DateTime::from_ticks(ticks));
        assert_round_trip(TimeSpan::from_ticks(ticks));
    }
    assert_eq!(encode(&DateTime::ZERO).unwrap().len(), 1);
    assert_eq!(encode(&TimeSpan::ZERO).unwrap().len(), 1);
}

#[test]
fn test_option_round_trips() {
    let encoded = encode(&Option::<i32>::None).unwrap();
    assert_eq!(&encoded[..], &[0x00], "None is the bare Null tag");
    let mut reader = encoded;
    assert_eq!(decode::<Option<i32>>(&mut reader).unwrap(), None);

    for value in [Some(0i32), Some(-1), Some(99)] {
        let mut reader = encode(&value).unwrap();
        assert_eq!(decode::<Option<i32>>(&mut reader).unwrap(), value);
    }
    let value = Some("text".to_string());
    let mut reader = encode(&value).unwrap();
    assert_eq!(decode::<Option<String>>(&mut reader).unwrap(), value);
}

#[test]
fn test_some_encodes_exactly_like_the_plain_value() {
    assert_eq!(encode(&Some(12345i32)).unwrap(), encode(&12345i32).unwrap());
    assert_eq!(
        encode(&Some("abc".to_string())).unwrap(),
        encode(&"abc".to_string()).unwrap()
    );
}

#[test]
fn test_cross_kind_tags_are_rejected() {
    let mut reader = encode(&7i32).unwrap();
    let err = decode::<i64>(&mut reader).unwrap_err();
    assert!(matches!(err, CodecError::UnexpectedTag { .. }), "got {err}");

    let mut reader = encode(&true).unwrap();
    assert!(matches!(
        decode::<String>(&mut reader).unwrap_err(),
        CodecError::UnexpectedTag { .. }
    ));

    // Even the shared zero concept never crosses kinds.
    let mut reader = encode(&0u32).unwrap();
    assert!(matches!(
        decode::<i32>(&mut reader).unwrap_err(),
        CodecError::UnexpectedTag { .. }
    ));

    // Null is only legal through the nullable wrapper.
    let mut reader = encode(&Option::<i32>::None).unwrap();
    assert!(matches!(
        decode::<i32>(&mut reader).unwrap_err(),
        CodecError::UnexpectedTag { .. }
    ));
}

#[test]
fn test_undefined_tags_are_rejected() {
    for byte in [0x47u8, 0x7F, 0xC0, 0xFF] {
        let mut reader = Bytes::copy_from_slice(&[byte]);
        assert!(matches!(
            decode::<i32>(&mut reader).unwrap_err(),
            CodecError::UnexpectedTag { tag, .. } if tag == byte
        ));
    }
}

#[test]
fn test_truncated_payloads_are_errors() {
    // Carrier tag announced, payload missing or short.
    let mut encoded = BytesMut::new();
    987654i32.encode(&mut encoded).unwrap();
    let full = encoded.freeze();
    for cut in 0..full.len() {
        let mut reader = full.slice(..cut);
        assert!(matches!(
            decode::<i32>(&mut reader).unwrap_err(),
            CodecError::TruncatedStream
        ));
    }

    // String length prefix promising more bytes than exist.
    let mut writer = BytesMut::new();
    "hello world".encode(&mut writer).unwrap();
    let full = writer.freeze();
    let mut reader = full.slice(..4);
    assert!(matches!(
        decode::<String>(&mut reader).unwrap_err(),
        CodecError::TruncatedStream
    ));
}

#[test]
fn test_invalid_utf8_payload_is_an_error() {
    // StringUtf8 tag, length 2, invalid bytes.
    let mut reader = Bytes::copy_from_slice(&[0x45, 0x02, 0xFF, 0xFE]);
    assert!(matches!(
        decode::<String>(&mut reader).unwrap_err(),
        CodecError::InvalidPayload { .. }
    ));
}

#[test]
fn test_invalid_char_payload_is_an_error() {
    // Char carrier with a surrogate code point.
    let mut writer = BytesMut::new();
    writer.extend_from_slice(&[0x03]);
    writer.extend_from_slice(&0xD800u32.to_le_bytes());
    let mut reader = writer.freeze();
    assert!(matches!(
        decode::<char>(&mut reader).unwrap_err(),
        CodecError::InvalidPayload { .. }
    ));
}
