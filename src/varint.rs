//! 7-bit grouped variable-length integer encoding.
//!
//! Used on the wire for string byte-length prefixes. Groups are emitted
//! least-significant-first; the low seven bits of each byte are payload and
//! the high bit says another group follows.
//!
//! The encoding is capped at nine bytes: the first eight bytes carry seven
//! payload bits each (56 bits), and when a ninth byte is needed it carries
//! the remaining eight bits verbatim, with no continuation bit. That cap is
//! what lets `u64::MAX` fit in nine bytes instead of ten.
//!
//! | value range          | bytes |
//! |----------------------|-------|
//! | 0 ..= 2^7 - 1        | 1     |
//! | 2^7 ..= 2^14 - 1     | 2     |
//! | 2^14 ..= 2^21 - 1    | 3     |
//! | ...                  | ...   |
//! | 2^49 ..= 2^56 - 1    | 8     |
//! | 2^56 ..= u64::MAX    | 9     |
//!
//! The signed transform is a one-bit left rotation of the two's-complement
//! bit pattern (the sign bit becomes bit 0). It is deliberately not the
//! zigzag transform: the rotation is the observed wire behavior and is kept
//! byte-for-byte. Like zigzag it maps small non-negative values to small
//! unsigned values; unlike zigzag, every negative value occupies the full
//! nine bytes.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::{CodecError, Result};

/// Maximum encoded length of one value.
pub const MAX_VARINT_LEN: usize = 9;

const CONTINUATION: u8 = 0x80;
const PAYLOAD: u8 = 0x7F;

/// Appends the VarInt encoding of `value` to `writer`.
pub fn encode_u64(writer: &mut BytesMut, mut value: u64) {
    for _ in 0..MAX_VARINT_LEN - 1 {
        if value < u64::from(CONTINUATION) {
            writer.put_u8(value as u8);
            return;
        }
        writer.put_u8((value as u8 & PAYLOAD) | CONTINUATION);
        value >>= 7;
    }
    // Ninth byte: the remaining eight bits, no continuation semantics.
    writer.put_u8(value as u8);
}

/// Reads one VarInt from `reader`.
pub fn decode_u64(reader: &mut Bytes) -> Result<u64> {
    let mut value = 0u64;
    let mut shift = 0u32;
    for _ in 0..MAX_VARINT_LEN - 1 {
        if reader.remaining() == 0 {
            return Err(CodecError::TruncatedStream);
        }
        let byte = reader.get_u8();
        if byte & CONTINUATION == 0 {
            return Ok(value | u64::from(byte) << shift);
        }
        value |= u64::from(byte & PAYLOAD) << shift;
        shift += 7;
    }
    if reader.remaining() == 0 {
        return Err(CodecError::TruncatedStream);
    }
    // shift is 56 here: the ninth byte is the top eight bits verbatim.
    Ok(value | u64::from(reader.get_u8()) << shift)
}

/// Appends a signed value via the rotation transform.
pub fn encode_i64(writer: &mut BytesMut, value: i64) {
    encode_u64(writer, (value as u64).rotate_left(1));
}

/// Reads a signed value via the inverse rotation.
pub fn decode_i64(reader: &mut Bytes) -> Result<i64> {
    Ok(decode_u64(reader)?.rotate_right(1) as i64)
}

/// Encoded length of `value`, without writing it.
pub fn varint_len(value: u64) -> usize {
    let bits = 64 - u64::leading_zeros(value | 1) as usize;
    ((bits + 6) / 7).min(MAX_VARINT_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(value: u64) -> Bytes {
        let mut writer = BytesMut::new();
        encode_u64(&mut writer, value);
        writer.freeze()
    }

    #[test]
    fn single_byte_values() {
        assert_eq!(&encoded(0)[..], &[0x00]);
        assert_eq!(&encoded(1)[..], &[0x01]);
        assert_eq!(&encoded(127)[..], &[0x7F]);
    }

    #[test]
    fn continuation_layout() {
        assert_eq!(&encoded(128)[..], &[0x80, 0x01]);
        assert_eq!(&encoded(16383)[..], &[0xFF, 0x7F]);
        assert_eq!(&encoded(16384)[..], &[0x80, 0x80, 0x01]);
    }

    #[test]
    fn nine_byte_cap() {
        assert_eq!(encoded(u64::MAX).len(), MAX_VARINT_LEN);
        assert_eq!(
            &encoded(u64::MAX)[..],
            &[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]
        );
        assert_eq!(encoded(1u64 << 56).len(), 9);
        assert_eq!(encoded((1u64 << 56) - 1).len(), 8);
    }

    #[test]
    fn boundary_round_trips() {
        for value in [
            0,
            1,
            127,
            128,
            16383,
            16384,
            (1u64 << 56) - 1,
            1u64 << 56,
            i64::MAX as u64,
            u64::MAX,
        ] {
            let mut reader = encoded(value);
            assert_eq!(decode_u64(&mut reader).unwrap(), value);
            assert_eq!(reader.remaining(), 0);
            assert_eq!(encoded(value).len(), varint_len(value));
        }
    }

    #[test]
    fn truncated_input_is_an_error() {
        let mut reader = Bytes::from_static(&[0x80]);
        assert!(matches!(decode_u64(&mut reader), Err(CodecError::TruncatedStream)));
        let mut reader = Bytes::from_static(&[0xFF; 8]);
        assert!(matches!(decode_u64(&mut reader), Err(CodecError::TruncatedStream)));
        let mut empty = Bytes::new();
        assert!(matches!(decode_u64(&mut empty), Err(CodecError::TruncatedStream)));
    }

    #[test]
    fn signed_rotation_round_trips() {
        for value in [0i64, 1, -1, 2, -2, 63, -64, i64::MAX, i64::MIN, -123456789] {
            let mut writer = BytesMut::new();
            encode_i64(&mut writer, value);
            let mut reader = writer.freeze();
            assert_eq!(decode_i64(&mut reader).unwrap(), value);
        }
    }

    #[test]
    fn signed_transform_is_a_rotation_not_zigzag() {
        // rotation: -1 -> u64::MAX; zigzag would give 1 for -1.
        let mut writer = BytesMut::new();
        encode_i64(&mut writer, -1);
        assert_eq!(writer.len(), MAX_VARINT_LEN);
        let mut writer = BytesMut::new();
        encode_i64(&mut writer, 1);
        assert_eq!(&writer[..], &[0x02]);
    }
}
