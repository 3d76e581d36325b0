//! `Encode`/`Decode` implementations for every primitive kind, the
//! `Option<T>` nullability wrapper, and the size-classed `Vec<T>` framing.
//!
//! Encoding tests each value against its kind's sentinel table in a fixed
//! priority order and emits the bare sentinel tag on the first match;
//! otherwise it emits the kind's carrier tag followed by the fixed-width
//! little-endian payload. Decoding mirrors that exactly and rejects any tag
//! outside the kind's legal set.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use uuid::Uuid;

use crate::tag::*;
use crate::ticks::{DateTime, TimeSpan};
use crate::varint;
use crate::{read_tag, CodecError, Decode, Encode, Result};

pub(crate) fn ensure_remaining(reader: &Bytes, needed: usize) -> Result<()> {
    if reader.remaining() < needed {
        return Err(CodecError::TruncatedStream);
    }
    Ok(())
}

// --- bool ---
/// A `bool` is all-sentinel: one tag byte, never a payload.
impl Encode for bool {
    const KIND: Kind = Kind::Boolean;

    fn encode(&self, writer: &mut BytesMut) -> Result<()> {
        writer.put_u8(if *self { TAG_BOOLEAN_TRUE } else { TAG_BOOLEAN_FALSE });
        Ok(())
    }
}
impl Decode for bool {
    const KIND: Kind = Kind::Boolean;

    fn decode_tagged(tag: u8, _reader: &mut Bytes) -> Result<Self> {
        match tag {
            TAG_BOOLEAN_FALSE => Ok(false),
            TAG_BOOLEAN_TRUE => Ok(true),
            other => Err(CodecError::UnexpectedTag {
                tag: other,
                expected: Kind::Boolean,
            }),
        }
    }
}

// --- char ---
/// A `char` is carrier-only: 4-byte little-endian scalar value.
impl Encode for char {
    const KIND: Kind = Kind::Char;

    fn encode(&self, writer: &mut BytesMut) -> Result<()> {
        writer.put_u8(TAG_CHAR);
        writer.put_u32_le(*self as u32);
        Ok(())
    }
}
/// Decodes a `char`, rejecting surrogate and out-of-range code points.
impl Decode for char {
    const KIND: Kind = Kind::Char;

    fn decode_tagged(tag: u8, reader: &mut Bytes) -> Result<Self> {
        match tag {
            TAG_CHAR => {
                ensure_remaining(reader, 4)?;
                let value = reader.get_u32_le();
                char::from_u32(value).ok_or_else(|| CodecError::InvalidPayload {
                    kind: Kind::Char,
                    reason: format!("0x{value:X} is not a scalar value"),
                })
            }
            other => Err(CodecError::UnexpectedTag {
                tag: other,
                expected: Kind::Char,
            }),
        }
    }
}

// --- Signed integers ---
// Sentinel priority: Min, MinusOne, Zero, One, Max; then the carrier with
// the raw little-endian bit pattern.

impl Encode for i8 {
    const KIND: Kind = Kind::Int8;

    fn encode(&self, writer: &mut BytesMut) -> Result<()> {
        match *self {
            i8::MIN => writer.put_u8(TAG_INT8_MIN),
            -1 => writer.put_u8(TAG_INT8_MINUS_ONE),
            0 => writer.put_u8(TAG_INT8_ZERO),
            1 => writer.put_u8(TAG_INT8_ONE),
            i8::MAX => writer.put_u8(TAG_INT8_MAX),
            value => {
                writer.put_u8(TAG_INT8);
                writer.put_i8(value);
            }
        }
        Ok(())
    }
}
impl Decode for i8 {
    const KIND: Kind = Kind::Int8;

    fn decode_tagged(tag: u8, reader: &mut Bytes) -> Result<Self> {
        match tag {
            TAG_INT8_MIN => Ok(i8::MIN),
            TAG_INT8_MINUS_ONE => Ok(-1),
            TAG_INT8_ZERO => Ok(0),
            TAG_INT8_ONE => Ok(1),
            TAG_INT8_MAX => Ok(i8::MAX),
            TAG_INT8 => {
                ensure_remaining(reader, 1)?;
                Ok(reader.get_i8())
            }
            other => Err(CodecError::UnexpectedTag {
                tag: other,
                expected: Kind::Int8,
            }),
        }
    }
}

impl Encode for i16 {
    const KIND: Kind = Kind::Int16;

    fn encode(&self, writer: &mut BytesMut) -> Result<()> {
        match *self {
            i16::MIN => writer.put_u8(TAG_INT16_MIN),
            -1 => writer.put_u8(TAG_INT16_MINUS_ONE),
            0 => writer.put_u8(TAG_INT16_ZERO),
            1 => writer.put_u8(TAG_INT16_ONE),
            i16::MAX => writer.put_u8(TAG_INT16_MAX),
            value => {
                writer.put_u8(TAG_INT16);
                writer.put_i16_le(value);
            }
        }
        Ok(())
    }
}
impl Decode for i16 {
    const KIND: Kind = Kind::Int16;

    fn decode_tagged(tag: u8, reader: &mut Bytes) -> Result<Self> {
        match tag {
            TAG_INT16_MIN => Ok(i16::MIN),
            TAG_INT16_MINUS_ONE => Ok(-1),
            TAG_INT16_ZERO => Ok(0),
            TAG_INT16_ONE => Ok(1),
            TAG_INT16_MAX => Ok(i16::MAX),
            TAG_INT16 => {
                ensure_remaining(reader, 2)?;
                Ok(reader.get_i16_le())
            }
            other => Err(CodecError::UnexpectedTag {
                tag: other,
                expected: Kind::Int16,
            }),
        }
    }
}

impl Encode for i32 {
    const KIND: Kind = Kind::Int32;

    fn encode(&self, writer: &mut BytesMut) -> Result<()> {
        match *self {
            i32::MIN => writer.put_u8(TAG_INT32_MIN),
            -1 => writer.put_u8(TAG_INT32_MINUS_ONE),
            0 => writer.put_u8(TAG_INT32_ZERO),
            1 => writer.put_u8(TAG_INT32_ONE),
            i32::MAX => writer.put_u8(TAG_INT32_MAX),
            value => {
                writer.put_u8(TAG_INT32);
                writer.put_i32_le(value);
            }
        }
        Ok(())
    }
}
impl Decode for i32 {
    const KIND: Kind = Kind::Int32;

    fn decode_tagged(tag: u8, reader: &mut Bytes) -> Result<Self> {
        match tag {
            TAG_INT32_MIN => Ok(i32::MIN),
            TAG_INT32_MINUS_ONE => Ok(-1),
            TAG_INT32_ZERO => Ok(0),
            TAG_INT32_ONE => Ok(1),
            TAG_INT32_MAX => Ok(i32::MAX),
            TAG_INT32 => {
                ensure_remaining(reader, 4)?;
                Ok(reader.get_i32_le())
            }
            other => Err(CodecError::UnexpectedTag {
                tag: other,
                expected: Kind::Int32,
            }),
        }
    }
}

impl Encode for i64 {
    const KIND: Kind = Kind::Int64;

    fn encode(&self, writer: &mut BytesMut) -> Result<()> {
        match *self {
            i64::MIN => writer.put_u8(TAG_INT64_MIN),
            -1 => writer.put_u8(TAG_INT64_MINUS_ONE),
            0 => writer.put_u8(TAG_INT64_ZERO),
            1 => writer.put_u8(TAG_INT64_ONE),
            i64::MAX => writer.put_u8(TAG_INT64_MAX),
            value => {
                writer.put_u8(TAG_INT64);
                writer.put_i64_le(value);
            }
        }
        Ok(())
    }
}
impl Decode for i64 {
    const KIND: Kind = Kind::Int64;

    fn decode_tagged(tag: u8, reader: &mut Bytes) -> Result<Self> {
        match tag {
            TAG_INT64_MIN => Ok(i64::MIN),
            TAG_INT64_MINUS_ONE => Ok(-1),
            TAG_INT64_ZERO => Ok(0),
            TAG_INT64_ONE => Ok(1),
            TAG_INT64_MAX => Ok(i64::MAX),
            TAG_INT64 => {
                ensure_remaining(reader, 8)?;
                Ok(reader.get_i64_le())
            }
            other => Err(CodecError::UnexpectedTag {
                tag: other,
                expected: Kind::Int64,
            }),
        }
    }
}

// --- Unsigned integers ---
// Sentinel priority: Zero, One, Max; then the carrier.

impl Encode for u8 {
    const KIND: Kind = Kind::UInt8;

    fn encode(&self, writer: &mut BytesMut) -> Result<()> {
        match *self {
            0 => writer.put_u8(TAG_UINT8_ZERO),
            1 => writer.put_u8(TAG_UINT8_ONE),
            u8::MAX => writer.put_u8(TAG_UINT8_MAX),
            value => {
                writer.put_u8(TAG_UINT8);
                writer.put_u8(value);
            }
        }
        Ok(())
    }
}
impl Decode for u8 {
    const KIND: Kind = Kind::UInt8;

    fn decode_tagged(tag: u8, reader: &mut Bytes) -> Result<Self> {
        match tag {
            TAG_UINT8_ZERO => Ok(0),
            TAG_UINT8_ONE => Ok(1),
            TAG_UINT8_MAX => Ok(u8::MAX),
            TAG_UINT8 => {
                ensure_remaining(reader, 1)?;
                Ok(reader.get_u8())
            }
            other => Err(CodecError::UnexpectedTag {
                tag: other,
                expected: Kind::UInt8,
            }),
        }
    }
}

impl Encode for u16 {
    const KIND: Kind = Kind::UInt16;

    fn encode(&self, writer: &mut BytesMut) -> Result<()> {
        match *self {
            0 => writer.put_u8(TAG_UINT16_ZERO),
            1 => writer.put_u8(TAG_UINT16_ONE),
            u16::MAX => writer.put_u8(TAG_UINT16_MAX),
            value => {
                writer.put_u8(TAG_UINT16);
                writer.put_u16_le(value);
            }
        }
        Ok(())
    }
}
impl Decode for u16 {
    const KIND: Kind = Kind::UInt16;

    fn decode_tagged(tag: u8, reader: &mut Bytes) -> Result<Self> {
        match tag {
            TAG_UINT16_ZERO => Ok(0),
            TAG_UINT16_ONE => Ok(1),
            TAG_UINT16_MAX => Ok(u16::MAX),
            TAG_UINT16 => {
                ensure_remaining(reader, 2)?;
                Ok(reader.get_u16_le())
            }
            other => Err(CodecError::UnexpectedTag {
                tag: other,
                expected: Kind::UInt16,
            }),
        }
    }
}

impl Encode for u32 {
    const KIND: Kind = Kind::UInt32;

    fn encode(&self, writer: &mut BytesMut) -> Result<()> {
        match *self {
            0 => writer.put_u8(TAG_UINT32_ZERO),
            1 => writer.put_u8(TAG_UINT32_ONE),
            u32::MAX => writer.put_u8(TAG_UINT32_MAX),
            value => {
                writer.put_u8(TAG_UINT32);
                writer.put_u32_le(value);
            }
        }
        Ok(())
    }
}
impl Decode for u32 {
    const KIND: Kind = Kind::UInt32;

    fn decode_tagged(tag: u8, reader: &mut Bytes) -> Result<Self> {
        match tag {
            TAG_UINT32_ZERO => Ok(0),
            TAG_UINT32_ONE => Ok(1),
            TAG_UINT32_MAX => Ok(u32::MAX),
            TAG_UINT32 => {
                ensure_remaining(reader, 4)?;
                Ok(reader.get_u32_le())
            }
            other => Err(CodecError::UnexpectedTag {
                tag: other,
                expected: Kind::UInt32,
            }),
        }
    }
}

impl Encode for u64 {
    const KIND: Kind = Kind::UInt64;

    fn encode(&self, writer: &mut BytesMut) -> Result<()> {
        match *self {
            0 => writer.put_u8(TAG_UINT64_ZERO),
            1 => writer.put_u8(TAG_UINT64_ONE),
            u64::MAX => writer.put_u8(TAG_UINT64_MAX),
            value => {
                writer.put_u8(TAG_UINT64);
                writer.put_u64_le(value);
            }
        }
        Ok(())
    }
}
impl Decode for u64 {
    const KIND: Kind = Kind::UInt64;

    fn decode_tagged(tag: u8, reader: &mut Bytes) -> Result<Self> {
        match tag {
            TAG_UINT64_ZERO => Ok(0),
            TAG_UINT64_ONE => Ok(1),
            TAG_UINT64_MAX => Ok(u64::MAX),
            TAG_UINT64 => {
                ensure_remaining(reader, 8)?;
                Ok(reader.get_u64_le())
            }
            other => Err(CodecError::UnexpectedTag {
                tag: other,
                expected: Kind::UInt64,
            }),
        }
    }
}

// --- Floats ---
// Sentinel priority: Min, MinusOne, Zero, One, Max, PosInfinity,
// NegInfinity, NaN; then the carrier with the IEEE-754 bit pattern.
// Every NaN bit pattern collapses to the NaN sentinel, and -0.0 compares
// equal to 0.0 and collapses to the Zero sentinel.

impl Encode for f32 {
    const KIND: Kind = Kind::Float32;

    fn encode(&self, writer: &mut BytesMut) -> Result<()> {
        let value = *self;
        if value == f32::MIN {
            writer.put_u8(TAG_FLOAT32_MIN);
        } else if value == -1.0 {
            writer.put_u8(TAG_FLOAT32_MINUS_ONE);
        } else if value == 0.0 {
            writer.put_u8(TAG_FLOAT32_ZERO);
        } else if value == 1.0 {
            writer.put_u8(TAG_FLOAT32_ONE);
        } else if value == f32::MAX {
            writer.put_u8(TAG_FLOAT32_MAX);
        } else if value == f32::INFINITY {
            writer.put_u8(TAG_FLOAT32_POS_INFINITY);
        } else if value == f32::NEG_INFINITY {
            writer.put_u8(TAG_FLOAT32_NEG_INFINITY);
        } else if value.is_nan() {
            writer.put_u8(TAG_FLOAT32_NAN);
        } else {
            writer.put_u8(TAG_FLOAT32);
            writer.put_f32_le(value);
        }
        Ok(())
    }
}
impl Decode for f32 {
    const KIND: Kind = Kind::Float32;

    fn decode_tagged(tag: u8, reader: &mut Bytes) -> Result<Self> {
        match tag {
            TAG_FLOAT32_MIN => Ok(f32::MIN),
            TAG_FLOAT32_MINUS_ONE => Ok(-1.0),
            TAG_FLOAT32_ZERO => Ok(0.0),
            TAG_FLOAT32_ONE => Ok(1.0),
            TAG_FLOAT32_MAX => Ok(f32::MAX),
            TAG_FLOAT32_POS_INFINITY => Ok(f32::INFINITY),
            TAG_FLOAT32_NEG_INFINITY => Ok(f32::NEG_INFINITY),
            TAG_FLOAT32_NAN => Ok(f32::NAN),
            TAG_FLOAT32 => {
                ensure_remaining(reader, 4)?;
                Ok(reader.get_f32_le())
            }
            other => Err(CodecError::UnexpectedTag {
                tag: other,
                expected: Kind::Float32,
            }),
        }
    }
}

impl Encode for f64 {
    const KIND: Kind = Kind::Float64;

    fn encode(&self, writer: &mut BytesMut) -> Result<()> {
        let value = *self;
        if value == f64::MIN {
            writer.put_u8(TAG_FLOAT64_MIN);
        } else if value == -1.0 {
            writer.put_u8(TAG_FLOAT64_MINUS_ONE);
        } else if value == 0.0 {
            writer.put_u8(TAG_FLOAT64_ZERO);
        } else if value == 1.0 {
            writer.put_u8(TAG_FLOAT64_ONE);
        } else if value == f64::MAX {
            writer.put_u8(TAG_FLOAT64_MAX);
        } else if value == f64::INFINITY {
            writer.put_u8(TAG_FLOAT64_POS_INFINITY);
        } else if value == f64::NEG_INFINITY {
            writer.put_u8(TAG_FLOAT64_NEG_INFINITY);
        } else if value.is_nan() {
            writer.put_u8(TAG_FLOAT64_NAN);
        } else {
            writer.put_u8(TAG_FLOAT64);
            writer.put_f64_le(value);
        }
        Ok(())
    }
}
impl Decode for f64 {
    const KIND: Kind = Kind::Float64;

    fn decode_tagged(tag: u8, reader: &mut Bytes) -> Result<Self> {
        match tag {
            TAG_FLOAT64_MIN => Ok(f64::MIN),
            TAG_FLOAT64_MINUS_ONE => Ok(-1.0),
            TAG_FLOAT64_ZERO => Ok(0.0),
            TAG_FLOAT64_ONE => Ok(1.0),
            TAG_FLOAT64_MAX => Ok(f64::MAX),
            TAG_FLOAT64_POS_INFINITY => Ok(f64::INFINITY),
            TAG_FLOAT64_NEG_INFINITY => Ok(f64::NEG_INFINITY),
            TAG_FLOAT64_NAN => Ok(f64::NAN),
            TAG_FLOAT64 => {
                ensure_remaining(reader, 8)?;
                Ok(reader.get_f64_le())
            }
            other => Err(CodecError::UnexpectedTag {
                tag: other,
                expected: Kind::Float64,
            }),
        }
    }
}

// --- Guid ---
/// Encodes a `Uuid` as the Empty sentinel for nil, otherwise the carrier tag
/// and 16 bytes in mixed-endian source order: relative to the RFC byte
/// representation, the 4-byte, 2-byte, and 2-byte leading groups are each
/// byte-reversed and the trailing 8 bytes are copied verbatim. Components on
/// the other side of this wire exchange GUIDs in that order, so the swap is
/// part of the external contract.
impl Encode for Uuid {
    const KIND: Kind = Kind::Guid;

    fn encode(&self, writer: &mut BytesMut) -> Result<()> {
        if self.is_nil() {
            writer.put_u8(TAG_GUID_EMPTY);
        } else {
            writer.put_u8(TAG_GUID);
            writer.put_slice(&self.to_bytes_le());
        }
        Ok(())
    }
}
impl Decode for Uuid {
    const KIND: Kind = Kind::Guid;

    fn decode_tagged(tag: u8, reader: &mut Bytes) -> Result<Self> {
        match tag {
            TAG_GUID_EMPTY => Ok(Uuid::nil()),
            TAG_GUID => {
                ensure_remaining(reader, 16)?;
                let mut bytes = [0u8; 16];
                reader.copy_to_slice(&mut bytes);
                Ok(Uuid::from_bytes_le(bytes))
            }
            other => Err(CodecError::UnexpectedTag {
                tag: other,
                expected: Kind::Guid,
            }),
        }
    }
}

// --- DateTime / TimeSpan ---
// Tick count 0 has a dedicated sentinel; everything else is the carrier and
// the signed 64-bit tick count little-endian.

impl Encode for DateTime {
    const KIND: Kind = Kind::DateTime;

    fn encode(&self, writer: &mut BytesMut) -> Result<()> {
        if self.ticks() == 0 {
            writer.put_u8(TAG_DATETIME_ZERO);
        } else {
            writer.put_u8(TAG_DATETIME);
            writer.put_i64_le(self.ticks());
        }
        Ok(())
    }
}
impl Decode for DateTime {
    const KIND: Kind = Kind::DateTime;

    fn decode_tagged(tag: u8, reader: &mut Bytes) -> Result<Self> {
        match tag {
            TAG_DATETIME_ZERO => Ok(DateTime::ZERO),
            TAG_DATETIME => {
                ensure_remaining(reader, 8)?;
                Ok(DateTime::from_ticks(reader.get_i64_le()))
            }
            other => Err(CodecError::UnexpectedTag {
                tag: other,
                expected: Kind::DateTime,
            }),
        }
    }
}

impl Encode for TimeSpan {
    const KIND: Kind = Kind::TimeSpan;

    fn encode(&self, writer: &mut BytesMut) -> Result<()> {
        if self.ticks() == 0 {
            writer.put_u8(TAG_TIMESPAN_ZERO);
        } else {
            writer.put_u8(TAG_TIMESPAN);
            writer.put_i64_le(self.ticks());
        }
        Ok(())
    }
}
impl Decode for TimeSpan {
    const KIND: Kind = Kind::TimeSpan;

    fn decode_tagged(tag: u8, reader: &mut Bytes) -> Result<Self> {
        match tag {
            TAG_TIMESPAN_ZERO => Ok(TimeSpan::ZERO),
            TAG_TIMESPAN => {
                ensure_remaining(reader, 8)?;
                Ok(TimeSpan::from_ticks(reader.get_i64_le()))
            }
            other => Err(CodecError::UnexpectedTag {
                tag: other,
                expected: Kind::TimeSpan,
            }),
        }
    }
}

// --- String ---
/// Encodes a string as the Empty sentinel, or the UTF-8 carrier, a VarInt
/// byte length, and the bytes. [`encode_str_utf16`] is the UTF-16LE entry
/// point; decoding accepts either carrier regardless of which entry point
/// produced it.
impl Encode for str {
    const KIND: Kind = Kind::String;

    fn encode(&self, writer: &mut BytesMut) -> Result<()> {
        if self.is_empty() {
            writer.put_u8(TAG_STRING_EMPTY);
            return Ok(());
        }
        writer.put_u8(TAG_STRING_UTF8);
        varint::encode_u64(writer, self.len() as u64);
        writer.put_slice(self.as_bytes());
        Ok(())
    }
}
impl Encode for String {
    const KIND: Kind = Kind::String;

    fn encode(&self, writer: &mut BytesMut) -> Result<()> {
        self.as_str().encode(writer)
    }
}

/// Encodes a string with the UTF-16LE carrier: tag, VarInt byte length
/// (always even), then the code units little-endian. Empty strings still
/// collapse to the one-byte Empty sentinel.
pub fn encode_str_utf16(writer: &mut BytesMut, value: &str) -> Result<()> {
    if value.is_empty() {
        writer.put_u8(TAG_STRING_EMPTY);
        return Ok(());
    }
    writer.put_u8(TAG_STRING_UTF16);
    let unit_count: usize = value.encode_utf16().count();
    varint::encode_u64(writer, (unit_count * 2) as u64);
    for unit in value.encode_utf16() {
        writer.put_u16_le(unit);
    }
    Ok(())
}

fn decode_byte_length(reader: &mut Bytes) -> Result<usize> {
    usize::try_from(varint::decode_u64(reader)?).map_err(|_| CodecError::InvalidPayload {
        kind: Kind::String,
        reason: "byte length exceeds the address space".to_string(),
    })
}

impl Decode for String {
    const KIND: Kind = Kind::String;

    fn decode_tagged(tag: u8, reader: &mut Bytes) -> Result<Self> {
        match tag {
            TAG_STRING_EMPTY => Ok(String::new()),
            TAG_STRING_UTF8 => {
                let len = decode_byte_length(reader)?;
                ensure_remaining(reader, len)?;
                let bytes = reader.copy_to_bytes(len);
                String::from_utf8(bytes.to_vec()).map_err(|err| CodecError::InvalidPayload {
                    kind: Kind::String,
                    reason: err.to_string(),
                })
            }
            TAG_STRING_UTF16 => {
                let len = decode_byte_length(reader)?;
                if len % 2 != 0 {
                    return Err(CodecError::InvalidPayload {
                        kind: Kind::String,
                        reason: format!("odd UTF-16 byte length {len}"),
                    });
                }
                ensure_remaining(reader, len)?;
                let mut units = Vec::with_capacity(len / 2);
                for _ in 0..len / 2 {
                    units.push(reader.get_u16_le());
                }
                String::from_utf16(&units).map_err(|err| CodecError::InvalidPayload {
                    kind: Kind::String,
                    reason: err.to_string(),
                })
            }
            other => Err(CodecError::UnexpectedTag {
                tag: other,
                expected: Kind::String,
            }),
        }
    }
}

// --- Option ---
/// The nullability wrapper. `None` is the single shared `Null` tag; `Some`
/// is the inner value's own encoding, whose first byte is never `Null`.
impl<T: Encode> Encode for Option<T> {
    const KIND: Kind = T::KIND;

    fn encode(&self, writer: &mut BytesMut) -> Result<()> {
        match self {
            None => {
                writer.put_u8(TAG_NULL);
                Ok(())
            }
            Some(value) => value.encode(writer),
        }
    }
}
/// Reads one tag; `Null` yields `None`, anything else is handed to the inner
/// decoder with the tag already consumed.
impl<T: Decode> Decode for Option<T> {
    const KIND: Kind = T::KIND;

    fn decode_tagged(tag: u8, reader: &mut Bytes) -> Result<Self> {
        if tag == TAG_NULL {
            return Ok(None);
        }
        Ok(Some(T::decode_tagged(tag, reader)?))
    }
}

// --- Arrays ---

/// Writes the size-class tag and count for `len` elements of `kind`, for
/// callers that frame elements themselves.
pub fn encode_array_header(writer: &mut BytesMut, kind: Kind, len: usize) -> Result<()> {
    let base = kind.array_base();
    if len == 0 {
        writer.put_u8(base + ARRAY_EMPTY);
    } else if len <= u8::MAX as usize {
        writer.put_u8(base + ARRAY_SMALL);
        writer.put_u8(len as u8);
    } else if len <= u16::MAX as usize {
        writer.put_u8(base + ARRAY_FULL);
        writer.put_u16_le(len as u16);
    } else if u32::try_from(len).is_ok() {
        writer.put_u8(base + ARRAY_LARGE);
        writer.put_u32_le(len as u32);
    } else {
        return Err(CodecError::InvalidPayload {
            kind,
            reason: "array length exceeds the 4-byte count range".to_string(),
        });
    }
    Ok(())
}

pub(crate) fn decode_array_len(tag: u8, kind: Kind, reader: &mut Bytes) -> Result<usize> {
    let (tag_kind, class) =
        array_tag_kind(tag).ok_or(CodecError::UnexpectedTag { tag, expected: kind })?;
    if tag_kind != kind {
        return Err(CodecError::UnexpectedTag { tag, expected: kind });
    }
    match class {
        ARRAY_EMPTY => Ok(0),
        ARRAY_SMALL => {
            ensure_remaining(reader, 1)?;
            Ok(reader.get_u8() as usize)
        }
        ARRAY_FULL => {
            ensure_remaining(reader, 2)?;
            Ok(reader.get_u16_le() as usize)
        }
        _ => {
            ensure_remaining(reader, 4)?;
            Ok(reader.get_u32_le() as usize)
        }
    }
}

/// Size-classed array framing: the element kind's Empty / Small / Full /
/// Large tag, the class-appropriate count, then each element's own encoding
/// (nullable elements via `Vec<Option<T>>`).
impl<T: Encode> Encode for Vec<T> {
    const KIND: Kind = T::KIND;

    fn encode(&self, writer: &mut BytesMut) -> Result<()> {
        encode_array_header(writer, T::KIND, self.len())?;
        for item in self {
            item.encode(writer)?;
        }
        Ok(())
    }
}
impl<T: Decode> Decode for Vec<T> {
    const KIND: Kind = T::KIND;

    fn decode_tagged(tag: u8, reader: &mut Bytes) -> Result<Self> {
        let len = decode_array_len(tag, T::KIND, reader)?;
        // Every element costs at least one byte, so a declared count beyond
        // the remaining input cannot be honest; reserve no more than that.
        let mut items = Vec::with_capacity(len.min(reader.remaining()));
        for _ in 0..len {
            items.push(T::decode(reader)?);
        }
        Ok(items)
    }
}

/// Reads one tag byte for the given kind's array group and returns the
/// element count, for callers that frame elements themselves.
pub fn decode_array_header(reader: &mut Bytes, kind: Kind) -> Result<usize> {
    let tag = read_tag(reader)?;
    decode_array_len(tag, kind, reader)
}
