//! Wire-tag constants and the `Kind` enumeration.
//!
//! Every encoded value starts with a single tag byte. A tag is either a
//! *sentinel* (the value is fully determined by the tag, no payload follows)
//! or a *carrier* (a fixed- or variable-width payload follows). Tags are
//! stable and part of the wire format.
//!
//! The scalar region occupies `0x00..=0x46`. Bytes `0x80` and above are
//! reserved for container size-class tags: each element kind owns a group of
//! four consecutive codes in the order Small / Full / Large / Empty, starting
//! at `0x80 + 4 * kind`. Every other byte value is undefined; undefined bytes
//! report as `"Unknown"` in diagnostics and are never decodable.

use std::fmt;

/// Shared null tag, used by every nullable wrapper. Never a payload.
pub const TAG_NULL: u8 = 0x00;

// Boolean is all-sentinel: both values fit in the tag byte.
pub const TAG_BOOLEAN_FALSE: u8 = 0x01;
pub const TAG_BOOLEAN_TRUE: u8 = 0x02;

/// Char carrier: 4-byte little-endian scalar value follows.
pub const TAG_CHAR: u8 = 0x03;

// Signed integers: Min, MinusOne, Zero, One, Max sentinels plus a carrier.
pub const TAG_INT8_MIN: u8 = 0x04;
pub const TAG_INT8_MINUS_ONE: u8 = 0x05;
pub const TAG_INT8_ZERO: u8 = 0x06;
pub const TAG_INT8_ONE: u8 = 0x07;
pub const TAG_INT8_MAX: u8 = 0x08;
pub const TAG_INT8: u8 = 0x09;

pub const TAG_INT16_MIN: u8 = 0x0A;
pub const TAG_INT16_MINUS_ONE: u8 = 0x0B;
pub const TAG_INT16_ZERO: u8 = 0x0C;
pub const TAG_INT16_ONE: u8 = 0x0D;
pub const TAG_INT16_MAX: u8 = 0x0E;
pub const TAG_INT16: u8 = 0x0F;

pub const TAG_INT32_MIN: u8 = 0x10;
pub const TAG_INT32_MINUS_ONE: u8 = 0x11;
pub const TAG_INT32_ZERO: u8 = 0x12;
pub const TAG_INT32_ONE: u8 = 0x13;
pub const TAG_INT32_MAX: u8 = 0x14;
pub const TAG_INT32: u8 = 0x15;

pub const TAG_INT64_MIN: u8 = 0x16;
pub const TAG_INT64_MINUS_ONE: u8 = 0x17;
pub const TAG_INT64_ZERO: u8 = 0x18;
pub const TAG_INT64_ONE: u8 = 0x19;
pub const TAG_INT64_MAX: u8 = 0x1A;
pub const TAG_INT64: u8 = 0x1B;

// Unsigned integers: Zero, One, Max sentinels plus a carrier.
pub const TAG_UINT8_ZERO: u8 = 0x1C;
pub const TAG_UINT8_ONE: u8 = 0x1D;
pub const TAG_UINT8_MAX: u8 = 0x1E;
pub const TAG_UINT8: u8 = 0x1F;

pub const TAG_UINT16_ZERO: u8 = 0x20;
pub const TAG_UINT16_ONE: u8 = 0x21;
pub const TAG_UINT16_MAX: u8 = 0x22;
pub const TAG_UINT16: u8 = 0x23;

pub const TAG_UINT32_ZERO: u8 = 0x24;
pub const TAG_UINT32_ONE: u8 = 0x25;
pub const TAG_UINT32_MAX: u8 = 0x26;
pub const TAG_UINT32: u8 = 0x27;

pub const TAG_UINT64_ZERO: u8 = 0x28;
pub const TAG_UINT64_ONE: u8 = 0x29;
pub const TAG_UINT64_MAX: u8 = 0x2A;
pub const TAG_UINT64: u8 = 0x2B;

// Floats add the three non-finite sentinels.
pub const TAG_FLOAT32_MIN: u8 = 0x2C;
pub const TAG_FLOAT32_MINUS_ONE: u8 = 0x2D;
pub const TAG_FLOAT32_ZERO: u8 = 0x2E;
pub const TAG_FLOAT32_ONE: u8 = 0x2F;
pub const TAG_FLOAT32_MAX: u8 = 0x30;
pub const TAG_FLOAT32_NEG_INFINITY: u8 = 0x31;
pub const TAG_FLOAT32_POS_INFINITY: u8 = 0x32;
pub const TAG_FLOAT32_NAN: u8 = 0x33;
pub const TAG_FLOAT32: u8 = 0x34;

pub const TAG_FLOAT64_MIN: u8 = 0x35;
pub const TAG_FLOAT64_MINUS_ONE: u8 = 0x36;
pub const TAG_FLOAT64_ZERO: u8 = 0x37;
pub const TAG_FLOAT64_ONE: u8 = 0x38;
pub const TAG_FLOAT64_MAX: u8 = 0x39;
pub const TAG_FLOAT64_NEG_INFINITY: u8 = 0x3A;
pub const TAG_FLOAT64_POS_INFINITY: u8 = 0x3B;
pub const TAG_FLOAT64_NAN: u8 = 0x3C;
pub const TAG_FLOAT64: u8 = 0x3D;

/// All-zero GUID
pub const TAG_GUID_EMPTY: u8 = 0x3E;
/// 16 payload bytes in mixed-endian source order
pub const TAG_GUID: u8 = 0x3F;

/// Tick count 0
pub const TAG_DATETIME_ZERO: u8 = 0x40;
/// 8-byte little-endian tick count
pub const TAG_DATETIME: u8 = 0x41;

pub const TAG_TIMESPAN_ZERO: u8 = 0x42;
pub const TAG_TIMESPAN: u8 = 0x43;

pub const TAG_STRING_EMPTY: u8 = 0x44;
/// VarInt byte length, then UTF-8 bytes
pub const TAG_STRING_UTF8: u8 = 0x45;
/// VarInt byte length (always even), then UTF-16LE code units
pub const TAG_STRING_UTF16: u8 = 0x46;

/// First container size-class tag. Each kind's group is
/// `array_base(kind) + ARRAY_*`.
pub const TAG_ARRAY_BASE: u8 = 0x80;

/// Count as one byte, 1..=255 elements
pub const ARRAY_SMALL: u8 = 0;
/// Count as 2-byte little-endian, up to 65535 elements
pub const ARRAY_FULL: u8 = 1;
/// Count as 4-byte little-endian
pub const ARRAY_LARGE: u8 = 2;
/// Zero elements, no count bytes
pub const ARRAY_EMPTY: u8 = 3;

/// The closed set of wire kinds.
///
/// The discriminant order fixes each kind's container tag group
/// (`0x80 + 4 * kind`), so it is part of the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Kind {
    Boolean = 0,
    Char = 1,
    Int8 = 2,
    Int16 = 3,
    Int32 = 4,
    Int64 = 5,
    UInt8 = 6,
    UInt16 = 7,
    UInt32 = 8,
    UInt64 = 9,
    Float32 = 10,
    Float64 = 11,
    Guid = 12,
    DateTime = 13,
    TimeSpan = 14,
    String = 15,
}

pub(crate) const KIND_COUNT: u8 = 16;

impl Kind {
    /// First tag of this kind's container size-class group.
    pub const fn array_base(self) -> u8 {
        TAG_ARRAY_BASE + (self as u8) * 4
    }

    pub fn name(self) -> &'static str {
        match self {
            Kind::Boolean => "Boolean",
            Kind::Char => "Char",
            Kind::Int8 => "Int8",
            Kind::Int16 => "Int16",
            Kind::Int32 => "Int32",
            Kind::Int64 => "Int64",
            Kind::UInt8 => "UInt8",
            Kind::UInt16 => "UInt16",
            Kind::UInt32 => "UInt32",
            Kind::UInt64 => "UInt64",
            Kind::Float32 => "Float32",
            Kind::Float64 => "Float64",
            Kind::Guid => "Guid",
            Kind::DateTime => "DateTime",
            Kind::TimeSpan => "TimeSpan",
            Kind::String => "String",
        }
    }

    fn from_index(index: u8) -> Option<Kind> {
        const ALL: [Kind; KIND_COUNT as usize] = [
            Kind::Boolean,
            Kind::Char,
            Kind::Int8,
            Kind::Int16,
            Kind::Int32,
            Kind::Int64,
            Kind::UInt8,
            Kind::UInt16,
            Kind::UInt32,
            Kind::UInt64,
            Kind::Float32,
            Kind::Float64,
            Kind::Guid,
            Kind::DateTime,
            Kind::TimeSpan,
            Kind::String,
        ];
        ALL.get(index as usize).copied()
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Scalar tag names, in byte order. The table is the single source for the
/// name lookups below; a unit test checks it stays injective.
const SCALAR_TAG_NAMES: &[(u8, &str)] = &[
    (TAG_NULL, "Null"),
    (TAG_BOOLEAN_FALSE, "BooleanFalse"),
    (TAG_BOOLEAN_TRUE, "BooleanTrue"),
    (TAG_CHAR, "Char"),
    (TAG_INT8_MIN, "Int8Min"),
    (TAG_INT8_MINUS_ONE, "Int8MinusOne"),
    (TAG_INT8_ZERO, "Int8Zero"),
    (TAG_INT8_ONE, "Int8One"),
    (TAG_INT8_MAX, "Int8Max"),
    (TAG_INT8, "Int8"),
    (TAG_INT16_MIN, "Int16Min"),
    (TAG_INT16_MINUS_ONE, "Int16MinusOne"),
    (TAG_INT16_ZERO, "Int16Zero"),
    (TAG_INT16_ONE, "Int16One"),
    (TAG_INT16_MAX, "Int16Max"),
    (TAG_INT16, "Int16"),
    (TAG_INT32_MIN, "Int32Min"),
    (TAG_INT32_MINUS_ONE, "Int32MinusOne"),
    (TAG_INT32_ZERO, "Int32Zero"),
    (TAG_INT32_ONE, "Int32One"),
    (TAG_INT32_MAX, "Int32Max"),
    (TAG_INT32, "Int32"),
    (TAG_INT64_MIN, "Int64Min"),
    (TAG_INT64_MINUS_ONE, "Int64MinusOne"),
    (TAG_INT64_ZERO, "Int64Zero"),
    (TAG_INT64_ONE, "Int64One"),
    (TAG_INT64_MAX, "Int64Max"),
    (TAG_INT64, "Int64"),
    (TAG_UINT8_ZERO, "UInt8Zero"),
    (TAG_UINT8_ONE, "UInt8One"),
    (TAG_UINT8_MAX, "UInt8Max"),
    (TAG_UINT8, "UInt8"),
    (TAG_UINT16_ZERO, "UInt16Zero"),
    (TAG_UINT16_ONE, "UInt16One"),
    (TAG_UINT16_MAX, "UInt16Max"),
    (TAG_UINT16, "UInt16"),
    (TAG_UINT32_ZERO, "UInt32Zero"),
    (TAG_UINT32_ONE, "UInt32One"),
    (TAG_UINT32_MAX, "UInt32Max"),
    (TAG_UINT32, "UInt32"),
    (TAG_UINT64_ZERO, "UInt64Zero"),
    (TAG_UINT64_ONE, "UInt64One"),
    (TAG_UINT64_MAX, "UInt64Max"),
    (TAG_UINT64, "UInt64"),
    (TAG_FLOAT32_MIN, "Float32Min"),
    (TAG_FLOAT32_MINUS_ONE, "Float32MinusOne"),
    (TAG_FLOAT32_ZERO, "Float32Zero"),
    (TAG_FLOAT32_ONE, "Float32One"),
    (TAG_FLOAT32_MAX, "Float32Max"),
    (TAG_FLOAT32_NEG_INFINITY, "Float32NegInfinity"),
    (TAG_FLOAT32_POS_INFINITY, "Float32PosInfinity"),
    (TAG_FLOAT32_NAN, "Float32NaN"),
    (TAG_FLOAT32, "Float32"),
    (TAG_FLOAT64_MIN, "Float64Min"),
    (TAG_FLOAT64_MINUS_ONE, "Float64MinusOne"),
    (TAG_FLOAT64_ZERO, "Float64Zero"),
    (TAG_FLOAT64_ONE, "Float64One"),
    (TAG_FLOAT64_MAX, "Float64Max"),
    (TAG_FLOAT64_NEG_INFINITY, "Float64NegInfinity"),
    (TAG_FLOAT64_POS_INFINITY, "Float64PosInfinity"),
    (TAG_FLOAT64_NAN, "Float64NaN"),
    (TAG_FLOAT64, "Float64"),
    (TAG_GUID_EMPTY, "GuidEmpty"),
    (TAG_GUID, "Guid"),
    (TAG_DATETIME_ZERO, "DateTimeZero"),
    (TAG_DATETIME, "DateTime"),
    (TAG_TIMESPAN_ZERO, "TimeSpanZero"),
    (TAG_TIMESPAN, "TimeSpan"),
    (TAG_STRING_EMPTY, "StringEmpty"),
    (TAG_STRING_UTF8, "StringUtf8"),
    (TAG_STRING_UTF16, "StringUtf16"),
];

/// Container tag names, indexed by `tag - TAG_ARRAY_BASE`.
const ARRAY_TAG_NAMES: [&str; (KIND_COUNT as usize) * 4] = [
    "BooleanArraySmall", "BooleanArrayFull", "BooleanArrayLarge", "BooleanArrayEmpty",
    "CharArraySmall", "CharArrayFull", "CharArrayLarge", "CharArrayEmpty",
    "Int8ArraySmall", "Int8ArrayFull", "Int8ArrayLarge", "Int8ArrayEmpty",
    "Int16ArraySmall", "Int16ArrayFull", "Int16ArrayLarge", "Int16ArrayEmpty",
    "Int32ArraySmall", "Int32ArrayFull", "Int32ArrayLarge", "Int32ArrayEmpty",
    "Int64ArraySmall", "Int64ArrayFull", "Int64ArrayLarge", "Int64ArrayEmpty",
    "UInt8ArraySmall", "UInt8ArrayFull", "UInt8ArrayLarge", "UInt8ArrayEmpty",
    "UInt16ArraySmall", "UInt16ArrayFull", "UInt16ArrayLarge", "UInt16ArrayEmpty",
    "UInt32ArraySmall", "UInt32ArrayFull", "UInt32ArrayLarge", "UInt32ArrayEmpty",
    "UInt64ArraySmall", "UInt64ArrayFull", "UInt64ArrayLarge", "UInt64ArrayEmpty",
    "Float32ArraySmall", "Float32ArrayFull", "Float32ArrayLarge", "Float32ArrayEmpty",
    "Float64ArraySmall", "Float64ArrayFull", "Float64ArrayLarge", "Float64ArrayEmpty",
    "GuidArraySmall", "GuidArrayFull", "GuidArrayLarge", "GuidArrayEmpty",
    "DateTimeArraySmall", "DateTimeArrayFull", "DateTimeArrayLarge", "DateTimeArrayEmpty",
    "TimeSpanArraySmall", "TimeSpanArrayFull", "TimeSpanArrayLarge", "TimeSpanArrayEmpty",
    "StringArraySmall", "StringArrayFull", "StringArrayLarge", "StringArrayEmpty",
];

/// Diagnostic name of a tag byte. Total: undefined bytes are `"Unknown"`.
pub fn tag_name(tag: u8) -> &'static str {
    if let Some((_, name)) = SCALAR_TAG_NAMES.iter().find(|(byte, _)| *byte == tag) {
        return name;
    }
    if tag >= TAG_ARRAY_BASE {
        if let Some(name) = ARRAY_TAG_NAMES.get((tag - TAG_ARRAY_BASE) as usize) {
            return name;
        }
    }
    "Unknown"
}

/// Inverse of [`tag_name`] over defined names.
pub fn tag_from_name(name: &str) -> Option<u8> {
    if let Some((byte, _)) = SCALAR_TAG_NAMES.iter().find(|(_, n)| *n == name) {
        return Some(*byte);
    }
    ARRAY_TAG_NAMES
        .iter()
        .position(|n| *n == name)
        .map(|index| TAG_ARRAY_BASE + index as u8)
}

/// Element kind owning a container tag, with the tag's class offset.
pub(crate) fn array_tag_kind(tag: u8) -> Option<(Kind, u8)> {
    if tag < TAG_ARRAY_BASE {
        return None;
    }
    let offset = tag - TAG_ARRAY_BASE;
    let kind = Kind::from_index(offset / 4)?;
    Some((kind, offset % 4))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn scalar_tags_are_injective() {
        let mut seen = HashSet::new();
        for (byte, name) in SCALAR_TAG_NAMES {
            assert!(seen.insert(*byte), "tag byte {byte:#04X} assigned twice");
            assert!(*byte < TAG_ARRAY_BASE, "{name} collides with the container region");
        }
    }

    #[test]
    fn names_round_trip() {
        for (byte, name) in SCALAR_TAG_NAMES {
            assert_eq!(tag_name(*byte), *name);
            assert_eq!(tag_from_name(name), Some(*byte));
        }
        for (index, name) in ARRAY_TAG_NAMES.iter().enumerate() {
            let byte = TAG_ARRAY_BASE + index as u8;
            assert_eq!(tag_name(byte), *name);
            assert_eq!(tag_from_name(name), Some(byte));
        }
    }

    #[test]
    fn undefined_bytes_are_unknown() {
        assert_eq!(tag_name(0x47), "Unknown");
        assert_eq!(tag_name(0x7F), "Unknown");
        assert_eq!(tag_name(0xC0), "Unknown");
        assert_eq!(tag_name(0xFF), "Unknown");
        assert_eq!(tag_from_name("Unknown"), None);
    }

    #[test]
    fn null_collides_with_nothing() {
        for (byte, name) in SCALAR_TAG_NAMES {
            if *name != "Null" {
                assert_ne!(*byte, TAG_NULL);
            }
        }
    }

    #[test]
    fn array_groups_cover_every_kind() {
        for index in 0..KIND_COUNT {
            let kind = Kind::from_index(index).unwrap();
            let base = kind.array_base();
            assert_eq!(array_tag_kind(base), Some((kind, ARRAY_SMALL)));
            assert_eq!(array_tag_kind(base + 3), Some((kind, ARRAY_EMPTY)));
        }
        assert_eq!(array_tag_kind(0x7F), None);
        assert_eq!(array_tag_kind(Kind::String.array_base() + 4), None);
    }
}
