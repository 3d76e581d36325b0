//! # rowpack
//!
//! A compact, self-describing, tag-based binary codec for typed values and
//! row streams.
//!
//! Every encoded value begins with one tag byte. Common values (zero, one,
//! extremes, empty string, all-zero GUID, non-finite floats) are *sentinels*:
//! the tag alone is the whole encoding. Everything else uses the kind's
//! *carrier* tag followed by a fixed-width little-endian payload, or a
//! VarInt-length-prefixed byte run for strings.
//!
//! - Primitives encode via the [`Encode`]/[`Decode`] traits over
//!   `bytes::BytesMut`/`bytes::Bytes`.
//! - Nullability is the generic `Option<T>` wrapper: `None` is the single
//!   shared `Null` tag, `Some` is the inner value's own encoding.
//! - Arrays are `Vec<T>` with size-classed framing (Empty / Small / Full /
//!   Large counts).
//! - Row streams are driven by a data-driven field table ([`RecordSchema`])
//!   and framed as `Bool(true) [row] ... Bool(false)`.
//!
//! The codec is stateless and synchronous: every call reads or writes a
//! caller-supplied buffer and nothing outlives the call. Decoding never
//! guesses — a tag outside the requested kind's legal set or a short buffer
//! is always an error.
//!
//! ```rust
//! use bytes::BytesMut;
//! use rowpack::{decode, Encode};
//!
//! let mut writer = BytesMut::new();
//! 12345i32.encode(&mut writer).unwrap();
//! let mut reader = writer.freeze();
//! assert_eq!(decode::<i32>(&mut reader).unwrap(), 12345);
//! ```
//!
//! ## Feature flags
//!
//! - `chrono` — conversions between the tick types and `chrono`, plus
//!   `Encode`/`Decode` for `chrono::DateTime<Utc>` and `chrono::TimeDelta`.

pub mod core;
mod features;
pub mod record;
pub mod tag;
pub mod ticks;
pub mod varint;

use bytes::{Buf, Bytes, BytesMut};

pub use crate::record::{Field, RecordReader, RecordSchema, RecordWriter, Value};
pub use crate::tag::Kind;
pub use crate::ticks::{DateTime, TimeSpan};

/// Errors surfaced by encode/decode calls.
///
/// The taxonomy is closed and every error aborts the current call; the codec
/// never recovers locally or substitutes defaults.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Tag byte outside the legal set for the value being read.
    #[error("unexpected tag 0x{tag:02X} ({}) while decoding {expected}", crate::tag::tag_name(*.tag))]
    UnexpectedTag { tag: u8, expected: Kind },
    /// Fewer bytes available than the payload, count, or VarInt requires.
    #[error("stream ended before the value was complete")]
    TruncatedStream,
    /// A carrier payload that cannot reconstruct a value of its kind.
    #[error("invalid {kind} payload: {reason}")]
    InvalidPayload { kind: Kind, reason: String },
    /// Null routed to a non-nullable record field. Nothing is written.
    #[error("null value for non-nullable field '{field}'")]
    NullNotAllowed { field: String },
    /// A dynamic value whose kind does not match its field.
    #[error("field '{field}' expects {expected}, got {actual}")]
    KindMismatch {
        field: String,
        expected: Kind,
        actual: Kind,
    },
    /// Row arity differs from the schema.
    #[error("row has {actual} values but the schema has {expected} fields")]
    FieldCountMismatch { expected: usize, actual: usize },
}

/// The result type used throughout this crate.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Trait for values with a wire encoding.
///
/// Encoding is deterministic: the same logical value always serializes to
/// the same byte sequence, and the sentinel check runs in a fixed priority
/// order before the carrier path.
pub trait Encode {
    /// The wire kind this implementation writes. Also selects the container
    /// tag group when the type appears as an array element.
    const KIND: Kind;

    /// Appends the value's encoding to `writer`.
    fn encode(&self, writer: &mut BytesMut) -> Result<()>;
}

/// Trait for values decodable from the wire.
pub trait Decode: Sized {
    /// The wire kind this implementation reads.
    const KIND: Kind;

    /// Reads one tag byte and the value it announces.
    fn decode(reader: &mut Bytes) -> Result<Self> {
        let tag = read_tag(reader)?;
        Self::decode_tagged(tag, reader)
    }

    /// Decodes a value whose tag byte has already been consumed.
    ///
    /// This is the dispatch point the nullability wrapper and the record
    /// layer use so a tag is never read twice.
    fn decode_tagged(tag: u8, reader: &mut Bytes) -> Result<Self>;
}

pub(crate) fn read_tag(reader: &mut Bytes) -> Result<u8> {
    if reader.remaining() == 0 {
        return Err(CodecError::TruncatedStream);
    }
    Ok(reader.get_u8())
}

/// Convenience function to encode one value into a fresh buffer.
pub fn encode<T: Encode>(value: &T) -> Result<Bytes> {
    let mut writer = BytesMut::new();
    value.encode(&mut writer)?;
    Ok(writer.freeze())
}

/// Convenience function to decode one value from `reader`.
pub fn decode<T: Decode>(reader: &mut Bytes) -> Result<T> {
    T::decode(reader)
}
