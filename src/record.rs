//! Data-driven record encoding.
//!
//! A record's shape is an ordered field table — a [`RecordSchema`] of
//! `(kind, nullability)` pairs — and one generic loop drives encode and
//! decode for every shape. By convention the first field is the per-row type
//! discriminator, followed by key fields, then type-specific fields; the
//! schema owns that order and the codec never reorders.
//!
//! Row streams are framed with boolean tags: each row is announced by a
//! `BooleanTrue` tag and the stream ends with a single `BooleanFalse` tag.
//!
//! ```rust
//! use bytes::BytesMut;
//! use rowpack::record::{read_records, Field, RecordSchema, RecordWriter, Value};
//! use rowpack::Kind;
//!
//! let schema = RecordSchema::new(vec![
//!     Field::new("kind", Kind::Int32),
//!     Field::new("id", Kind::Int64),
//!     Field::nullable("label", Kind::String),
//! ]);
//! let mut writer = BytesMut::new();
//! let mut rows = RecordWriter::new(&schema, &mut writer);
//! rows.write_row(&[Value::Int32(1), Value::Int64(42), Value::Null]).unwrap();
//! rows.finish().unwrap();
//!
//! let mut reader = writer.freeze();
//! let decoded = read_records(&mut reader, &schema).unwrap();
//! assert_eq!(decoded.len(), 1);
//! ```

use bytes::{BufMut, Bytes, BytesMut};
use uuid::Uuid;

use crate::core::encode_str_utf16;
use crate::tag::{Kind, TAG_NULL};
use crate::ticks::{DateTime, TimeSpan};
use crate::{read_tag, CodecError, Decode, Encode, Result};

/// A dynamically typed wire value, one variant per kind plus `Null`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Char(char),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    Guid(Uuid),
    DateTime(DateTime),
    TimeSpan(TimeSpan),
    String(String),
}

impl Value {
    /// The value's kind, or `None` for `Null`.
    pub fn kind(&self) -> Option<Kind> {
        match self {
            Value::Null => None,
            Value::Boolean(_) => Some(Kind::Boolean),
            Value::Char(_) => Some(Kind::Char),
            Value::Int8(_) => Some(Kind::Int8),
            Value::Int16(_) => Some(Kind::Int16),
            Value::Int32(_) => Some(Kind::Int32),
            Value::Int64(_) => Some(Kind::Int64),
            Value::UInt8(_) => Some(Kind::UInt8),
            Value::UInt16(_) => Some(Kind::UInt16),
            Value::UInt32(_) => Some(Kind::UInt32),
            Value::UInt64(_) => Some(Kind::UInt64),
            Value::Float32(_) => Some(Kind::Float32),
            Value::Float64(_) => Some(Kind::Float64),
            Value::Guid(_) => Some(Kind::Guid),
            Value::DateTime(_) => Some(Kind::DateTime),
            Value::TimeSpan(_) => Some(Kind::TimeSpan),
            Value::String(_) => Some(Kind::String),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

macro_rules! value_from {
    ($($source:ty => $variant:ident;)+) => {
        $(impl From<$source> for Value {
            fn from(value: $source) -> Self {
                Value::$variant(value)
            }
        })+
    };
}

value_from! {
    bool => Boolean;
    char => Char;
    i8 => Int8;
    i16 => Int16;
    i32 => Int32;
    i64 => Int64;
    u8 => UInt8;
    u16 => UInt16;
    u32 => UInt32;
    u64 => UInt64;
    f32 => Float32;
    f64 => Float64;
    Uuid => Guid;
    DateTime => DateTime;
    TimeSpan => TimeSpan;
    String => String;
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

/// One column of a record: name (diagnostics only), kind, nullability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    kind: Kind,
    nullable: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, kind: Kind) -> Self {
        Field {
            name: name.into(),
            kind,
            nullable: false,
        }
    }

    pub fn nullable(name: impl Into<String>, kind: Kind) -> Self {
        Field {
            name: name.into(),
            kind,
            nullable: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }
}

/// An ordered field table. Field order is the wire order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSchema {
    fields: Vec<Field>,
}

impl RecordSchema {
    pub fn new(fields: Vec<Field>) -> Self {
        RecordSchema { fields }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Encodes one dynamic value against its field definition.
///
/// `Null` on a non-nullable field fails before anything is written, as does
/// a value of the wrong kind.
pub fn encode_field(writer: &mut BytesMut, field: &Field, value: &Value) -> Result<()> {
    let actual = match value.kind() {
        None => {
            if !field.nullable {
                return Err(CodecError::NullNotAllowed {
                    field: field.name.clone(),
                });
            }
            writer.put_u8(TAG_NULL);
            return Ok(());
        }
        Some(kind) => kind,
    };
    if actual != field.kind {
        return Err(CodecError::KindMismatch {
            field: field.name.clone(),
            expected: field.kind,
            actual,
        });
    }
    match value {
        Value::Null => unreachable!("handled above"),
        Value::Boolean(v) => v.encode(writer),
        Value::Char(v) => v.encode(writer),
        Value::Int8(v) => v.encode(writer),
        Value::Int16(v) => v.encode(writer),
        Value::Int32(v) => v.encode(writer),
        Value::Int64(v) => v.encode(writer),
        Value::UInt8(v) => v.encode(writer),
        Value::UInt16(v) => v.encode(writer),
        Value::UInt32(v) => v.encode(writer),
        Value::UInt64(v) => v.encode(writer),
        Value::Float32(v) => v.encode(writer),
        Value::Float64(v) => v.encode(writer),
        Value::Guid(v) => v.encode(writer),
        Value::DateTime(v) => v.encode(writer),
        Value::TimeSpan(v) => v.encode(writer),
        Value::String(v) => v.encode(writer),
    }
}

/// Encodes a string field with the UTF-16LE carrier instead of UTF-8.
/// All other kinds behave exactly like [`encode_field`].
pub fn encode_field_utf16(writer: &mut BytesMut, field: &Field, value: &Value) -> Result<()> {
    match value {
        Value::String(v) if field.kind == Kind::String => encode_str_utf16(writer, v),
        _ => encode_field(writer, field, value),
    }
}

/// Decodes one dynamic value against its field definition. The `Null` tag is
/// only legal for nullable fields.
pub fn decode_field(reader: &mut Bytes, field: &Field) -> Result<Value> {
    let tag = read_tag(reader)?;
    if tag == TAG_NULL {
        if !field.nullable {
            return Err(CodecError::UnexpectedTag {
                tag,
                expected: field.kind,
            });
        }
        return Ok(Value::Null);
    }
    match field.kind {
        Kind::Boolean => Ok(Value::Boolean(bool::decode_tagged(tag, reader)?)),
        Kind::Char => Ok(Value::Char(char::decode_tagged(tag, reader)?)),
        Kind::Int8 => Ok(Value::Int8(i8::decode_tagged(tag, reader)?)),
        Kind::Int16 => Ok(Value::Int16(i16::decode_tagged(tag, reader)?)),
        Kind::Int32 => Ok(Value::Int32(i32::decode_tagged(tag, reader)?)),
        Kind::Int64 => Ok(Value::Int64(i64::decode_tagged(tag, reader)?)),
        Kind::UInt8 => Ok(Value::UInt8(u8::decode_tagged(tag, reader)?)),
        Kind::UInt16 => Ok(Value::UInt16(u16::decode_tagged(tag, reader)?)),
        Kind::UInt32 => Ok(Value::UInt32(u32::decode_tagged(tag, reader)?)),
        Kind::UInt64 => Ok(Value::UInt64(u64::decode_tagged(tag, reader)?)),
        Kind::Float32 => Ok(Value::Float32(f32::decode_tagged(tag, reader)?)),
        Kind::Float64 => Ok(Value::Float64(f64::decode_tagged(tag, reader)?)),
        Kind::Guid => Ok(Value::Guid(Uuid::decode_tagged(tag, reader)?)),
        Kind::DateTime => Ok(Value::DateTime(DateTime::decode_tagged(tag, reader)?)),
        Kind::TimeSpan => Ok(Value::TimeSpan(TimeSpan::decode_tagged(tag, reader)?)),
        Kind::String => Ok(Value::String(String::decode_tagged(tag, reader)?)),
    }
}

/// Streams rows against a schema with boolean framing.
///
/// Each `write_row` emits a `BooleanTrue` tag and the row's fields in schema
/// order; `finish` emits the single `BooleanFalse` terminator. Dropping the
/// writer without `finish` leaves the stream unterminated.
pub struct RecordWriter<'a> {
    schema: &'a RecordSchema,
    writer: &'a mut BytesMut,
}

impl<'a> RecordWriter<'a> {
    pub fn new(schema: &'a RecordSchema, writer: &'a mut BytesMut) -> Self {
        RecordWriter { schema, writer }
    }

    pub fn write_row(&mut self, row: &[Value]) -> Result<()> {
        if row.len() != self.schema.len() {
            return Err(CodecError::FieldCountMismatch {
                expected: self.schema.len(),
                actual: row.len(),
            });
        }
        true.encode(self.writer)?;
        for (field, value) in self.schema.fields().iter().zip(row) {
            encode_field(self.writer, field, value)?;
        }
        Ok(())
    }

    pub fn finish(self) -> Result<()> {
        false.encode(self.writer)
    }
}

/// Reads a boolean-framed row stream against a schema.
pub struct RecordReader<'a> {
    schema: &'a RecordSchema,
    reader: &'a mut Bytes,
    done: bool,
}

impl<'a> RecordReader<'a> {
    pub fn new(schema: &'a RecordSchema, reader: &'a mut Bytes) -> Self {
        RecordReader {
            schema,
            reader,
            done: false,
        }
    }

    /// Returns the next row, or `None` once the `BooleanFalse` terminator
    /// has been read. A stream that ends without the terminator is
    /// `TruncatedStream`.
    pub fn next_row(&mut self) -> Result<Option<Vec<Value>>> {
        if self.done {
            return Ok(None);
        }
        if !bool::decode(self.reader)? {
            self.done = true;
            return Ok(None);
        }
        let mut row = Vec::with_capacity(self.schema.len());
        for field in self.schema.fields() {
            row.push(decode_field(self.reader, field)?);
        }
        Ok(Some(row))
    }
}

/// Writes every row and the terminator in one call.
pub fn write_records(
    writer: &mut BytesMut,
    schema: &RecordSchema,
    rows: &[Vec<Value>],
) -> Result<()> {
    let mut record_writer = RecordWriter::new(schema, writer);
    for row in rows {
        record_writer.write_row(row)?;
    }
    record_writer.finish()
}

/// Reads rows until the terminator.
pub fn read_records(reader: &mut Bytes, schema: &RecordSchema) -> Result<Vec<Vec<Value>>> {
    let mut record_reader = RecordReader::new(schema, reader);
    let mut rows = Vec::new();
    while let Some(row) = record_reader.next_row()? {
        rows.push(row);
    }
    Ok(rows)
}
