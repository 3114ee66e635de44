//! Proto3 wire-format helpers shared by all message implementations.
//!
//! Encoding follows proto3 wire format:
//! - Each field is encoded as (tag, value) pairs
//! - Tag = (field_number << 3) | wire_type
//! - Wire types: 0=varint, 1=64-bit, 2=length-delimited, 5=32-bit
//!
//! Scalar fields at their proto3 default are skipped on encode; decode starts
//! from `Default::default()` so skipped fields come back as defaults.

use crate::error::DecodeError;
use crate::message::EventMessage;
use protobuf::{CodedInputStream, CodedOutputStream};

/// Wire type 0: varint-encoded scalars (uint64, int32, int64, bool).
pub const WIRE_TYPE_VARINT: u32 = 0;
/// Wire type 2: length-delimited (string, bytes, nested message).
pub const WIRE_TYPE_LEN: u32 = 2;

pub(crate) fn malformed(type_name: &'static str, err: protobuf::Error) -> DecodeError {
    DecodeError::Malformed {
        type_name,
        message: err.to_string(),
    }
}

/// Reject a field whose wire type does not match its declared type.
pub fn check_wire_type(
    type_name: &'static str,
    number: u32,
    got: u32,
    want: u32,
) -> Result<(), DecodeError> {
    if got != want {
        return Err(DecodeError::WireTypeMismatch {
            type_name,
            number,
            wire_type: got,
        });
    }
    Ok(())
}

/// Drive a full decode: read (tag, value) pairs until the stream (or the
/// enclosing length limit) is exhausted, dispatching each field to
/// `merge_field`. Field number 0 is never valid.
pub(crate) fn merge_from_stream<M: EventMessage>(
    message: &mut M,
    stream: &mut CodedInputStream<'_>,
) -> Result<(), DecodeError> {
    loop {
        if stream.eof().map_err(|e| malformed(M::TYPE_NAME, e))? {
            return Ok(());
        }
        let tag = stream
            .read_raw_varint32()
            .map_err(|e| malformed(M::TYPE_NAME, e))?;
        let number = tag >> 3;
        let wire_type = tag & 0x7;
        if number == 0 {
            return Err(DecodeError::ZeroFieldNumber {
                type_name: M::TYPE_NAME,
            });
        }
        message.merge_field(number, wire_type, stream)?;
    }
}

pub fn read_string(
    type_name: &'static str,
    stream: &mut CodedInputStream<'_>,
) -> Result<String, DecodeError> {
    stream.read_string().map_err(|e| malformed(type_name, e))
}

pub fn read_bytes(
    type_name: &'static str,
    stream: &mut CodedInputStream<'_>,
) -> Result<Vec<u8>, DecodeError> {
    stream.read_bytes().map_err(|e| malformed(type_name, e))
}

pub fn read_uint64(
    type_name: &'static str,
    stream: &mut CodedInputStream<'_>,
) -> Result<u64, DecodeError> {
    stream.read_uint64().map_err(|e| malformed(type_name, e))
}

pub fn read_int32(
    type_name: &'static str,
    stream: &mut CodedInputStream<'_>,
) -> Result<i32, DecodeError> {
    stream.read_int32().map_err(|e| malformed(type_name, e))
}

pub fn read_int64(
    type_name: &'static str,
    stream: &mut CodedInputStream<'_>,
) -> Result<i64, DecodeError> {
    stream.read_int64().map_err(|e| malformed(type_name, e))
}

pub fn read_bool(
    type_name: &'static str,
    stream: &mut CodedInputStream<'_>,
) -> Result<bool, DecodeError> {
    stream.read_bool().map_err(|e| malformed(type_name, e))
}

/// Read a length-delimited nested message.
///
/// Length and limit errors are attributed to the enclosing message;
/// field-level errors inside the nested message carry its own type name.
pub fn read_nested<N: EventMessage>(
    outer_type_name: &'static str,
    stream: &mut CodedInputStream<'_>,
) -> Result<N, DecodeError> {
    let len = stream
        .read_raw_varint64()
        .map_err(|e| malformed(outer_type_name, e))?;
    let old_limit = stream
        .push_limit(len)
        .map_err(|e| malformed(outer_type_name, e))?;
    let mut nested = N::default();
    merge_from_stream(&mut nested, stream)?;
    stream.pop_limit(old_limit);
    Ok(nested)
}

/// Write a nested message as a length-delimited field.
pub fn write_nested<N: EventMessage>(
    stream: &mut CodedOutputStream<'_>,
    number: u32,
    message: &N,
) -> protobuf::Result<()> {
    let mut nested = Vec::new();
    {
        let mut nested_stream = CodedOutputStream::vec(&mut nested);
        message.write_fields(&mut nested_stream)?;
        nested_stream.flush()?;
    }
    stream.write_bytes(number, &nested)
}
