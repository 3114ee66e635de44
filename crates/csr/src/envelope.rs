//! Confluent wire-format envelope.
//!
//! Layout: magic byte `0x00`, 4-byte big-endian schema id, a zigzag-varint
//! message-index list, then the raw encoded message. The index list `[0]`
//! (first top-level message in the schema) is written in its single-byte
//! shorthand form, a lone `0x00`.

use crate::{Error, Result};

/// Leading byte of every enveloped payload.
pub const MAGIC_BYTE: u8 = 0x00;

/// Wrap an encoded message in a registry envelope for `schema_id`.
pub fn frame(schema_id: u32, payload: &[u8]) -> Vec<u8> {
    let mut framed = Vec::with_capacity(payload.len() + 6);
    framed.push(MAGIC_BYTE);
    framed.extend_from_slice(&schema_id.to_be_bytes());
    // Message-index list [0], single-byte shorthand.
    framed.push(0x00);
    framed.extend_from_slice(payload);
    framed
}

/// Strip a registry envelope, returning the schema id and the payload.
pub fn unframe(bytes: &[u8]) -> Result<(u32, &[u8])> {
    if bytes.len() < 6 {
        return Err(Error::TruncatedEnvelope);
    }
    if bytes[0] != MAGIC_BYTE {
        return Err(Error::BadMagic { got: bytes[0] });
    }
    let schema_id = u32::from_be_bytes([bytes[1], bytes[2], bytes[3], bytes[4]]);

    let (count, mut rest) = read_zigzag_varint(&bytes[5..])?;
    if count < 0 {
        return Err(Error::BadMessageIndexes);
    }
    // count == 0 is the [0] shorthand; otherwise skip `count` indexes.
    for _ in 0..count {
        let (_, remaining) = read_zigzag_varint(rest)?;
        rest = remaining;
    }
    Ok((schema_id, rest))
}

fn read_zigzag_varint(bytes: &[u8]) -> Result<(i64, &[u8])> {
    let mut value: u64 = 0;
    let mut shift = 0u32;
    for (i, byte) in bytes.iter().enumerate() {
        if shift >= 64 {
            return Err(Error::BadMessageIndexes);
        }
        value |= u64::from(byte & 0x7f) << shift;
        if byte & 0x80 == 0 {
            let decoded = ((value >> 1) as i64) ^ -((value & 1) as i64);
            return Ok((decoded, &bytes[i + 1..]));
        }
        shift += 7;
    }
    Err(Error::TruncatedEnvelope)
}
