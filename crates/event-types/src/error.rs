//! Errors produced by the wire codec.

use thiserror::Error;

/// Errors that can occur while encoding a message.
#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("failed to encode {type_name}: {message}")]
    Proto {
        type_name: &'static str,
        message: String,
    },
}

/// Errors that can occur while decoding a message.
///
/// Every variant carries the message type name so that a consumer routing
/// malformed payloads can say what the payload was expected to be.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The stream ended mid-field or a varint/length was corrupt.
    #[error("malformed {type_name} payload: {message}")]
    Malformed {
        type_name: &'static str,
        message: String,
    },

    /// Field number 0 is reserved and never appears in a valid encoding.
    /// A payload starting with a zero byte hits this immediately.
    #[error("invalid field number 0 in {type_name} payload")]
    ZeroFieldNumber { type_name: &'static str },

    #[error("unknown field number {number} in {type_name} payload")]
    UnknownField {
        type_name: &'static str,
        number: u32,
    },

    #[error("field {number} in {type_name} payload has unexpected wire type {wire_type}")]
    WireTypeMismatch {
        type_name: &'static str,
        number: u32,
        wire_type: u32,
    },
}
