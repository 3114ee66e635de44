//! Domain event messages for the shopstream demo.
//!
//! Each message is a plain struct implementing [`EventMessage`], which pairs
//! hand-written per-field hooks with proto3 wire-format encode/decode drivers.
//! The field numbers documented on each struct are the wire contract; they
//! must not be renumbered.
//!
//! # Dependency Direction
//!
//! This crate sits at the bottom of the workspace: it depends on nothing but
//! the protobuf runtime, and every other crate depends on it.

pub mod browsing;
pub mod dlq;
pub mod email;
mod error;
mod message;
pub mod shopping;
pub mod validate;
pub mod wire;

pub use browsing::{ProductListFiltered, ProductListViewed, ProductsSearched};
pub use dlq::DlqRecord;
pub use email::{EmailUpdated, UserEmail};
pub use error::{DecodeError, EncodeError};
pub use message::EventMessage;
pub use shopping::{Cart, CheckoutStarted, LineItem, OrderCompleted, Product};
pub use validate::{validate_cart, CartInvalid};

/// A byte sequence that no message type can decode: the leading null byte
/// reads as field number 0, which is never a valid field tag.
pub const INVALID_PAYLOAD: &[u8] = b"\x00foobar";

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invalid_payload_fails<M: EventMessage>() {
        let err = M::decode(INVALID_PAYLOAD).unwrap_err();
        assert!(
            matches!(err, DecodeError::ZeroFieldNumber { type_name } if type_name == M::TYPE_NAME),
            "expected ZeroFieldNumber for {}, got: {err}",
            M::TYPE_NAME,
        );
    }

    #[test]
    fn test_invalid_payload_fails_for_every_message_type() {
        assert_invalid_payload_fails::<Product>();
        assert_invalid_payload_fails::<LineItem>();
        assert_invalid_payload_fails::<Cart>();
        assert_invalid_payload_fails::<CheckoutStarted>();
        assert_invalid_payload_fails::<OrderCompleted>();
        assert_invalid_payload_fails::<ProductsSearched>();
        assert_invalid_payload_fails::<ProductListViewed>();
        assert_invalid_payload_fails::<ProductListFiltered>();
        assert_invalid_payload_fails::<EmailUpdated>();
        assert_invalid_payload_fails::<UserEmail>();
        assert_invalid_payload_fails::<DlqRecord>();
    }
}
