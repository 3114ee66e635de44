//! The `EventMessage` trait: one implementation per domain message.
//!
//! This is the codec's polymorphism point. A message type supplies its
//! `TYPE_NAME` plus per-field write/merge hooks, and gets the proto3
//! encode/decode drivers for free. Producers, consumers, and serdes are all
//! generic over `M: EventMessage`.

use crate::error::{DecodeError, EncodeError};
use crate::wire;
use protobuf::{CodedInputStream, CodedOutputStream};

pub trait EventMessage:
    Default + Clone + PartialEq + std::fmt::Debug + Send + Sync + 'static
{
    /// Message type name, used in error messages and log lines.
    const TYPE_NAME: &'static str;

    /// Write every non-default field as (tag, value) pairs.
    fn write_fields(&self, stream: &mut CodedOutputStream<'_>) -> protobuf::Result<()>;

    /// Merge one field into `self`. The tag has already been consumed.
    ///
    /// Implementations must reject unknown field numbers with
    /// [`DecodeError::UnknownField`] and mismatched wire types via
    /// [`wire::check_wire_type`].
    fn merge_field(
        &mut self,
        number: u32,
        wire_type: u32,
        stream: &mut CodedInputStream<'_>,
    ) -> Result<(), DecodeError>;

    /// Encode to proto3 wire format.
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut buffer = Vec::new();
        {
            let mut stream = CodedOutputStream::vec(&mut buffer);
            self.write_fields(&mut stream)
                .and_then(|()| stream.flush())
                .map_err(|e| EncodeError::Proto {
                    type_name: Self::TYPE_NAME,
                    message: e.to_string(),
                })?;
        }
        Ok(buffer)
    }

    /// Decode from proto3 wire format, starting from `Default::default()`.
    fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut message = Self::default();
        let mut stream = CodedInputStream::from_bytes(bytes);
        wire::merge_from_stream(&mut message, &mut stream)?;
        Ok(message)
    }
}
