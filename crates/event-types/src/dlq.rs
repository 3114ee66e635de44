//! Dead-letter queue record, as written by the broker when schema
//! validation rejects a produced record.

use crate::error::DecodeError;
use crate::message::EventMessage;
use crate::wire::{self, WIRE_TYPE_LEN, WIRE_TYPE_VARINT};
use protobuf::{CodedInputStream, CodedOutputStream};

/// A record the broker dead-lettered, wrapping the original key/value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DlqRecord {
    /// Topic the rejected record was produced to.
    pub topic: String,
    pub partition: i32,
    pub offset: i64,
    /// Original record key.
    pub key: Vec<u8>,
    /// Original record value, opaque until re-decoded as the topic's type.
    pub value: Vec<u8>,
    /// Broker-supplied rejection reason.
    pub reason: String,
}

impl EventMessage for DlqRecord {
    const TYPE_NAME: &'static str = "DlqRecord";

    fn write_fields(&self, stream: &mut CodedOutputStream<'_>) -> protobuf::Result<()> {
        if !self.topic.is_empty() {
            stream.write_string(1, &self.topic)?;
        }
        if self.partition != 0 {
            stream.write_int32(2, self.partition)?;
        }
        if self.offset != 0 {
            stream.write_int64(3, self.offset)?;
        }
        if !self.key.is_empty() {
            stream.write_bytes(4, &self.key)?;
        }
        if !self.value.is_empty() {
            stream.write_bytes(5, &self.value)?;
        }
        if !self.reason.is_empty() {
            stream.write_string(6, &self.reason)?;
        }
        Ok(())
    }

    fn merge_field(
        &mut self,
        number: u32,
        wire_type: u32,
        stream: &mut CodedInputStream<'_>,
    ) -> Result<(), DecodeError> {
        match number {
            1 => {
                wire::check_wire_type(Self::TYPE_NAME, number, wire_type, WIRE_TYPE_LEN)?;
                self.topic = wire::read_string(Self::TYPE_NAME, stream)?;
            }
            2 => {
                wire::check_wire_type(Self::TYPE_NAME, number, wire_type, WIRE_TYPE_VARINT)?;
                self.partition = wire::read_int32(Self::TYPE_NAME, stream)?;
            }
            3 => {
                wire::check_wire_type(Self::TYPE_NAME, number, wire_type, WIRE_TYPE_VARINT)?;
                self.offset = wire::read_int64(Self::TYPE_NAME, stream)?;
            }
            4 => {
                wire::check_wire_type(Self::TYPE_NAME, number, wire_type, WIRE_TYPE_LEN)?;
                self.key = wire::read_bytes(Self::TYPE_NAME, stream)?;
            }
            5 => {
                wire::check_wire_type(Self::TYPE_NAME, number, wire_type, WIRE_TYPE_LEN)?;
                self.value = wire::read_bytes(Self::TYPE_NAME, stream)?;
            }
            6 => {
                wire::check_wire_type(Self::TYPE_NAME, number, wire_type, WIRE_TYPE_LEN)?;
                self.reason = wire::read_string(Self::TYPE_NAME, stream)?;
            }
            _ => {
                return Err(DecodeError::UnknownField {
                    type_name: Self::TYPE_NAME,
                    number,
                })
            }
        }
        Ok(())
    }
}
