//! Email messages for the verification demo.

use crate::error::DecodeError;
use crate::message::EventMessage;
use crate::wire::{self, WIRE_TYPE_LEN, WIRE_TYPE_VARINT};
use protobuf::{CodedInputStream, CodedOutputStream};

/// Change event emitted after a successful address update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmailUpdated {
    pub id: String,
    pub old_address: String,
    pub new_address: String,
}

impl EventMessage for EmailUpdated {
    const TYPE_NAME: &'static str = "EmailUpdated";

    fn write_fields(&self, stream: &mut CodedOutputStream<'_>) -> protobuf::Result<()> {
        if !self.id.is_empty() {
            stream.write_string(1, &self.id)?;
        }
        if !self.old_address.is_empty() {
            stream.write_string(2, &self.old_address)?;
        }
        if !self.new_address.is_empty() {
            stream.write_string(3, &self.new_address)?;
        }
        Ok(())
    }

    fn merge_field(
        &mut self,
        number: u32,
        wire_type: u32,
        stream: &mut CodedInputStream<'_>,
    ) -> Result<(), DecodeError> {
        wire::check_wire_type(Self::TYPE_NAME, number, wire_type, WIRE_TYPE_LEN)?;
        match number {
            1 => self.id = wire::read_string(Self::TYPE_NAME, stream)?,
            2 => self.old_address = wire::read_string(Self::TYPE_NAME, stream)?,
            3 => self.new_address = wire::read_string(Self::TYPE_NAME, stream)?,
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

/// A stored email entity: address plus verification state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserEmail {
    pub id: String,
    pub email_address: String,
    pub verified: bool,
}

impl EventMessage for UserEmail {
    const TYPE_NAME: &'static str = "UserEmail";

    fn write_fields(&self, stream: &mut CodedOutputStream<'_>) -> protobuf::Result<()> {
        if !self.id.is_empty() {
            stream.write_string(1, &self.id)?;
        }
        if !self.email_address.is_empty() {
            stream.write_string(2, &self.email_address)?;
        }
        if self.verified {
            stream.write_bool(3, self.verified)?;
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
                self.id = wire::read_string(Self::TYPE_NAME, stream)?;
            }
            2 => {
                wire::check_wire_type(Self::TYPE_NAME, number, wire_type, WIRE_TYPE_LEN)?;
                self.email_address = wire::read_string(Self::TYPE_NAME, stream)?;
            }
            3 => {
                wire::check_wire_type(Self::TYPE_NAME, number, wire_type, WIRE_TYPE_VARINT)?;
                self.verified = wire::read_bool(Self::TYPE_NAME, stream)?;
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_updated_round_trip() {
        let event = EmailUpdated {
            id: "u-1".to_string(),
            old_address: "a@example.com".to_string(),
            new_address: "b@example.com".to_string(),
        };
        let decoded = EmailUpdated::decode(&event.encode().unwrap()).unwrap();
        assert_eq!(event, decoded);
    }

    #[test]
    fn test_email_updated_empty_old_address() {
        // First update for an id carries no previous address.
        let event = EmailUpdated {
            id: "u-1".to_string(),
            old_address: String::new(),
            new_address: "b@example.com".to_string(),
        };
        let decoded = EmailUpdated::decode(&event.encode().unwrap()).unwrap();
        assert_eq!(event, decoded);
    }

    #[test]
    fn test_user_email_round_trip() {
        let entity = UserEmail {
            id: "u-1".to_string(),
            email_address: "a@example.com".to_string(),
            verified: true,
        };
        let decoded = UserEmail::decode(&entity.encode().unwrap()).unwrap();
        assert_eq!(entity, decoded);
    }
}
