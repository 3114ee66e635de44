//! Shopping-cart and checkout-funnel messages.

use crate::error::DecodeError;
use crate::message::EventMessage;
use crate::wire::{self, WIRE_TYPE_LEN, WIRE_TYPE_VARINT};
use protobuf::{CodedInputStream, CodedOutputStream};

/// A catalog product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Product {
    pub product_id: String,
    pub name: String,
    pub unit_price_cents: u64,
}

impl EventMessage for Product {
    const TYPE_NAME: &'static str = "Product";

    fn write_fields(&self, stream: &mut CodedOutputStream<'_>) -> protobuf::Result<()> {
        if !self.product_id.is_empty() {
            stream.write_string(1, &self.product_id)?;
        }
        if !self.name.is_empty() {
            stream.write_string(2, &self.name)?;
        }
        if self.unit_price_cents != 0 {
            stream.write_uint64(3, self.unit_price_cents)?;
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
                self.product_id = wire::read_string(Self::TYPE_NAME, stream)?;
            }
            2 => {
                wire::check_wire_type(Self::TYPE_NAME, number, wire_type, WIRE_TYPE_LEN)?;
                self.name = wire::read_string(Self::TYPE_NAME, stream)?;
            }
            3 => {
                wire::check_wire_type(Self::TYPE_NAME, number, wire_type, WIRE_TYPE_VARINT)?;
                self.unit_price_cents = wire::read_uint64(Self::TYPE_NAME, stream)?;
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

/// One line of a cart: a product and how many of it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineItem {
    pub line_item_id: String,
    pub product: Option<Product>,
    pub quantity: u64,
    pub unit_price_cents: u64,
}

impl EventMessage for LineItem {
    const TYPE_NAME: &'static str = "LineItem";

    fn write_fields(&self, stream: &mut CodedOutputStream<'_>) -> protobuf::Result<()> {
        if !self.line_item_id.is_empty() {
            stream.write_string(1, &self.line_item_id)?;
        }
        if let Some(product) = &self.product {
            wire::write_nested(stream, 2, product)?;
        }
        if self.quantity != 0 {
            stream.write_uint64(3, self.quantity)?;
        }
        if self.unit_price_cents != 0 {
            stream.write_uint64(4, self.unit_price_cents)?;
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
                self.line_item_id = wire::read_string(Self::TYPE_NAME, stream)?;
            }
            2 => {
                wire::check_wire_type(Self::TYPE_NAME, number, wire_type, WIRE_TYPE_LEN)?;
                self.product = Some(wire::read_nested(Self::TYPE_NAME, stream)?);
            }
            3 => {
                wire::check_wire_type(Self::TYPE_NAME, number, wire_type, WIRE_TYPE_VARINT)?;
                self.quantity = wire::read_uint64(Self::TYPE_NAME, stream)?;
            }
            4 => {
                wire::check_wire_type(Self::TYPE_NAME, number, wire_type, WIRE_TYPE_VARINT)?;
                self.unit_price_cents = wire::read_uint64(Self::TYPE_NAME, stream)?;
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

/// A shopping cart, the main produced message of the demo.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    pub cart_id: String,
    pub line_items: Vec<LineItem>,
}

impl EventMessage for Cart {
    const TYPE_NAME: &'static str = "Cart";

    fn write_fields(&self, stream: &mut CodedOutputStream<'_>) -> protobuf::Result<()> {
        if !self.cart_id.is_empty() {
            stream.write_string(1, &self.cart_id)?;
        }
        for line_item in &self.line_items {
            wire::write_nested(stream, 2, line_item)?;
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
                self.cart_id = wire::read_string(Self::TYPE_NAME, stream)?;
            }
            2 => {
                wire::check_wire_type(Self::TYPE_NAME, number, wire_type, WIRE_TYPE_LEN)?;
                self.line_items
                    .push(wire::read_nested(Self::TYPE_NAME, stream)?);
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

/// A checkout was started from a cart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckoutStarted {
    pub checkout_id: String,
    pub cart_id: String,
    pub total_cents: u64,
}

impl EventMessage for CheckoutStarted {
    const TYPE_NAME: &'static str = "CheckoutStarted";

    fn write_fields(&self, stream: &mut CodedOutputStream<'_>) -> protobuf::Result<()> {
        if !self.checkout_id.is_empty() {
            stream.write_string(1, &self.checkout_id)?;
        }
        if !self.cart_id.is_empty() {
            stream.write_string(2, &self.cart_id)?;
        }
        if self.total_cents != 0 {
            stream.write_uint64(3, self.total_cents)?;
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
                self.checkout_id = wire::read_string(Self::TYPE_NAME, stream)?;
            }
            2 => {
                wire::check_wire_type(Self::TYPE_NAME, number, wire_type, WIRE_TYPE_LEN)?;
                self.cart_id = wire::read_string(Self::TYPE_NAME, stream)?;
            }
            3 => {
                wire::check_wire_type(Self::TYPE_NAME, number, wire_type, WIRE_TYPE_VARINT)?;
                self.total_cents = wire::read_uint64(Self::TYPE_NAME, stream)?;
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

/// A checkout completed into an order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderCompleted {
    pub order_id: String,
    pub checkout_id: String,
    pub total_cents: u64,
}

impl EventMessage for OrderCompleted {
    const TYPE_NAME: &'static str = "OrderCompleted";

    fn write_fields(&self, stream: &mut CodedOutputStream<'_>) -> protobuf::Result<()> {
        if !self.order_id.is_empty() {
            stream.write_string(1, &self.order_id)?;
        }
        if !self.checkout_id.is_empty() {
            stream.write_string(2, &self.checkout_id)?;
        }
        if self.total_cents != 0 {
            stream.write_uint64(3, self.total_cents)?;
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
                self.order_id = wire::read_string(Self::TYPE_NAME, stream)?;
            }
            2 => {
                wire::check_wire_type(Self::TYPE_NAME, number, wire_type, WIRE_TYPE_LEN)?;
                self.checkout_id = wire::read_string(Self::TYPE_NAME, stream)?;
            }
            3 => {
                wire::check_wire_type(Self::TYPE_NAME, number, wire_type, WIRE_TYPE_VARINT)?;
                self.total_cents = wire::read_uint64(Self::TYPE_NAME, stream)?;
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

    fn sample_cart() -> Cart {
        Cart {
            cart_id: "cart-1".to_string(),
            line_items: vec![
                LineItem {
                    line_item_id: "li-1".to_string(),
                    product: Some(Product {
                        product_id: "p-1".to_string(),
                        name: "Desk Lamp".to_string(),
                        unit_price_cents: 2499,
                    }),
                    quantity: 2,
                    unit_price_cents: 2499,
                },
                LineItem {
                    line_item_id: "li-2".to_string(),
                    product: Some(Product {
                        product_id: "p-2".to_string(),
                        name: "Notebook".to_string(),
                        unit_price_cents: 599,
                    }),
                    quantity: 1,
                    unit_price_cents: 599,
                },
            ],
        }
    }

    #[test]
    fn test_cart_round_trip() {
        let cart = sample_cart();
        let encoded = cart.encode().unwrap();
        let decoded = Cart::decode(&encoded).unwrap();
        assert_eq!(cart, decoded);
    }

    #[test]
    fn test_empty_cart_round_trip() {
        let cart = Cart::default();
        let encoded = cart.encode().unwrap();
        assert!(encoded.is_empty());
        let decoded = Cart::decode(&encoded).unwrap();
        assert_eq!(cart, decoded);
    }

    #[test]
    fn test_checkout_round_trip() {
        let checkout = CheckoutStarted {
            checkout_id: "co-1".to_string(),
            cart_id: "cart-1".to_string(),
            total_cents: 5597,
        };
        let decoded = CheckoutStarted::decode(&checkout.encode().unwrap()).unwrap();
        assert_eq!(checkout, decoded);
    }

    #[test]
    fn test_order_round_trip() {
        let order = OrderCompleted {
            order_id: "o-1".to_string(),
            checkout_id: "co-1".to_string(),
            total_cents: 5597,
        };
        let decoded = OrderCompleted::decode(&order.encode().unwrap()).unwrap();
        assert_eq!(order, decoded);
    }

    #[test]
    fn test_cart_rejects_unknown_field() {
        // Field number 7, wire type 0, value 1.
        let bytes = [0x38, 0x01];
        let err = Cart::decode(&bytes).unwrap_err();
        assert!(matches!(
            err,
            crate::DecodeError::UnknownField { number: 7, .. }
        ));
    }

    #[test]
    fn test_cart_rejects_truncated_payload() {
        let cart = sample_cart();
        let encoded = cart.encode().unwrap();
        let truncated = &encoded[..encoded.len() - 3];
        assert!(Cart::decode(truncated).is_err());
    }

    #[test]
    fn test_cart_rejects_wire_type_mismatch() {
        // cart_id declared length-delimited, sent as varint: tag (1 << 3) | 0.
        let bytes = [0x08, 0x01];
        let err = Cart::decode(&bytes).unwrap_err();
        assert!(matches!(
            err,
            crate::DecodeError::WireTypeMismatch {
                number: 1,
                wire_type: 0,
                ..
            }
        ));
    }
}
