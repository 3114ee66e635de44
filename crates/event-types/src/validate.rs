//! Semantic validation for carts.
//!
//! The produce path never runs this. Detection of semantically invalid carts
//! belongs to the broker's validation layer; this module exists so the DLQ
//! consumer can explain why a dead-lettered cart was rejected.

use crate::shopping::Cart;
use thiserror::Error;

/// The first semantic violation found in a cart.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CartInvalid {
    #[error("cart has an empty cart_id")]
    EmptyCartId,

    #[error("line item at index {index} has an empty line_item_id")]
    EmptyLineItemId { index: usize },

    #[error("line item {line_item_id} has no product")]
    MissingProduct { line_item_id: String },

    #[error("line item {line_item_id} references a product with an empty product_id")]
    EmptyProductId { line_item_id: String },

    #[error("line item {line_item_id} has a zero quantity")]
    ZeroQuantity { line_item_id: String },

    #[error(
        "line item {line_item_id} price {line_price_cents} does not match \
         product price {product_price_cents}"
    )]
    PriceMismatch {
        line_item_id: String,
        line_price_cents: u64,
        product_price_cents: u64,
    },
}

/// Check a cart's semantic invariants, reporting the first violation.
pub fn validate_cart(cart: &Cart) -> Result<(), CartInvalid> {
    if cart.cart_id.is_empty() {
        return Err(CartInvalid::EmptyCartId);
    }
    for (index, line_item) in cart.line_items.iter().enumerate() {
        if line_item.line_item_id.is_empty() {
            return Err(CartInvalid::EmptyLineItemId { index });
        }
        let product = line_item
            .product
            .as_ref()
            .ok_or_else(|| CartInvalid::MissingProduct {
                line_item_id: line_item.line_item_id.clone(),
            })?;
        if product.product_id.is_empty() {
            return Err(CartInvalid::EmptyProductId {
                line_item_id: line_item.line_item_id.clone(),
            });
        }
        if line_item.quantity == 0 {
            return Err(CartInvalid::ZeroQuantity {
                line_item_id: line_item.line_item_id.clone(),
            });
        }
        if line_item.unit_price_cents != product.unit_price_cents {
            return Err(CartInvalid::PriceMismatch {
                line_item_id: line_item.line_item_id.clone(),
                line_price_cents: line_item.unit_price_cents,
                product_price_cents: product.unit_price_cents,
            });
        }
    }
    Ok(())
}
