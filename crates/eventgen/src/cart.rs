//! Cart generation, including the deliberate semantic defect.

use crate::catalog::{catalog_len, random_product};
use crate::id::new_id;
use event_types::{Cart, LineItem};
use rand::Rng;
use std::collections::HashSet;

/// 1..=10 line items over unique products, quantity 1..=5, prices taken
/// from the product.
pub fn random_line_items<R: Rng>(rng: &mut R) -> Vec<LineItem> {
    let max_items = catalog_len().min(10);
    let num_items = rng.gen_range(1..=max_items);

    let mut used_product_ids = HashSet::new();
    let mut line_items = Vec::with_capacity(num_items);
    while line_items.len() < num_items {
        let product = random_product(rng);
        if !used_product_ids.insert(product.product_id.clone()) {
            continue;
        }
        let unit_price_cents = product.unit_price_cents;
        line_items.push(LineItem {
            line_item_id: new_id(rng),
            product: Some(product),
            quantity: rng.gen_range(1..=5),
            unit_price_cents,
        });
    }
    line_items
}

/// A cart that satisfies every semantic invariant.
pub fn valid_cart<R: Rng>(rng: &mut R) -> Cart {
    Cart {
        cart_id: new_id(rng),
        line_items: random_line_items(rng),
    }
}

/// A cart with one randomly chosen line item's quantity forced to zero,
/// which downstream validation is expected to reject.
pub fn invalid_cart<R: Rng>(rng: &mut R) -> Cart {
    let mut line_items = random_line_items(rng);
    let invalid_index = rng.gen_range(0..line_items.len());
    line_items[invalid_index].quantity = 0;
    Cart {
        cart_id: new_id(rng),
        line_items,
    }
}

/// The production mix: about 1% of generated carts are semantically invalid.
pub fn cart<R: Rng>(rng: &mut R) -> Cart {
    if rng.gen_range(0..100) < 1 {
        invalid_cart(rng)
    } else {
        valid_cart(rng)
    }
}
