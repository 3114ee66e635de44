//! Checkout-funnel events derived from carts.

use crate::id::new_id;
use event_types::{Cart, CheckoutStarted, OrderCompleted};
use rand::Rng;

/// Total of a cart in cents, quantity times line price.
pub fn cart_total_cents(cart: &Cart) -> u64 {
    cart.line_items
        .iter()
        .map(|item| item.quantity * item.unit_price_cents)
        .sum()
}

/// A checkout started from `cart`, total derived from its line items.
pub fn checkout_started<R: Rng>(rng: &mut R, cart: &Cart) -> CheckoutStarted {
    CheckoutStarted {
        checkout_id: new_id(rng),
        cart_id: cart.cart_id.clone(),
        total_cents: cart_total_cents(cart),
    }
}

/// An order completing `checkout`, carrying the same total.
pub fn order_completed<R: Rng>(rng: &mut R, checkout: &CheckoutStarted) -> OrderCompleted {
    OrderCompleted {
        order_id: new_id(rng),
        checkout_id: checkout.checkout_id.clone(),
        total_cents: checkout.total_cents,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::valid_cart;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_checkout_total_matches_cart() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let cart = valid_cart(&mut rng);
            let checkout = checkout_started(&mut rng, &cart);
            assert_eq!(checkout.cart_id, cart.cart_id);
            assert_eq!(checkout.total_cents, cart_total_cents(&cart));
            assert!(checkout.total_cents > 0);
            assert!(!checkout.checkout_id.is_empty());
        }
    }

    #[test]
    fn test_order_carries_checkout_total() {
        let mut rng = StdRng::seed_from_u64(42);
        let cart = valid_cart(&mut rng);
        let checkout = checkout_started(&mut rng, &cart);
        let order = order_completed(&mut rng, &checkout);
        assert_eq!(order.checkout_id, checkout.checkout_id);
        assert_eq!(order.total_cents, checkout.total_cents);
        assert!(!order.order_id.is_empty());
    }
}
