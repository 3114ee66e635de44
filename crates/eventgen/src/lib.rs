//! Synthetic e-commerce event generators.
//!
//! Every generator takes an `&mut impl Rng` so callers control determinism.
//! Production callers pass a thread RNG, tests pass a seeded [`rand::rngs::StdRng`].

pub mod browsing;
pub mod cart;
pub mod catalog;
pub mod email;
pub mod funnel;
pub mod id;

pub use browsing::{product_list_filtered, product_list_viewed, products_searched};
pub use cart::{cart, invalid_cart, valid_cart};
pub use catalog::{catalog, random_product};
pub use email::{email_address, email_updated, semantically_invalid_email_updated};
pub use funnel::{cart_total_cents, checkout_started, order_completed};
pub use id::new_id;
