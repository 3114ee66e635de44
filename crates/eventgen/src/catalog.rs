//! The fixed product catalog all generators draw from.

use event_types::Product;
use rand::Rng;

/// (product_id, name, unit_price_cents)
const CATALOG: &[(&str, &str, u64)] = &[
    ("p-1001", "Walnut Desk Organizer", 3499),
    ("p-1002", "Brushed Steel Desk Lamp", 2499),
    ("p-1003", "Dot-Grid Notebook", 599),
    ("p-1004", "Mechanical Pencil Set", 1299),
    ("p-1005", "Felt Laptop Sleeve 13\"", 1999),
    ("p-1006", "Ceramic Pour-Over Mug", 1499),
    ("p-1007", "Bamboo Monitor Stand", 4299),
    ("p-1008", "Wireless Ergonomic Mouse", 3899),
    ("p-1009", "Linen Wall Calendar", 899),
    ("p-1010", "Cork Coaster Set", 749),
    ("p-1011", "USB-C Cable 2m", 1099),
    ("p-1012", "Noise-Dampening Desk Mat", 2899),
];

/// The full catalog as products.
pub fn catalog() -> Vec<Product> {
    CATALOG
        .iter()
        .map(|(product_id, name, unit_price_cents)| Product {
            product_id: (*product_id).to_string(),
            name: (*name).to_string(),
            unit_price_cents: *unit_price_cents,
        })
        .collect()
}

/// Number of distinct products in the catalog.
pub fn catalog_len() -> usize {
    CATALOG.len()
}

/// A randomly selected product from the catalog.
pub fn random_product<R: Rng>(rng: &mut R) -> Product {
    let (product_id, name, unit_price_cents) = CATALOG[rng.gen_range(0..CATALOG.len())];
    Product {
        product_id: product_id.to_string(),
        name: name.to_string(),
        unit_price_cents,
    }
}
