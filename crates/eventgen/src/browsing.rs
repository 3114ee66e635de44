//! Browsing events: searches, list views, list filters.

use crate::catalog::catalog;
use crate::id::new_id;
use event_types::{ProductListFiltered, ProductListViewed, ProductsSearched};
use rand::Rng;

const QUERIES: &[&str] = &[
    "desk lamp",
    "walnut organizer",
    "ergonomic mouse",
    "notebook",
    "monitor stand",
    "usb-c cable",
    "desk mat",
    "coasters",
];

const LIST_IDS: &[&str] = &["featured", "new-arrivals", "desk-setup", "under-20", "gifts"];

const FILTERS: &[&str] = &[
    "price<2000",
    "price<5000",
    "material=wood",
    "material=steel",
    "color=natural",
    "in-stock",
];

fn random_product_ids<R: Rng>(rng: &mut R, max: usize) -> Vec<String> {
    let products = catalog();
    let count = rng.gen_range(0..=max.min(products.len()));
    let mut ids: Vec<String> = products.iter().map(|p| p.product_id.clone()).collect();
    // Partial Fisher-Yates: the first `count` entries end up shuffled.
    for i in 0..count {
        let j = rng.gen_range(i..ids.len());
        ids.swap(i, j);
    }
    ids.truncate(count);
    ids
}

/// A catalog search with its result ids.
pub fn products_searched<R: Rng>(rng: &mut R) -> ProductsSearched {
    ProductsSearched {
        search_id: new_id(rng),
        query: QUERIES[rng.gen_range(0..QUERIES.len())].to_string(),
        result_product_ids: random_product_ids(rng, 6),
    }
}

/// A view of one of the curated product lists.
pub fn product_list_viewed<R: Rng>(rng: &mut R) -> ProductListViewed {
    let mut product_ids = random_product_ids(rng, 8);
    if product_ids.is_empty() {
        // A viewed list always shows something.
        product_ids = random_product_ids(rng, 1);
        if product_ids.is_empty() {
            product_ids.push(catalog()[0].product_id.clone());
        }
    }
    ProductListViewed {
        view_id: new_id(rng),
        list_id: LIST_IDS[rng.gen_range(0..LIST_IDS.len())].to_string(),
        product_ids,
    }
}

/// A filter applied to a product list.
pub fn product_list_filtered<R: Rng>(rng: &mut R) -> ProductListFiltered {
    let filter_count = rng.gen_range(1..=3);
    let mut filters = Vec::with_capacity(filter_count);
    for _ in 0..filter_count {
        let filter = FILTERS[rng.gen_range(0..FILTERS.len())].to_string();
        if !filters.contains(&filter) {
            filters.push(filter);
        }
    }
    ProductListFiltered {
        filter_id: new_id(rng),
        filters,
        product_ids: random_product_ids(rng, 8),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_products_searched_well_formed() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let event = products_searched(&mut rng);
            assert!(!event.search_id.is_empty());
            assert!(!event.query.is_empty());
            for id in &event.result_product_ids {
                assert!(id.starts_with("p-"));
            }
        }
    }

    #[test]
    fn test_product_ids_unique_within_event() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let event = product_list_viewed(&mut rng);
            let mut ids = event.product_ids.clone();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), event.product_ids.len());
            assert!(!event.product_ids.is_empty());
        }
    }

    #[test]
    fn test_list_filtered_has_filters() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let event = product_list_filtered(&mut rng);
            assert!(!event.filter_id.is_empty());
            assert!(!event.filters.is_empty());
            assert!(event.filters.len() <= 3);
        }
    }
}
