//! Pure list derivation rules
//!
//! Search and page slicing are pure over the cached list so the store
//! can recompute views without touching the network.

use crate::domain::product::Product;

/// Case-insensitive substring match on the product name. An empty term
/// matches everything; input order is preserved.
pub fn filter_by_name(products: &[Product], term: &str) -> Vec<Product> {
    let needle = term.to_lowercase();
    products
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// First `page_size` items of the filtered list. Changing the page size
/// always re-slices from the start; there is no forward/backward cursor.
pub fn first_page(products: &[Product], page_size: usize) -> Vec<Product> {
    products.iter().take(page_size).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn product(id: &str, name: &str) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            logo: String::new(),
            date_release: "2023-01-01".to_string(),
            date_revision: "2024-01-01".to_string(),
        }
    }

    fn sample() -> Vec<Product> {
        vec![
            product("vis", "Visa Gold"),
            product("mst", "Mastercard Black"),
            product("vis2", "Visa Platinum"),
        ]
    }

    #[test]
    fn empty_term_returns_all_in_order() {
        let all = sample();
        let filtered = filter_by_name(&all, "");
        assert_eq!(filtered, all);
    }

    #[test]
    fn match_is_case_insensitive() {
        let filtered = filter_by_name(&sample(), "VISA");
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].id, "vis");
        assert_eq!(filtered[1].id, "vis2");
    }

    #[test]
    fn no_match_yields_empty_list() {
        assert!(filter_by_name(&sample(), "xyz").is_empty());
    }

    #[test]
    fn first_page_slices_from_the_start() {
        let all = sample();
        let page = first_page(&all, 2);
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].id, "vis");
        let everything = first_page(&all, 10);
        assert_eq!(everything.len(), 3);
    }

    proptest! {
        #[test]
        fn filtered_is_an_ordered_subset(names in proptest::collection::vec("[a-zA-Z ]{0,12}", 0..20), term in "[a-zA-Z]{0,4}") {
            let all: Vec<Product> = names
                .iter()
                .enumerate()
                .map(|(i, name)| product(&format!("p{i}"), name))
                .collect();
            let filtered = filter_by_name(&all, &term);

            // every match appears in the original order
            let mut cursor = 0;
            for item in &filtered {
                let pos = all[cursor..].iter().position(|p| p.id == item.id);
                prop_assert!(pos.is_some());
                cursor += pos.unwrap() + 1;
            }
            // filtering is idempotent
            prop_assert_eq!(filter_by_name(&filtered, &term), filtered.clone());
        }

        #[test]
        fn page_never_exceeds_requested_size(count in 0usize..30, size in 0usize..15) {
            let all: Vec<Product> = (0..count)
                .map(|i| product(&format!("p{i}"), &format!("Product {i}")))
                .collect();
            let page = first_page(&all, size);
            prop_assert_eq!(page.len(), size.min(count));
            prop_assert_eq!(&all[..page.len()], &page[..]);
        }
    }
}
