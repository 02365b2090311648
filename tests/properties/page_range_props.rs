use proptest::prelude::*;

use skillsmith::pdf::parse_page_range;

fn token() -> impl Strategy<Value = String> {
    prop_oneof![
        (0usize..40).prop_map(|page| page.to_string()),
        (0usize..40, 0usize..40).prop_map(|(a, b)| format!("{}-{}", a.min(b), a.max(b))),
    ]
}

proptest! {
    // =========================================================================
    // Resolution Properties
    // =========================================================================

    #[test]
    fn test_indices_in_bounds_and_strictly_ascending(
        tokens in prop::collection::vec(token(), 1..8),
        total in 0usize..30,
    ) {
        let spec = tokens.join(",");
        let pages = parse_page_range(&spec, total).unwrap();
        prop_assert!(pages.iter().all(|&page| page < total));
        prop_assert!(pages.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_all_selects_every_page(total in 0usize..200) {
        let pages = parse_page_range("all", total).unwrap();
        prop_assert_eq!(pages, (0..total).collect::<Vec<_>>());
    }

    #[test]
    fn test_token_order_does_not_matter(
        tokens in prop::collection::vec(token(), 1..8),
        total in 0usize..30,
    ) {
        let forward = parse_page_range(&tokens.join(","), total).unwrap();
        let mut reversed = tokens.clone();
        reversed.reverse();
        let backward = parse_page_range(&reversed.join(","), total).unwrap();
        prop_assert_eq!(forward, backward);
    }

    // =========================================================================
    // Parser Safety
    // =========================================================================

    #[test]
    fn test_parse_never_panics(input in ".*", total in 0usize..50) {
        let _ = parse_page_range(&input, total);
    }
}
