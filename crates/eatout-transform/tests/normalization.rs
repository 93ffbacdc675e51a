//! Property tests for header normalization.

use eatout_transform::{normalize_header, normalize_headers};
use proptest::prelude::*;

proptest! {
    #[test]
    fn normalizing_twice_changes_nothing(raw in "[A-Za-z0-9 _-]{0,32}") {
        let once = normalize_header(&raw);
        prop_assert_eq!(normalize_header(&once), once);
    }

    #[test]
    fn normalizing_twice_changes_nothing_beyond_ascii(raw in "[A-Za-z0-9 _İıßÀàÉéÇçŞşΣσςǅÆæ\u{1F130}-]{0,32}") {
        let once = normalize_header(&raw);
        prop_assert_eq!(normalize_header(&once), once);
    }

    #[test]
    fn normalized_names_are_snake_case(raw in "[A-Za-z0-9 ()_-]{1,32}") {
        let name = normalize_header(&raw);
        prop_assert!(name.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
        prop_assert!(!name.starts_with('_') && !name.ends_with('_'));
        prop_assert!(!name.contains("__"));
    }

    #[test]
    fn canonical_header_sets_are_fixed_points(
        words in proptest::collection::btree_set("[a-z][a-z0-9]{0,6}(_[a-z][a-z0-9]{0,6}){0,2}", 1..8)
    ) {
        let headers: Vec<String> = words.into_iter().collect();
        prop_assert_eq!(normalize_headers(&headers).unwrap(), headers);
    }
}
