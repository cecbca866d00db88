#![expect(
    clippy::float_arithmetic,
    reason = "properties compare floating point scores"
)]

//! Property-based coverage for the set-similarity primitives.

use std::collections::BTreeSet;

use proptest::prelude::*;
use shelfwise_core::similarity::{genre_overlap, jaccard, normalize_genres};

const TOLERANCE: f32 = 1e-6;

fn label_lists() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[ A-Za-z]{0,12}", 0..8)
}

proptest! {
    #[test]
    fn overlap_is_symmetric(a in label_lists(), b in label_lists()) {
        let forward = genre_overlap(&a, &b);
        let backward = genre_overlap(&b, &a);
        prop_assert!((forward - backward).abs() <= TOLERANCE);
    }

    #[test]
    fn overlap_stays_in_unit_range(a in label_lists(), b in label_lists()) {
        let score = genre_overlap(&a, &b);
        prop_assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn overlap_ignores_casing(a in label_lists(), b in label_lists()) {
        let shouted: Vec<String> = b.iter().map(|label| label.to_uppercase()).collect();
        let plain = genre_overlap(&a, &b);
        let cased = genre_overlap(&a, &shouted);
        prop_assert!((plain - cased).abs() <= TOLERANCE);
    }

    #[test]
    fn identical_non_empty_sets_score_one(a in label_lists()) {
        let normalized = normalize_genres(&a);
        prop_assume!(!normalized.is_empty());
        let score = genre_overlap(&a, &a);
        prop_assert!((score - 1.0).abs() <= TOLERANCE);
    }

    #[test]
    fn disjoint_sets_score_zero(size_a in 0usize..6, size_b in 0usize..6) {
        let a: BTreeSet<String> = (0..size_a).map(|i| format!("left{i}")).collect();
        let b: BTreeSet<String> = (0..size_b).map(|i| format!("right{i}")).collect();
        prop_assert!(jaccard(&a, &b).abs() <= TOLERANCE);
    }

    #[test]
    fn normalization_is_idempotent(a in label_lists()) {
        let once = normalize_genres(&a);
        let twice = normalize_genres(once.iter());
        prop_assert_eq!(once, twice);
    }
}
