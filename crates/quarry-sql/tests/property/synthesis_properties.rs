//! Property tests: synthesis is a pure function of its inputs.

use proptest::prelude::*;

use quarry_sql::{normalize_question, plan, repair_query, QuerySynthesizer};

const WORDS: [&str; 14] = [
    "top", "3", "products", "revenue", "average", "order", "value", "winter", "summer",
    "beverages", "best", "customer", "margin", "1997",
];

fn question() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS.to_vec()), 0..10).prop_map(|w| w.join(" "))
}

proptest! {
    #[test]
    fn prop_synthesis_is_deterministic(q in question()) {
        let synth = QuerySynthesizer::default();
        let p = plan(&q);
        prop_assert_eq!(plan(&q), p.clone());
        prop_assert_eq!(synth.synthesize(&q, &p), synth.synthesize(&q, &p));
    }

    #[test]
    fn prop_query_present_iff_shape_matched(q in question()) {
        let synth = QuerySynthesizer::default();
        let p = plan(&q);
        let query = synth.synthesize(&q, &p);
        prop_assert_eq!(query.is_empty(), synth.matched_shape(&q, &p).is_none());
    }

    #[test]
    fn prop_normalized_alphabet(q in ".{0,64}") {
        let n = normalize_question(&q);
        prop_assert!(n.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == ' '));
    }

    #[test]
    fn prop_empty_base_never_repaired(attempt in 0u32..10) {
        prop_assert_eq!(repair_query("", attempt, &["Orders".to_string()]), "");
    }
}
