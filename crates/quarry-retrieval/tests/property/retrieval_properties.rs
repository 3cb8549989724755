//! Property tests: result bounds, ordering and stability.

use proptest::prelude::*;

use quarry_core::traits::DocumentRetriever;
use quarry_core::types::DocumentChunk;
use quarry_retrieval::{DocumentIndex, TfIdfRetriever};

const WORDS: [&str; 8] = [
    "beverages", "seafood", "return", "policy", "summer", "winter", "margin", "revenue",
];

fn word_text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS.to_vec()), 0..8).prop_map(|w| w.join(" "))
}

proptest! {
    #[test]
    fn prop_retrieve_bounded_positive_sorted(
        docs in prop::collection::vec(word_text(), 0..6),
        query in word_text(),
        k in 0usize..5,
    ) {
        let chunks = docs
            .iter()
            .enumerate()
            .map(|(i, d)| DocumentChunk::whole(format!("doc{i}"), d.clone()))
            .collect();
        let retriever = TfIdfRetriever::new(DocumentIndex::build(chunks));

        let results = retriever.retrieve(&query, k);
        prop_assert!(results.len() <= k);
        for r in &results {
            prop_assert!(r.score > 0.0);
        }
        for pair in results.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }

        let again = retriever.retrieve(&query, k);
        prop_assert_eq!(results, again);
    }
}
