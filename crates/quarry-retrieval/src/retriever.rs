//! Top-k TF-IDF retriever over a `DocumentIndex`.

use quarry_core::traits::DocumentRetriever;
use quarry_core::types::ScoredChunk;
use tracing::debug;

use crate::index::DocumentIndex;

pub struct TfIdfRetriever {
    index: DocumentIndex,
}

impl TfIdfRetriever {
    pub fn new(index: DocumentIndex) -> Self {
        Self { index }
    }
}

impl DocumentRetriever for TfIdfRetriever {
    fn retrieve(&self, query: &str, k: usize) -> Vec<ScoredChunk> {
        let scores = self.index.scores(query);
        let mut ranked: Vec<(usize, f64)> = scores.into_iter().enumerate().collect();
        // Stable sort keeps index order for equal scores.
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let results: Vec<ScoredChunk> = ranked
            .into_iter()
            .filter(|(_, score)| *score > 0.0)
            .take(k)
            .map(|(i, score)| ScoredChunk {
                chunk: self.index.chunks()[i].clone(),
                score,
            })
            .collect();

        debug!(query, k, returned = results.len(), "retrieval complete");
        results
    }
}
