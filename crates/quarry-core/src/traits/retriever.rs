use crate::types::ScoredChunk;

/// Top-k document lookup.
pub trait DocumentRetriever: Send + Sync {
    /// At most `k` chunks with score > 0, best first, ties in index order.
    fn retrieve(&self, query: &str, k: usize) -> Vec<ScoredChunk>;
}
