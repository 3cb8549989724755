use serde::{Deserialize, Serialize};

/// One indexed document. Each source file becomes exactly one chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentChunk {
    /// `<source>::chunk<N>`.
    pub id: String,
    pub content: String,
    pub source: String,
}

impl DocumentChunk {
    /// Build the single chunk for a whole source document.
    pub fn whole(source: impl Into<String>, content: impl Into<String>) -> Self {
        let source = source.into();
        Self {
            id: format!("{source}::chunk0"),
            content: content.into(),
            source,
        }
    }
}

/// A retrieved chunk with its relevance score (always > 0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub chunk: DocumentChunk,
    pub score: f64,
}
