//! Immutable document index: chunks plus their TF-IDF vectors.

use std::path::Path;

use quarry_core::errors::RetrievalError;
use quarry_core::types::DocumentChunk;
use tracing::{debug, info};

use crate::vectorizer::{SparseVector, TfIdfVectorizer};

/// Built once; never updated afterwards.
#[derive(Debug, Clone, Default)]
pub struct DocumentIndex {
    chunks: Vec<DocumentChunk>,
    vectors: Vec<SparseVector>,
    vectorizer: Option<TfIdfVectorizer>,
}

impl DocumentIndex {
    /// Index chunks in the given order. That order breaks score ties.
    pub fn build(chunks: Vec<DocumentChunk>) -> Self {
        if chunks.is_empty() {
            return Self::default();
        }
        let texts: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();
        let (vectorizer, vectors) = TfIdfVectorizer::fit_transform(&texts);
        debug!(
            documents = chunks.len(),
            vocabulary = vectorizer.vocabulary_size(),
            "document index built"
        );
        Self {
            chunks,
            vectors,
            vectorizer: Some(vectorizer),
        }
    }

    /// Load every regular file of `dir` (sorted by name) as one chunk.
    ///
    /// A missing directory yields an empty index.
    pub fn from_dir(dir: &Path) -> Result<Self, RetrievalError> {
        if !dir.is_dir() {
            info!(path = %dir.display(), "document directory missing; index is empty");
            return Ok(Self::default());
        }

        let io_err = |path: &Path, e: std::io::Error| RetrievalError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        };

        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(|e| io_err(dir, e))? {
            let path = entry.map_err(|e| io_err(dir, e))?.path();
            if path.is_file() {
                paths.push(path);
            }
        }
        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        let mut chunks = Vec::with_capacity(paths.len());
        for path in paths {
            let content = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
            let source = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            chunks.push(DocumentChunk::whole(source, content.trim()));
        }

        info!(path = %dir.display(), documents = chunks.len(), "documents loaded");
        Ok(Self::build(chunks))
    }

    pub fn chunks(&self) -> &[DocumentChunk] {
        &self.chunks
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Cosine score of `query` against every chunk, in index order.
    pub fn scores(&self, query: &str) -> Vec<f64> {
        let Some(ref vectorizer) = self.vectorizer else {
            return Vec::new();
        };
        let q = vectorizer.transform(query);
        self.vectors.iter().map(|d| d.dot(&q)).collect()
    }
}
