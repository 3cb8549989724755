//! # quarry-retrieval
//!
//! Document side of the agent: a TF-IDF vectorizer shared with the router's
//! classifier, an immutable document index built once from a directory, and
//! the top-k retriever the orchestrator uses for policy answers and citations.

pub mod index;
pub mod retriever;
pub mod tokenizer;
pub mod vectorizer;

pub use index::DocumentIndex;
pub use retriever::TfIdfRetriever;
pub use vectorizer::{SparseVector, TfIdfVectorizer};
