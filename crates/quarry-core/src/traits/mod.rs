//! Seams between the orchestrator and its collaborators.

pub mod executor;
pub mod retriever;

pub use executor::QueryExecutor;
pub use retriever::DocumentRetriever;
