//! # quarry-agent
//!
//! Orchestration for the hybrid question-answering pipeline: the agent that
//! routes, retrieves, plans and runs the bounded repair loop, the answer
//! synthesizer that shapes rows into typed answers, and the sequential batch
//! runner over JSONL job files.

pub mod agent;
pub mod answer;
pub mod batch;

pub use agent::HybridAgent;
pub use answer::{citations, AnswerSynthesizer, FormatTag};
pub use batch::{run_batch, run_batch_files, BatchReport};
