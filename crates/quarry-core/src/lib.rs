//! # quarry-core
//!
//! Foundation crate for the Quarry hybrid question-answering agent.
//! Defines the shared data model, domain constants, configuration, errors,
//! trace events and tracing setup. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod tracing;
pub mod traits;
pub mod types;

pub use config::QuarryConfig;
pub use errors::{QuarryError, QuarryErrorCode, QuarryResult};
pub use events::{TraceEvent, TraceKind, TraceLog, TraceSink};
pub use traits::{DocumentRetriever, QueryExecutor};
pub use types::*;
