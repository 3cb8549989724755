//! Trace events for the answering pipeline.
//! Injected sinks with synchronous dispatch; an empty sink list costs nothing.

pub mod sink;
pub mod trace_log;
pub mod types;

pub use sink::{MemorySink, NoopSink, TraceSink, TracingSink};
pub use trace_log::TraceLog;
pub use types::{TraceEvent, TraceKind};
