//! TraceLog: append-only per-agent event log with fan-out to sinks.

use std::sync::Arc;

use super::sink::TraceSink;
use super::types::{TraceEvent, TraceKind};

/// Append-only event log owned by one agent instance.
///
/// Every recorded event is kept locally and forwarded to each registered sink.
/// A sink that panics does not stop the others from receiving the event.
#[derive(Default)]
pub struct TraceLog {
    events: Vec<TraceEvent>,
    sinks: Vec<Arc<dyn TraceSink>>,
}

impl TraceLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sink(sink: Arc<dyn TraceSink>) -> Self {
        let mut log = Self::new();
        log.register(sink);
        log
    }

    pub fn register(&mut self, sink: Arc<dyn TraceSink>) {
        self.sinks.push(sink);
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Record an event stamped now.
    pub fn record(&mut self, kind: TraceKind, data: serde_json::Value) {
        let event = TraceEvent::now(kind, data);
        for sink in &self.sinks {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                sink.emit(&event);
            }));
            if result.is_err() {
                tracing::warn!(event = "trace_sink_panicked", kind = kind.as_str(), "trace sink panicked");
            }
        }
        self.events.push(event);
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Events of one kind, in order.
    pub fn of_kind(&self, kind: TraceKind) -> impl Iterator<Item = &TraceEvent> {
        self.events.iter().filter(move |e| e.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
