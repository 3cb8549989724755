//! Trace event payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pipeline step that produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceKind {
    Router,
    Retriever,
    Planner,
    Synthesizer,
    Executor,
    RepairAttempt,
    Answer,
}

impl TraceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Router => "router",
            Self::Retriever => "retriever",
            Self::Planner => "planner",
            Self::Synthesizer => "synthesizer",
            Self::Executor => "executor",
            Self::RepairAttempt => "repair_attempt",
            Self::Answer => "answer",
        }
    }
}

/// One entry of the trace log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEvent {
    pub timestamp: DateTime<Utc>,
    pub kind: TraceKind,
    pub data: serde_json::Value,
}

impl TraceEvent {
    /// Create an event stamped with the current time.
    pub fn now(kind: TraceKind, data: serde_json::Value) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
            data,
        }
    }
}
