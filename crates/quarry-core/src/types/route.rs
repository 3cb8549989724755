use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Where a question should be answered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// Answered purely from document text.
    #[serde(alias = "rag")]
    Document,
    /// Answered from the relational store.
    #[serde(alias = "sql")]
    Structured,
    /// Documents for citation plus a structured query attempt.
    #[serde(alias = "hybrid")]
    Mixed,
}

impl Route {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Structured => "structured",
            Self::Mixed => "mixed",
        }
    }

    /// Whether this route goes through the synthesize/execute loop.
    pub fn uses_store(&self) -> bool {
        !matches!(self, Self::Document)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "document" | "rag" => Ok(Self::Document),
            "structured" | "sql" => Ok(Self::Structured),
            "mixed" | "hybrid" => Ok(Self::Mixed),
            other => Err(format!("unknown route label: {other}")),
        }
    }
}

/// Router output. The score is always present and lies in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteDecision {
    pub route: Route,
    pub score: f64,
}

impl RouteDecision {
    pub fn new(route: Route, score: f64) -> Self {
        Self {
            route,
            score: score.clamp(0.0, 1.0),
        }
    }
}
