use serde::{Deserialize, Serialize};

use super::answer::{AnswerEnvelope, FinalAnswer};

/// One line of a batch input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub question: String,
    #[serde(default)]
    pub format_hint: String,
}

/// One line of a batch output file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub id: String,
    pub final_answer: FinalAnswer,
    pub query: String,
    pub confidence: f64,
    pub explanation: String,
    pub citations: Vec<String>,
}

impl OutputRecord {
    pub fn from_envelope(id: impl Into<String>, envelope: AnswerEnvelope) -> Self {
        Self {
            id: id.into(),
            final_answer: envelope.final_answer,
            query: envelope.query,
            confidence: envelope.confidence,
            explanation: envelope.explanation,
            citations: envelope.citations,
        }
    }
}
