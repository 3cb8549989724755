use serde::{Deserialize, Serialize};

use crate::constants::MAX_EXPLANATION_CHARS;

/// One entry of a product/revenue list answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRevenue {
    pub product: String,
    pub revenue: f64,
}

/// The typed final answer. Its variant is chosen by the caller's format tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FinalAnswer {
    Int(i64),
    Float(f64),
    Text(String),
    CategoryQuantity { category: String, quantity: i64 },
    CustomerMargin { customer: String, margin: f64 },
    ProductRevenues(Vec<ProductRevenue>),
}

impl FinalAnswer {
    pub fn empty() -> Self {
        Self::Text(String::new())
    }

    pub fn is_empty_text(&self) -> bool {
        matches!(self, Self::Text(s) if s.is_empty())
    }
}

/// How an envelope came about. Not part of the output record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerOutcome {
    /// Built from rows or a matched document.
    Answered,
    /// Right shape, but nothing to fill it with.
    LowConfidence,
    /// Document miss or repair budget exhausted.
    Fallback,
    /// The caller asked for a shape the synthesizer does not know.
    UnsupportedFormat,
}

/// The unit returned to the caller for one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerEnvelope {
    pub final_answer: FinalAnswer,
    pub query: String,
    pub confidence: f64,
    pub explanation: String,
    pub citations: Vec<String>,
    #[serde(skip_serializing, default = "default_outcome")]
    pub outcome: AnswerOutcome,
}

fn default_outcome() -> AnswerOutcome {
    AnswerOutcome::Answered
}

impl AnswerEnvelope {
    pub fn new(
        final_answer: FinalAnswer,
        query: impl Into<String>,
        confidence: f64,
        explanation: &str,
        citations: Vec<String>,
        outcome: AnswerOutcome,
    ) -> Self {
        Self {
            final_answer,
            query: query.into(),
            confidence: confidence.clamp(0.0, 1.0),
            explanation: truncate_explanation(explanation),
            citations,
            outcome,
        }
    }
}

/// Cut an explanation to the maximum length on a char boundary.
pub fn truncate_explanation(text: &str) -> String {
    text.chars().take(MAX_EXPLANATION_CHARS).collect()
}
