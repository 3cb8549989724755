//! Question-to-query synthesis over the shape table.

use quarry_core::config::SynthesisConfig;
use quarry_core::types::Plan;

use crate::shapes::{QueryShape, ShapeInput, SHAPES};

/// Lowercase the question and replace every character outside `[a-z0-9 ]`
/// with a space.
pub fn normalize_question(question: &str) -> String {
    question
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == ' ' {
                c
            } else {
                ' '
            }
        })
        .collect()
}

/// Deterministic, closed-world synthesizer.
#[derive(Debug, Clone)]
pub struct QuerySynthesizer {
    cost_fraction: f64,
}

impl QuerySynthesizer {
    pub fn new(config: &SynthesisConfig) -> Self {
        Self {
            cost_fraction: config.effective_cost_fraction(),
        }
    }

    pub fn cost_fraction(&self) -> f64 {
        self.cost_fraction
    }

    /// The first shape accepting the question, if any.
    pub fn matched_shape(&self, question: &str, plan: &Plan) -> Option<&'static QueryShape> {
        let normalized = normalize_question(question);
        let input = ShapeInput {
            normalized: &normalized,
            plan,
            cost_fraction: self.cost_fraction,
        };
        SHAPES.iter().find(|shape| (shape.matches)(&input))
    }

    /// Render the query for `question`. Empty when no shape matches.
    pub fn synthesize(&self, question: &str, plan: &Plan) -> String {
        let normalized = normalize_question(question);
        let input = ShapeInput {
            normalized: &normalized,
            plan,
            cost_fraction: self.cost_fraction,
        };
        match SHAPES.iter().find(|shape| (shape.matches)(&input)) {
            Some(shape) => {
                tracing::debug!(shape = shape.name, "query shape matched");
                (shape.render)(&input)
            }
            None => {
                tracing::debug!("no query shape matched");
                String::new()
            }
        }
    }
}

impl Default for QuerySynthesizer {
    fn default() -> Self {
        Self::new(&SynthesisConfig::default())
    }
}
