//! Router: keyword baseline until trained, classifier afterwards.

use quarry_core::constants::{BASELINE_ROUTE_SCORE, MIN_TRAINING_EXAMPLES};
use quarry_core::types::{Route, RouteDecision};
use tracing::{debug, info};

use crate::classifier::SoftmaxClassifier;
use crate::examples::LabeledExample;

/// Phrases that mark a policy-style question.
const DOCUMENT_PHRASES: [&str; 2] = ["return window", "policy"];

#[derive(Debug, Clone, Default)]
pub struct Router {
    classifier: Option<SoftmaxClassifier>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keyword rule: policy phrasing goes to documents, everything else is mixed.
    pub fn baseline_route(&self, text: &str) -> RouteDecision {
        let lower = text.to_lowercase();
        let route = if DOCUMENT_PHRASES.iter().any(|p| lower.contains(p)) {
            Route::Document
        } else {
            Route::Mixed
        };
        RouteDecision::new(route, BASELINE_ROUTE_SCORE)
    }

    /// Fit the classifier, replacing any previous fit.
    ///
    /// Fewer than `MIN_TRAINING_EXAMPLES` examples is a no-op. Returns whether
    /// a model was fitted.
    pub fn train(&mut self, examples: &[LabeledExample]) -> bool {
        if examples.len() < MIN_TRAINING_EXAMPLES {
            debug!(examples = examples.len(), "too few examples; router stays untrained");
            return false;
        }
        self.classifier = SoftmaxClassifier::fit(examples);
        info!(
            event = "router_trained",
            examples = examples.len(),
            classes = self.classifier.as_ref().map(|c| c.classes().len()).unwrap_or(0),
            "router trained"
        );
        self.classifier.is_some()
    }

    pub fn is_trained(&self) -> bool {
        self.classifier.is_some()
    }

    pub fn predict(&self, text: &str) -> RouteDecision {
        match self.classifier {
            Some(ref model) => {
                let (route, score) = model.predict(text);
                RouteDecision::new(route, score)
            }
            None => self.baseline_route(text),
        }
    }
}
