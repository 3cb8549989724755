//! Multinomial logistic regression over TF-IDF features.
//!
//! Full-batch gradient descent from zero weights with L2 regularization, so a
//! given training set always produces the same model.

use quarry_core::types::Route;
use quarry_retrieval::{SparseVector, TfIdfVectorizer};

use crate::examples::LabeledExample;

const EPOCHS: usize = 500;
const LEARNING_RATE: f64 = 1.0;
/// Regularization strength, scaled by 1/n like an inverse-C of 1.
const L2_STRENGTH: f64 = 1.0;

#[derive(Debug, Clone)]
pub struct SoftmaxClassifier {
    vectorizer: TfIdfVectorizer,
    classes: Vec<Route>,
    /// `classes.len()` rows of `vocabulary_size` weights.
    weights: Vec<Vec<f64>>,
    bias: Vec<f64>,
}

impl SoftmaxClassifier {
    /// Fit on the examples. Returns `None` for an empty training set.
    pub fn fit(examples: &[LabeledExample]) -> Option<Self> {
        if examples.is_empty() {
            return None;
        }

        let texts: Vec<&str> = examples.iter().map(|e| e.text.as_str()).collect();
        let (vectorizer, features) = TfIdfVectorizer::fit_transform(&texts);

        let mut classes: Vec<Route> = examples.iter().map(|e| e.label).collect();
        classes.sort();
        classes.dedup();

        let targets: Vec<usize> = examples
            .iter()
            .map(|e| classes.iter().position(|c| *c == e.label).unwrap_or(0))
            .collect();

        let dims = vectorizer.vocabulary_size();
        let mut model = Self {
            vectorizer,
            weights: vec![vec![0.0; dims]; classes.len()],
            bias: vec![0.0; classes.len()],
            classes,
        };
        model.descend(&features, &targets);
        Some(model)
    }

    fn descend(&mut self, features: &[SparseVector], targets: &[usize]) {
        let n = features.len() as f64;
        let lambda = L2_STRENGTH / n;
        let k = self.classes.len();

        for _ in 0..EPOCHS {
            let mut grad_w: Vec<Vec<f64>> = self
                .weights
                .iter()
                .map(|row| row.iter().map(|w| lambda * w).collect())
                .collect();
            let mut grad_b = vec![0.0; k];

            for (x, &target) in features.iter().zip(targets) {
                let probs = self.probabilities(x);
                for c in 0..k {
                    let err = probs[c] - if c == target { 1.0 } else { 0.0 };
                    grad_b[c] += err / n;
                    for &(j, v) in x.entries() {
                        grad_w[c][j] += err * v / n;
                    }
                }
            }

            for c in 0..k {
                self.bias[c] -= LEARNING_RATE * grad_b[c];
                for (w, g) in self.weights[c].iter_mut().zip(&grad_w[c]) {
                    *w -= LEARNING_RATE * g;
                }
            }
        }
    }

    fn probabilities(&self, x: &SparseVector) -> Vec<f64> {
        let logits: Vec<f64> = self
            .weights
            .iter()
            .zip(&self.bias)
            .map(|(row, b)| b + x.entries().iter().map(|&(j, v)| row[j] * v).sum::<f64>())
            .collect();
        let max = logits.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let exp: Vec<f64> = logits.iter().map(|l| (l - max).exp()).collect();
        let total: f64 = exp.iter().sum();
        exp.into_iter().map(|e| e / total).collect()
    }

    /// Class probabilities for `text`, aligned with `classes()`.
    pub fn predict_proba(&self, text: &str) -> Vec<f64> {
        self.probabilities(&self.vectorizer.transform(text))
    }

    /// Most probable class and its probability. Ties go to the first class.
    pub fn predict(&self, text: &str) -> (Route, f64) {
        let probs = self.predict_proba(text);
        let mut best = 0;
        for (i, p) in probs.iter().enumerate() {
            if *p > probs[best] {
                best = i;
            }
        }
        (self.classes[best], probs[best])
    }

    pub fn classes(&self) -> &[Route] {
        &self.classes
    }
}
