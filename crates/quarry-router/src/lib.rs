//! # quarry-router
//!
//! Decides per question whether to answer from documents, from the store, or both.
//! Untrained routers use a keyword rule; trained routers use a TF-IDF softmax classifier.

pub mod classifier;
pub mod examples;
pub mod optimizer;
pub mod router;

pub use classifier::SoftmaxClassifier;
pub use examples::{load_examples, LabeledExample};
pub use optimizer::{demo_dataset, evaluate_router, OptimizerReport};
pub use router::Router;
