//! Before/after accuracy of the router on a labeled evaluation set.

use quarry_core::types::Route;
use serde::{Deserialize, Serialize};

use crate::examples::LabeledExample;
use crate::router::Router;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizerReport {
    pub acc_before: f64,
    pub acc_after: f64,
}

/// Score the keyword baseline, train on `train`, then score the trained router.
pub fn evaluate_router(train: &[LabeledExample], eval: &[LabeledExample]) -> OptimizerReport {
    let mut router = Router::new();
    let acc_before = accuracy(eval, |text| router.baseline_route(text).route);
    router.train(train);
    let acc_after = accuracy(eval, |text| router.predict(text).route);
    OptimizerReport {
        acc_before,
        acc_after,
    }
}

fn accuracy(eval: &[LabeledExample], predict: impl Fn(&str) -> Route) -> f64 {
    if eval.is_empty() {
        return 0.0;
    }
    let correct = eval.iter().filter(|e| predict(&e.text) == e.label).count();
    correct as f64 / eval.len() as f64
}

/// Small handcrafted (train, eval) sets for the `optimize` command.
pub fn demo_dataset() -> (Vec<LabeledExample>, Vec<LabeledExample>) {
    let train = vec![
        LabeledExample::new("policy unopened beverages return window", Route::Document),
        LabeledExample::new("Top 3 products by revenue", Route::Structured),
        LabeledExample::new("Revenue for Beverages in June 1997", Route::Mixed),
        LabeledExample::new("Average Order Value winter 1997", Route::Mixed),
        LabeledExample::new("return policy dairy", Route::Document),
    ];
    let eval = vec![
        LabeledExample::new("unopened Beverages returns how many days", Route::Document),
        LabeledExample::new("best customers by margin 1997", Route::Structured),
        LabeledExample::new("total revenue Beverages Jun 1997", Route::Mixed),
    ];
    (train, eval)
}
