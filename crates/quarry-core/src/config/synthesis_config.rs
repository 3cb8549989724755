use serde::{Deserialize, Serialize};

use crate::constants::COST_FRACTION;

/// Query template parameters.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Share of unit price treated as cost in margin formulas. Default: 0.7.
    pub cost_fraction: Option<f64>,
}

impl SynthesisConfig {
    pub fn effective_cost_fraction(&self) -> f64 {
        self.cost_fraction.unwrap_or(COST_FRACTION)
    }
}
