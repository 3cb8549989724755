use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants::MAX_REPAIR_ATTEMPTS;

/// Repair loop settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RepairConfig {
    /// Synthesize/execute attempts per question, initial attempt included. Default: 3.
    pub max_attempts: Option<u32>,
}

impl RepairConfig {
    /// Attempt budget, never above `MAX_REPAIR_ATTEMPTS` and never below 1.
    pub fn effective_max_attempts(&self) -> u32 {
        self.max_attempts
            .unwrap_or(defaults::DEFAULT_MAX_ATTEMPTS)
            .clamp(1, MAX_REPAIR_ATTEMPTS)
    }
}
