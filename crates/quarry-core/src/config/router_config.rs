use serde::{Deserialize, Serialize};

/// Router settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// JSONL file of `{text, label}` examples. When set, the router trains at startup.
    pub training_file: Option<String>,
}
