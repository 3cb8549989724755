//! Labeled routing examples and their JSONL loader.

use std::path::Path;

use quarry_core::errors::ConfigError;
use quarry_core::types::Route;
use serde::{Deserialize, Serialize};

/// One `{text, label}` training example. Labels accept `rag`/`sql`/`hybrid`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledExample {
    pub text: String,
    pub label: Route,
}

impl LabeledExample {
    pub fn new(text: impl Into<String>, label: Route) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}

/// Read one example per non-blank line.
pub fn load_examples(path: &Path) -> Result<Vec<LabeledExample>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.display().to_string(),
    })?;

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line).map_err(|e| ConfigError::ParseError {
                path: format!("{}:{}", path.display(), i + 1),
                message: e.to_string(),
            })
        })
        .collect()
}
