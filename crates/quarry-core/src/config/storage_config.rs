//! Structured store discovery.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::defaults;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Explicit database path. Skips candidate discovery when set.
    pub db_path: Option<String>,
    /// Candidate paths checked in order. Default: the Northwind locations under `data/`.
    pub candidates: Vec<String>,
}

impl StorageConfig {
    /// Paths to try, relative paths resolved against `root`.
    pub fn effective_candidates(&self, root: &Path) -> Vec<PathBuf> {
        if let Some(ref path) = self.db_path {
            return vec![resolve(root, path)];
        }
        if self.candidates.is_empty() {
            defaults::DEFAULT_DB_CANDIDATES
                .iter()
                .map(|c| resolve(root, c))
                .collect()
        } else {
            self.candidates.iter().map(|c| resolve(root, c)).collect()
        }
    }
}

fn resolve(root: &Path, path: &str) -> PathBuf {
    let p = Path::new(path);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        root.join(p)
    }
}
