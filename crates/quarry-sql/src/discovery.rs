//! Structured store discovery.

use std::path::{Path, PathBuf};

use quarry_core::config::StorageConfig;
use quarry_core::errors::ConfigError;

/// First existing candidate from `config`, relative paths resolved against `root`.
pub fn locate_database(config: &StorageConfig, root: &Path) -> Result<PathBuf, ConfigError> {
    let candidates = config.effective_candidates(root);
    match candidates.iter().find(|p| p.is_file()) {
        Some(path) => {
            tracing::info!(path = %path.display(), "structured store located");
            Ok(path.clone())
        }
        None => Err(ConfigError::DatabaseNotFound {
            tried: candidates.iter().map(|p| p.display().to_string()).collect(),
        }),
    }
}
