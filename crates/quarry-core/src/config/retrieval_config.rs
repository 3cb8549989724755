use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::defaults;

/// Document collection settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Directory of whole-text documents. Default: `docs`.
    pub docs_dir: Option<String>,
    /// Documents retrieved per question. Default: 3.
    pub top_k: Option<usize>,
}

impl RetrievalConfig {
    pub fn effective_docs_dir(&self, root: &Path) -> PathBuf {
        let dir = self.docs_dir.as_deref().unwrap_or(defaults::DEFAULT_DOCS_DIR);
        let p = Path::new(dir);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            root.join(p)
        }
    }

    pub fn effective_top_k(&self) -> usize {
        self.top_k.unwrap_or(defaults::DEFAULT_TOP_K)
    }
}
