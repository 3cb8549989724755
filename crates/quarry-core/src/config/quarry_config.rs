//! Top-level Quarry configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::defaults::PROJECT_CONFIG_FILENAME;
use super::{RepairConfig, RetrievalConfig, RouterConfig, StorageConfig, SynthesisConfig};
use crate::constants::MAX_REPAIR_ATTEMPTS;
use crate::errors::ConfigError;

/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`QUARRY_*`)
/// 3. Project config (`quarry.toml` in the working root)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct QuarryConfig {
    pub storage: StorageConfig,
    pub retrieval: RetrievalConfig,
    pub router: RouterConfig,
    pub repair: RepairConfig,
    pub synthesis: SynthesisConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub db_path: Option<PathBuf>,
    pub docs_dir: Option<PathBuf>,
    pub top_k: Option<usize>,
    pub max_attempts: Option<u32>,
    pub training_file: Option<PathBuf>,
}

impl QuarryConfig {
    /// Load configuration for the given working root.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join(PROJECT_CONFIG_FILENAME);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    pub fn validate(config: &QuarryConfig) -> Result<(), ConfigError> {
        if let Some(attempts) = config.repair.max_attempts {
            if attempts == 0 || attempts > MAX_REPAIR_ATTEMPTS {
                return Err(ConfigError::ValidationFailed {
                    field: "repair.max_attempts".to_string(),
                    message: format!("must be between 1 and {MAX_REPAIR_ATTEMPTS}"),
                });
            }
        }
        if let Some(0) = config.retrieval.top_k {
            return Err(ConfigError::ValidationFailed {
                field: "retrieval.top_k".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(fraction) = config.synthesis.cost_fraction {
            if !(0.0..1.0).contains(&fraction) {
                return Err(ConfigError::ValidationFailed {
                    field: "synthesis.cost_fraction".to_string(),
                    message: "must be in [0.0, 1.0)".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config. Unknown keys are ignored.
    fn merge_toml_file(config: &mut QuarryConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: QuarryConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins only where it has a value.
    fn merge(base: &mut QuarryConfig, other: &QuarryConfig) {
        if other.storage.db_path.is_some() {
            base.storage.db_path = other.storage.db_path.clone();
        }
        if !other.storage.candidates.is_empty() {
            base.storage.candidates = other.storage.candidates.clone();
        }

        if other.retrieval.docs_dir.is_some() {
            base.retrieval.docs_dir = other.retrieval.docs_dir.clone();
        }
        if other.retrieval.top_k.is_some() {
            base.retrieval.top_k = other.retrieval.top_k;
        }

        if other.router.training_file.is_some() {
            base.router.training_file = other.router.training_file.clone();
        }

        if other.repair.max_attempts.is_some() {
            base.repair.max_attempts = other.repair.max_attempts;
        }

        if other.synthesis.cost_fraction.is_some() {
            base.synthesis.cost_fraction = other.synthesis.cost_fraction;
        }
    }

    /// Pattern: `QUARRY_DB_PATH`, `QUARRY_DOCS_DIR`, `QUARRY_TOP_K`, `QUARRY_MAX_ATTEMPTS`,
    /// `QUARRY_TRAINING_FILE`, `QUARRY_COST_FRACTION`.
    fn apply_env_overrides(config: &mut QuarryConfig) {
        if let Ok(val) = std::env::var("QUARRY_DB_PATH") {
            config.storage.db_path = Some(val);
        }
        if let Ok(val) = std::env::var("QUARRY_DOCS_DIR") {
            config.retrieval.docs_dir = Some(val);
        }
        if let Ok(val) = std::env::var("QUARRY_TOP_K") {
            if let Ok(v) = val.parse::<usize>() {
                config.retrieval.top_k = Some(v);
            }
        }
        if let Ok(val) = std::env::var("QUARRY_MAX_ATTEMPTS") {
            if let Ok(v) = val.parse::<u32>() {
                config.repair.max_attempts = Some(v);
            }
        }
        if let Ok(val) = std::env::var("QUARRY_TRAINING_FILE") {
            config.router.training_file = Some(val);
        }
        if let Ok(val) = std::env::var("QUARRY_COST_FRACTION") {
            if let Ok(v) = val.parse::<f64>() {
                config.synthesis.cost_fraction = Some(v);
            }
        }
    }

    fn apply_cli_overrides(config: &mut QuarryConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.db_path {
            config.storage.db_path = Some(v.display().to_string());
        }
        if let Some(ref v) = cli.docs_dir {
            config.retrieval.docs_dir = Some(v.display().to_string());
        }
        if let Some(v) = cli.top_k {
            config.retrieval.top_k = Some(v);
        }
        if let Some(v) = cli.max_attempts {
            config.repair.max_attempts = Some(v);
        }
        if let Some(ref v) = cli.training_file {
            config.router.training_file = Some(v.display().to_string());
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
