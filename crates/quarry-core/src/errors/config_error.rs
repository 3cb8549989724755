//! Configuration errors. These are the only faults allowed to stop the process.

use super::error_code::{self, QuarryErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Config parse error in {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Config validation failed for {field}: {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Structured store not found; tried: {}", tried.join(", "))]
    DatabaseNotFound { tried: Vec<String> },
}

impl QuarryErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::DatabaseNotFound { .. } => error_code::DB_NOT_FOUND,
            _ => error_code::CONFIG_ERROR,
        }
    }
}
