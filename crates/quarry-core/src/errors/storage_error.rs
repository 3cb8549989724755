//! Structured-store errors raised while opening or introspecting SQLite.
//!
//! Query failures never surface as this type; the executor folds them into
//! `QueryOutcome::error` so the repair loop can react.

use super::error_code::{self, QuarryErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("failed to open {path}: {message}")]
    OpenFailed { path: String, message: String },
}

impl QuarryErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        error_code::STORAGE_ERROR
    }
}
