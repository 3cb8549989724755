//! Batch job I/O errors.

use super::error_code::{self, QuarryErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error("invalid job on line {line}: {message}")]
    InvalidJob { line: usize, message: String },

    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    #[error("answering failed: {message}")]
    Panicked { message: String },
}

impl QuarryErrorCode for JobError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => error_code::IO_ERROR,
            _ => error_code::JOB_ERROR,
        }
    }
}
