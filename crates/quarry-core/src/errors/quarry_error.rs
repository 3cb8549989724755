//! Top-level error aggregating subsystem errors via `From` conversions.

use super::error_code::QuarryErrorCode;
use super::{AnswerError, ConfigError, JobError, RetrievalError, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum QuarryError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Retrieval error: {0}")]
    Retrieval(#[from] RetrievalError),

    #[error("Answer error: {0}")]
    Answer(#[from] AnswerError),

    #[error("Job error: {0}")]
    Job(#[from] JobError),
}

pub type QuarryResult<T> = Result<T, QuarryError>;

impl QuarryErrorCode for QuarryError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
            Self::Retrieval(e) => e.error_code(),
            Self::Answer(e) => e.error_code(),
            Self::Job(e) => e.error_code(),
        }
    }
}
