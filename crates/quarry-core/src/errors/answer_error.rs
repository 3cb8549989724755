//! Answer shaping errors.

use super::error_code::{self, QuarryErrorCode};

/// Raised when the caller asks for an answer shape the synthesizer cannot build.
///
/// The orchestrator converts this into a degraded envelope rather than failing,
/// but keeps it distinguishable from a merely low-confidence answer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnswerError {
    #[error("unsupported format hint: {tag:?}")]
    UnsupportedFormat { tag: String },
}

impl QuarryErrorCode for AnswerError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedFormat { .. } => error_code::UNSUPPORTED_FORMAT,
        }
    }
}
