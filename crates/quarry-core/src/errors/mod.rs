//! Error handling for Quarry.
//! One error enum per subsystem, `thiserror` only; `QuarryError` aggregates them.

pub mod answer_error;
pub mod config_error;
pub mod error_code;
pub mod job_error;
pub mod quarry_error;
pub mod retrieval_error;
pub mod storage_error;

pub use answer_error::AnswerError;
pub use config_error::ConfigError;
pub use error_code::QuarryErrorCode;
pub use job_error::JobError;
pub use quarry_error::{QuarryError, QuarryResult};
pub use retrieval_error::RetrievalError;
pub use storage_error::StorageError;
