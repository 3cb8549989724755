//! Stable error codes for the CLI and batch output.

/// Every Quarry error enum maps to a short, stable code string.
pub trait QuarryErrorCode {
    /// Returns the error code (e.g. "CONFIG_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns `[ERROR_CODE] message`.
    fn display_code(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const DB_NOT_FOUND: &str = "DB_NOT_FOUND";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const RETRIEVAL_ERROR: &str = "RETRIEVAL_ERROR";
pub const UNSUPPORTED_FORMAT: &str = "UNSUPPORTED_FORMAT";
pub const JOB_ERROR: &str = "JOB_ERROR";
pub const IO_ERROR: &str = "IO_ERROR";
