/// Document loading errors. An empty or missing collection is not an error.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("failed to read document {path}: {message}")]
    Io { path: String, message: String },
}

impl super::QuarryErrorCode for RetrievalError {
    fn error_code(&self) -> &'static str {
        super::error_code::RETRIEVAL_ERROR
    }
}
