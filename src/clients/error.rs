#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("File too large: {size_bytes} bytes")]
    FileTooLarge { size_bytes: u64 },
    #[error("File not found: {0}")]
    FileNotFound(String),
    #[error("API error: {0}")]
    ApiError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
