use crate::clients::TranscriptionError;
use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Transcription(#[from] TranscriptionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
