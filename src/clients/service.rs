use std::path::Path;

use async_trait::async_trait;

use super::error::TranscriptionError;

/// Result of one successful transcription call.
#[derive(Debug, Clone)]
pub struct Transcript {
    pub text: String,
    /// Audio duration in seconds, as reported by the service (0.0 if absent).
    pub duration_secs: f64,
}

/// Seam between the batch dispatcher and the concrete transcriber,
/// so the dispatcher can be exercised without network access.
#[async_trait]
pub trait TranscribeService: Send + Sync {
    async fn transcribe(&self, audio_path: &Path) -> Result<Transcript, TranscriptionError>;
}
