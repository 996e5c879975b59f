use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use log::{error, info};

use super::client::TranscriptionClient;
use super::error::TranscriptionError;
use super::service::{TranscribeService, Transcript};

// Deepgram rejects pre-recorded uploads above 2GB
const MAX_FILE_SIZE_BYTES: u64 = 2 * 1024 * 1024 * 1024;
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Transcription service that orchestrates audio transcription
///
/// Uses a `TranscriptionClient` implementation for the provider-specific
/// parts; everything here is provider-agnostic.
pub struct Transcriber {
    client: Box<dyn TranscriptionClient>,
    http: reqwest::Client,
}

impl Transcriber {
    /// Create a new Transcriber with a per-request timeout
    pub fn new(
        client: Box<dyn TranscriptionClient>,
        timeout: Duration,
    ) -> Result<Self, TranscriptionError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| {
                TranscriptionError::ApiError(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self { client, http })
    }

    /// Validate file exists and is within size limits
    async fn validate_file(&self, file_path: &Path) -> Result<(), TranscriptionError> {
        let metadata = match tokio::fs::metadata(file_path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                error!("File not found: {:?}", file_path);
                return Err(TranscriptionError::FileNotFound(
                    file_path.to_string_lossy().to_string(),
                ));
            }
            Err(e) => return Err(e.into()),
        };

        let file_size = metadata.len();
        if file_size > MAX_FILE_SIZE_BYTES {
            error!(
                "File too large: {} bytes > {} bytes",
                file_size, MAX_FILE_SIZE_BYTES
            );
            return Err(TranscriptionError::FileTooLarge {
                size_bytes: file_size,
            });
        }

        Ok(())
    }

    /// Send request and parse response
    async fn send_and_parse(
        &self,
        audio: Vec<u8>,
        content_type: &'static str,
    ) -> Result<Transcript, TranscriptionError> {
        let request = self.http.post(self.client.transcription_url());
        let request = self.client.add_auth(request);

        let response = request
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(audio)
            .send()
            .await
            .map_err(|e| {
                error!("API request error: {}", e);
                TranscriptionError::ApiError(format!("Request failed: {e}"))
            })?;

        // Check response status
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("API error response ({}): {}", status, error_text);
            return Err(TranscriptionError::ApiError(format!(
                "API returned status {}: {}",
                status, error_text
            )));
        }

        let body = response.text().await.map_err(|e| {
            error!("Failed to read response: {}", e);
            TranscriptionError::ApiError(format!("Failed to read response: {e}"))
        })?;

        let transcript = self.client.parse_response(&body)?;

        info!(
            "Transcription successful: {} characters, {:.1}s of audio",
            transcript.text.len(),
            transcript.duration_secs
        );

        Ok(transcript)
    }
}

#[async_trait]
impl TranscribeService for Transcriber {
    async fn transcribe(&self, audio_path: &Path) -> Result<Transcript, TranscriptionError> {
        self.validate_file(audio_path).await?;

        let audio = tokio::fs::read(audio_path).await?;
        let content_type = self.client.content_type(audio_path);

        self.send_and_parse(audio, content_type).await
    }
}
