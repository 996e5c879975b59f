use std::path::Path;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::client::TranscriptionClient;
use super::error::TranscriptionError;
use super::service::Transcript;

const DEEPGRAM_LISTEN_URL: &str = "https://api.deepgram.com/v1/listen";
const DEEPGRAM_MODEL: &str = "nova-3";

/// Deepgram pre-recorded API client
///
/// Sends raw audio bytes; the model and formatting options ride along as
/// query parameters.
pub struct DeepgramClient {
    api_key: SecretString,
}

impl DeepgramClient {
    pub fn new(api_key: SecretString) -> Self {
        Self { api_key }
    }
}

impl TranscriptionClient for DeepgramClient {
    fn transcription_url(&self) -> String {
        format!("{DEEPGRAM_LISTEN_URL}?model={DEEPGRAM_MODEL}&smart_format=true")
    }

    fn add_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.header(
            reqwest::header::AUTHORIZATION,
            format!("Token {}", self.api_key.expose_secret()),
        )
    }

    fn content_type(&self, path: &Path) -> &'static str {
        mime_for(path)
    }

    fn parse_response(&self, body: &str) -> Result<Transcript, TranscriptionError> {
        let response: ListenResponse = serde_json::from_str(body)
            .map_err(|e| TranscriptionError::ApiError(format!("Failed to parse response: {e}")))?;

        let text = response
            .results
            .channels
            .into_iter()
            .next()
            .and_then(|channel| channel.alternatives.into_iter().next())
            .map(|alternative| alternative.transcript)
            .ok_or_else(|| {
                TranscriptionError::ApiError("Response contained no transcript".to_string())
            })?;

        Ok(Transcript {
            text,
            duration_secs: response.metadata.duration,
        })
    }
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("m4a") => "audio/mp4",
        Some("aac") => "audio/aac",
        Some("flac") => "audio/flac",
        Some("ogg") => "audio/ogg",
        Some("wma") => "audio/x-ms-wma",
        Some("webm") => "audio/webm",
        _ => "application/octet-stream",
    }
}

#[derive(Debug, Default, Deserialize)]
struct ListenResponse {
    #[serde(default)]
    metadata: Metadata,
    #[serde(default)]
    results: Results,
}

#[derive(Debug, Default, Deserialize)]
struct Metadata {
    /// Audio duration in seconds. Absent for some container formats.
    #[serde(default)]
    duration: f64,
}

#[derive(Debug, Default, Deserialize)]
struct Results {
    #[serde(default)]
    channels: Vec<Channel>,
}

#[derive(Debug, Default, Deserialize)]
struct Channel {
    #[serde(default)]
    alternatives: Vec<Alternative>,
}

#[derive(Debug, Deserialize)]
struct Alternative {
    transcript: String,
}
