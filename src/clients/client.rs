use std::path::Path;

use super::error::TranscriptionError;
use super::service::Transcript;

/// Trait for transcription API clients (Deepgram, etc.)
///
/// Each implementation knows how to:
/// - Construct the correct API URL, query parameters included
/// - Add proper authentication headers
/// - Name the content type for a given audio file
/// - Parse the provider's response body into a [`Transcript`]
pub trait TranscriptionClient: Send + Sync {
    /// Get the transcription API endpoint URL
    fn transcription_url(&self) -> String;

    /// Add authentication to the request builder
    fn add_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder;

    /// Content type to send for the given audio file
    fn content_type(&self, path: &Path) -> &'static str;

    /// Parse the provider's JSON response body
    fn parse_response(&self, body: &str) -> Result<Transcript, TranscriptionError>;
}
