mod client;
mod deepgram_client;
mod error;
mod service;
mod transcriber;

// Re-export public types
pub use client::TranscriptionClient;
pub use deepgram_client::DeepgramClient;
pub use error::TranscriptionError;
pub use service::{TranscribeService, Transcript};
pub use transcriber::Transcriber;
