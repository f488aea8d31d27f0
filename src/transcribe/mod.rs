// Transcription stage
//
// - multipart: hand-built upload body for the upstream endpoint
// - openai: client for the upstream `/audio/transcriptions` endpoint

pub mod multipart;
pub mod openai;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{TranscriptionResult, TranslationRequest};

pub use openai::OpenAITranscriber;

/// Turns uploaded audio into text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe the request's audio. An empty transcript is an error.
    async fn transcribe(&self, request: &TranslationRequest) -> Result<TranscriptionResult>;
}
