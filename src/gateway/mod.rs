//! Request pipeline.
//!
//! `Validate -> Transcribe -> BuildTranslationRequest -> Translate -> Normalize`,
//! strictly sequential. Each stage returns its own error and the first
//! failure ends the request; nothing is retried.

use tracing::{debug, info};

use crate::error::{GatewayError, Result};
use crate::model::{TranslatePayload, TranslationRequest, TranslationResult};
use crate::transcribe::Transcriber;
use crate::translate::{Translator, build_translation_request, normalize};

pub struct Gateway {
    transcriber: Box<dyn Transcriber>,
    translator: Box<dyn Translator>,
    translation_model: String,
    max_audio_bytes: usize,
}

impl Gateway {
    pub fn new(
        transcriber: Box<dyn Transcriber>,
        translator: Box<dyn Translator>,
        translation_model: impl Into<String>,
        max_audio_bytes: usize,
    ) -> Self {
        Self {
            transcriber,
            translator,
            translation_model: translation_model.into(),
            max_audio_bytes,
        }
    }

    pub fn max_audio_bytes(&self) -> usize {
        self.max_audio_bytes
    }

    /// Run the whole pipeline on a raw JSON body.
    pub async fn handle(&self, body: &[u8]) -> Result<TranslationResult> {
        let request = self.validate(body)?;
        self.translate(&request).await
    }

    pub fn validate(&self, body: &[u8]) -> Result<TranslationRequest> {
        let payload: TranslatePayload =
            serde_json::from_slice(body).map_err(GatewayError::InvalidJson)?;
        let request = TranslationRequest::from_payload(payload, self.max_audio_bytes)?;
        debug!(
            "Validated request: {} ({} bytes) -> {}",
            request.file_name,
            request.audio_bytes.len(),
            request.target_language
        );
        Ok(request)
    }

    /// Stages after validation.
    pub async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResult> {
        let transcription = self.transcriber.transcribe(request).await?;

        let structured = build_translation_request(
            &self.translation_model,
            &transcription.transcript,
            &transcription.detected_language,
            &request.target_language,
        );

        let raw = self.translator.translate(&structured).await?;
        let result = normalize(raw);

        info!(
            "Translated {} from {} into {} ({} paragraph(s), confidence {:.2})",
            request.file_name,
            transcription.detected_language,
            request.target_language,
            result.paragraphs.len(),
            result.confidence
        );
        Ok(result)
    }
}
