use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::error::{GatewayError, Result};

/// Inbound JSON body of `POST /api/translate`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslatePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base64_audio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_format: Option<String>,
}

/// A validated request, owned by one request/response exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationRequest {
    pub file_name: String,
    pub mime_type: String,
    pub audio_bytes: Vec<u8>,
    pub target_language: String,
    pub audio_format: String,
}

impl TranslationRequest {
    /// Validate an inbound payload against the audio size ceiling.
    pub fn from_payload(payload: TranslatePayload, max_audio_bytes: usize) -> Result<Self> {
        let encoded = payload
            .base64_audio
            .filter(|audio| !audio.is_empty())
            .ok_or(GatewayError::MissingAudio)?;

        let target_language = payload
            .target_language
            .map(|lang| lang.trim().to_string())
            .filter(|lang| !lang.is_empty())
            .ok_or(GatewayError::MissingTargetLanguage)?;

        // Line-wrapped base64 is accepted.
        let compact: String = encoded
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        let audio_bytes = STANDARD
            .decode(compact)
            .map_err(GatewayError::AudioDecode)?;

        if audio_bytes.is_empty() {
            return Err(GatewayError::EmptyAudio);
        }
        if audio_bytes.len() > max_audio_bytes {
            return Err(GatewayError::PayloadTooLarge { limit: max_audio_bytes });
        }

        let audio_format = payload
            .audio_format
            .filter(|format| !format.trim().is_empty());

        let file_name = payload
            .file_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| format!("upload.{}", audio_format.as_deref().unwrap_or("mp3")));

        let mime_type = payload
            .mime_type
            .filter(|mime| !mime.trim().is_empty())
            .unwrap_or_else(|| match &audio_format {
                Some(format) => format!("audio/{}", format.strip_prefix("x-").unwrap_or(format)),
                None => "audio/mpeg".to_string(),
            });

        Ok(Self {
            file_name,
            mime_type,
            audio_bytes,
            target_language,
            audio_format: audio_format.unwrap_or_else(|| "mp3".to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionResult {
    pub transcript: String,
    pub detected_language: String,
}

/// The gateway's successful response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    pub detected_language: String,
    pub translation: String,
    pub paragraphs: Vec<String>,
    pub confidence: f64,
}

/// Model output as decoded, before normalization. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTranslation {
    #[serde(default)]
    pub detected_language: Option<String>,
    #[serde(default)]
    pub translation: Option<String>,
    #[serde(default)]
    pub paragraphs: Option<Vec<String>>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl From<TranslationResult> for RawTranslation {
    fn from(result: TranslationResult) -> Self {
        Self {
            detected_language: Some(result.detected_language),
            translation: Some(result.translation),
            paragraphs: Some(result.paragraphs),
            confidence: Some(result.confidence),
        }
    }
}
