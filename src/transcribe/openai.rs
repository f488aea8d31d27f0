// Upstream transcription client
// One POST of a multipart body per request, no retries.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use serde::Deserialize;
use tracing::{debug, info};

use super::Transcriber;
use super::multipart::encode_transcription_form;
use crate::config::{Credential, UpstreamConfig};
use crate::error::{GatewayError, Result, UpstreamError};
use crate::model::{TranscriptionResult, TranslationRequest};

/// Body returned by the upstream endpoint for `response_format=json`.
#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptionOutput {
    pub text: String,
    #[serde(default)]
    pub language: Option<String>,
}

impl TranscriptionOutput {
    /// Whitespace-only text means no speech was detected.
    pub fn into_result(self) -> Result<TranscriptionResult> {
        let transcript = self.text.trim();
        if transcript.is_empty() {
            return Err(GatewayError::NoSpeech);
        }
        Ok(TranscriptionResult {
            transcript: transcript.to_string(),
            detected_language: self
                .language
                .filter(|lang| !lang.trim().is_empty())
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }
}

pub struct OpenAITranscriber {
    client: Client,
    config: UpstreamConfig,
    credential: Option<Credential>,
}

impl OpenAITranscriber {
    pub fn new(client: Client, config: UpstreamConfig, credential: Option<Credential>) -> Self {
        Self {
            client,
            config,
            credential,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/audio/transcriptions", self.config.base_url)
    }

    async fn execute_transcription(
        &self,
        request: &TranslationRequest,
    ) -> std::result::Result<TranscriptionOutput, UpstreamError> {
        let credential = self
            .credential
            .as_ref()
            .ok_or(UpstreamError::MissingCredentials)?;

        let form = encode_transcription_form(
            &self.config.transcription_model,
            &request.audio_bytes,
            &request.file_name,
            &request.mime_type,
        );

        debug!(
            "Sending {} bytes of multipart data to {} (model {})",
            form.content_length(),
            self.endpoint(),
            self.config.transcription_model
        );

        let mut builder = self
            .client
            .post(self.endpoint())
            .bearer_auth(credential.expose())
            .header(CONTENT_TYPE, form.content_type.as_str())
            .header(CONTENT_LENGTH, form.content_length());
        if let Some(timeout) = self.config.transcription_timeout() {
            builder = builder.timeout(timeout);
        }

        let response = builder.body(form.body).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(UpstreamError::Decode)
    }
}

#[async_trait]
impl Transcriber for OpenAITranscriber {
    async fn transcribe(&self, request: &TranslationRequest) -> Result<TranscriptionResult> {
        info!(
            "Starting transcription of {} ({} bytes, {})",
            request.file_name,
            request.audio_bytes.len(),
            request.mime_type
        );

        let output = self
            .execute_transcription(request)
            .await
            .map_err(GatewayError::Transcription)?;
        let result = output.into_result()?;

        info!(
            "Transcription completed: {} chars, language {}",
            result.transcript.len(),
            result.detected_language
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::ErrorKind;
    use axum::Router;
    use axum::body::Bytes;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use std::sync::{Arc, Mutex};

    type Seen = Arc<Mutex<Option<(HeaderMap, usize)>>>;

    /// Local upstream answering every transcription call with `status` and `reply`.
    async fn spawn_upstream(status: StatusCode, reply: &'static str) -> (String, Seen) {
        let seen: Seen = Arc::new(Mutex::new(None));
        let recorder = seen.clone();
        let router = Router::new().route(
            "/audio/transcriptions",
            post(move |headers: HeaderMap, body: Bytes| {
                let recorder = recorder.clone();
                async move {
                    *recorder.lock().unwrap() = Some((headers, body.len()));
                    (status, reply)
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        (format!("http://{}", addr), seen)
    }

    fn transcriber_for(base_url: String) -> OpenAITranscriber {
        let mut config = Config::default().upstream;
        config.base_url = base_url;
        OpenAITranscriber::new(Client::new(), config, Some(Credential::new("sk-test")))
    }

    fn request() -> TranslationRequest {
        TranslationRequest {
            file_name: "memo.wav".to_string(),
            mime_type: "audio/wav".to_string(),
            audio_bytes: vec![1, 2, 3],
            target_language: "en".to_string(),
            audio_format: "wav".to_string(),
        }
    }

    #[test]
    fn test_output_with_language() {
        let output: TranscriptionOutput =
            serde_json::from_str(r#"{"text":"  Dzień dobry ","language":"polish"}"#).unwrap();
        let result = output.into_result().unwrap();
        assert_eq!(result.transcript, "Dzień dobry");
        assert_eq!(result.detected_language, "polish");
    }

    #[test]
    fn test_output_without_language_defaults_to_unknown() {
        let output: TranscriptionOutput = serde_json::from_str(r#"{"text":"hello"}"#).unwrap();
        assert_eq!(output.into_result().unwrap().detected_language, "unknown");
    }

    #[test]
    fn test_whitespace_text_is_no_speech() {
        let output: TranscriptionOutput = serde_json::from_str(r#"{"text":" \n "}"#).unwrap();
        assert!(matches!(output.into_result(), Err(GatewayError::NoSpeech)));
    }

    #[test]
    fn test_missing_text_fails_to_decode() {
        assert!(serde_json::from_str::<TranscriptionOutput>(r#"{"language":"en"}"#).is_err());
    }

    #[tokio::test]
    async fn test_missing_credentials_fail_without_network() {
        let mut config = Config::default().upstream;
        // Unroutable on purpose; the call must never get this far.
        config.base_url = "http://127.0.0.1:9".to_string();
        let transcriber = OpenAITranscriber::new(Client::new(), config, None);

        let err = transcriber.transcribe(&request()).await.unwrap_err();
        assert!(matches!(
            err,
            GatewayError::Transcription(UpstreamError::MissingCredentials)
        ));
    }

    #[tokio::test]
    async fn test_upload_headers_and_success() {
        let (url, seen) =
            spawn_upstream(StatusCode::OK, r#"{"text":"Dzień dobry","language":"polish"}"#).await;

        let result = transcriber_for(url).transcribe(&request()).await.unwrap();
        assert_eq!(result.transcript, "Dzień dobry");
        assert_eq!(result.detected_language, "polish");

        let (headers, received) = seen.lock().unwrap().take().unwrap();
        assert_eq!(headers["authorization"], "Bearer sk-test");
        let content_type = headers["content-type"].to_str().unwrap();
        assert!(content_type.starts_with("multipart/form-data; boundary=----TraislateBoundary"));
        let content_length: usize = headers["content-length"].to_str().unwrap().parse().unwrap();
        assert_eq!(content_length, received);
    }

    #[tokio::test]
    async fn test_non_success_status_keeps_raw_body() {
        let (url, _) = spawn_upstream(StatusCode::UNAUTHORIZED, "bad key").await;

        let err = transcriber_for(url).transcribe(&request()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UpstreamTransport);
        match err {
            GatewayError::Transcription(UpstreamError::Status { status, body }) => {
                assert_eq!(status, 401);
                assert_eq!(body, "bad key");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_failure() {
        let (url, _) = spawn_upstream(StatusCode::OK, "not json").await;

        let err = transcriber_for(url).transcribe(&request()).await.unwrap_err();
        assert!(matches!(
            err,
            GatewayError::Transcription(UpstreamError::Decode(_))
        ));
        assert_eq!(err.kind(), ErrorKind::UpstreamContract);
    }
}
