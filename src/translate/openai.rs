use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use super::Translator;
use super::envelope::{Envelope, RawEnvelope};
use super::request::StructuredRequest;
use crate::config::{Credential, UpstreamConfig};
use crate::error::{GatewayError, Result, UpstreamError};
use crate::model::RawTranslation;

/// Client for the upstream structured-output (responses) endpoint.
pub struct OpenAITranslator {
    client: Client,
    config: UpstreamConfig,
    credential: Option<Credential>,
}

impl OpenAITranslator {
    pub fn new(client: Client, config: UpstreamConfig, credential: Option<Credential>) -> Self {
        Self {
            client,
            config,
            credential,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/responses", self.config.base_url)
    }

    async fn call_responses(
        &self,
        request: &StructuredRequest,
    ) -> std::result::Result<RawEnvelope, UpstreamError> {
        let credential = self
            .credential
            .as_ref()
            .ok_or(UpstreamError::MissingCredentials)?;

        debug!("Sending translation request to: {}", self.endpoint());

        let mut builder = self
            .client
            .post(self.endpoint())
            .bearer_auth(credential.expose())
            .header("OpenAI-Beta", "responses=v1")
            .json(request);
        if let Some(timeout) = self.config.translation_timeout() {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;

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

/// Extract the model's text and parse it as the requested JSON object.
/// Malformed JSON is terminal; no partial recovery is attempted.
pub fn parse_model_output(raw: RawEnvelope) -> Result<RawTranslation> {
    let envelope = Envelope::resolve(raw).ok_or(GatewayError::MissingOutput)?;
    debug!("Model output resolved from {:?} envelope", envelope_kind(&envelope));
    serde_json::from_str(envelope.text().trim()).map_err(GatewayError::MalformedOutput)
}

fn envelope_kind(envelope: &Envelope) -> &'static str {
    match envelope {
        Envelope::Legacy(_) => "legacy",
        Envelope::Flattened(_) => "flattened",
    }
}

#[async_trait]
impl Translator for OpenAITranslator {
    async fn translate(&self, request: &StructuredRequest) -> Result<RawTranslation> {
        info!("Requesting structured translation with model {}", request.model);

        let raw = self
            .call_responses(request)
            .await
            .map_err(GatewayError::Translation)?;
        let translation = parse_model_output(raw)?;

        info!(
            "Translation received: {} chars, {} paragraph(s)",
            translation.translation.as_deref().map_or(0, str::len),
            translation.paragraphs.as_ref().map_or(0, Vec::len)
        );
        Ok(translation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::ErrorKind;
    use crate::translate::request::build_translation_request;
    use axum::Router;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use std::sync::{Arc, Mutex};

    type Seen = Arc<Mutex<Option<(HeaderMap, serde_json::Value)>>>;

    /// Local upstream answering every responses call with `status` and `reply`.
    async fn spawn_upstream(status: StatusCode, reply: &'static str) -> (String, Seen) {
        let seen: Seen = Arc::new(Mutex::new(None));
        let recorder = seen.clone();
        let router = Router::new().route(
            "/responses",
            post(move |headers: HeaderMap, body: String| {
                let recorder = recorder.clone();
                async move {
                    let json: serde_json::Value = serde_json::from_str(&body).unwrap_or_default();
                    *recorder.lock().unwrap() = Some((headers, json));
                    (status, reply)
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        (format!("http://{}", addr), seen)
    }

    fn translator_for(base_url: String) -> OpenAITranslator {
        let mut config = Config::default().upstream;
        config.base_url = base_url;
        OpenAITranslator::new(Client::new(), config, Some(Credential::new("sk-test")))
    }

    fn envelope(json: &str) -> RawEnvelope {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_parses_nested_output() {
        let raw = envelope(
            r#"{"output":[{"content":[{"type":"output_text","text":"{\"detectedLanguage\":\"polish\",\"translation\":\"Hello\",\"paragraphs\":[\"Hello\"],\"confidence\":0.93}"}]}]}"#,
        );
        let translation = parse_model_output(raw).unwrap();
        assert_eq!(translation.detected_language.as_deref(), Some("polish"));
        assert_eq!(translation.paragraphs, Some(vec!["Hello".to_string()]));
        assert_eq!(translation.confidence, Some(0.93));
    }

    #[test]
    fn test_parses_flattened_output() {
        let raw = envelope(r#"{"output_text":"{\"translation\":\"A\\n\\nB\"}"}"#);
        let translation = parse_model_output(raw).unwrap();
        assert_eq!(translation.translation.as_deref(), Some("A\n\nB"));
        assert!(translation.paragraphs.is_none());
    }

    #[test]
    fn test_absent_output_is_terminal() {
        assert!(matches!(
            parse_model_output(envelope("{}")),
            Err(GatewayError::MissingOutput)
        ));
    }

    #[test]
    fn test_prose_output_is_malformed() {
        let raw = envelope(r#"{"output_text":"Sure! Here is your translation: {\"translation\":\"x\"}"}"#);
        assert!(matches!(
            parse_model_output(raw),
            Err(GatewayError::MalformedOutput(_))
        ));
    }

    #[test]
    fn test_non_object_output_is_malformed() {
        let raw = envelope(r#"{"output_text":"[1,2,3]"}"#);
        assert!(matches!(
            parse_model_output(raw),
            Err(GatewayError::MalformedOutput(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_credentials_fail_without_network() {
        let mut config = Config::default().upstream;
        config.base_url = "http://127.0.0.1:9".to_string();
        let translator = OpenAITranslator::new(Client::new(), config, None);
        let request = build_translation_request("m", "text", "polish", "en");

        let err = translator.translate(&request).await.unwrap_err();
        assert!(matches!(
            err,
            GatewayError::Translation(UpstreamError::MissingCredentials)
        ));
    }

    #[tokio::test]
    async fn test_request_headers_and_success() {
        let (url, seen) = spawn_upstream(
            StatusCode::OK,
            r#"{"output":[{"content":[{"text":"{\"detectedLanguage\":\"polish\",\"translation\":\"Hello\",\"paragraphs\":[\"Hello\"],\"confidence\":0.9}"}]}]}"#,
        )
        .await;
        let request = build_translation_request("gpt-4o-mini", "Cześć", "polish", "en");

        let translation = translator_for(url).translate(&request).await.unwrap();
        assert_eq!(translation.translation.as_deref(), Some("Hello"));

        let (headers, body) = seen.lock().unwrap().take().unwrap();
        assert_eq!(headers["authorization"], "Bearer sk-test");
        assert_eq!(headers["openai-beta"], "responses=v1");
        assert!(
            headers["content-type"]
                .to_str()
                .unwrap()
                .starts_with("application/json")
        );
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["text"]["format"]["name"], "translation_result");
    }

    #[tokio::test]
    async fn test_non_success_status_keeps_raw_body() {
        let (url, _) = spawn_upstream(StatusCode::TOO_MANY_REQUESTS, "slow down").await;
        let request = build_translation_request("m", "text", "polish", "en");

        let err = translator_for(url).translate(&request).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UpstreamTransport);
        match err {
            GatewayError::Translation(UpstreamError::Status { status, body }) => {
                assert_eq!(status, 429);
                assert_eq!(body, "slow down");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_envelope_is_decode_failure() {
        let (url, _) = spawn_upstream(StatusCode::OK, "not json").await;
        let request = build_translation_request("m", "text", "polish", "en");

        let err = translator_for(url).translate(&request).await.unwrap_err();
        assert!(matches!(
            err,
            GatewayError::Translation(UpstreamError::Decode(_))
        ));
        assert_eq!(err.kind(), ErrorKind::UpstreamContract);
    }
}
