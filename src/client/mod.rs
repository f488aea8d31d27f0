// Client side of the translate protocol
//
// - locale: en/de/pl string tables and language display names
// - status: UI status values and their tones
// - session: session context and the pure `update` function
// - demo: locally synthesized result for offline use
// - render: text presentation of a result
// - audio: format/MIME inference and file feedback
// - http: `GatewayClient` over reqwest
//
// `ResilientClient` drives one submission through the session: read the file,
// call the gateway, and fall back to a demo result when the gateway fails.
// Local read failures are never masked by a demo result.

pub mod audio;
pub mod demo;
pub mod http;
pub mod locale;
pub mod render;
pub mod session;
pub mod status;

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::{info, warn};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::model::{TranslatePayload, TranslationResult};

pub use http::HttpGatewayClient;
pub use locale::Locale;
pub use session::{Event, SessionContext, update};
pub use status::{Tone, UiStatus};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GatewayClient: Send + Sync {
    async fn translate(&self, payload: &TranslatePayload)
    -> Result<TranslationResult, ClientError>;
}

/// What one submission produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub context: SessionContext,
    /// Result to present; `None` for noFile/readError/translationFailed.
    pub result: Option<TranslationResult>,
}

pub struct ResilientClient {
    gateway: Box<dyn GatewayClient>,
    settings: ClientConfig,
}

impl ResilientClient {
    pub fn new(gateway: Box<dyn GatewayClient>, settings: ClientConfig) -> Self {
        Self { gateway, settings }
    }

    /// Run one submission. `target` defaults to the active locale's code.
    pub async fn submit(
        &self,
        ctx: SessionContext,
        file: Option<&Path>,
        target: Option<&str>,
    ) -> Outcome {
        if ctx.last_status.is_in_flight() {
            return Outcome {
                context: ctx,
                result: None,
            };
        }

        let Some(path) = file else {
            let context = update(
                ctx,
                Event::Submit {
                    file_selected: false,
                },
            );
            return Outcome {
                context,
                result: None,
            };
        };

        let ctx = update(
            ctx,
            Event::Submit {
                file_selected: true,
            },
        );
        let target = target
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(ctx.locale.code())
            .to_string();

        let payload = match read_payload(path, &target).await {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                return Outcome {
                    context: update(ctx, Event::ReadFailed),
                    result: None,
                };
            }
        };

        match self.gateway.translate(&payload).await {
            Ok(result) => {
                info!("Translation received ({})", result.detected_language);
                Outcome {
                    context: update(ctx, Event::GatewayResponded(result.clone())),
                    result: Some(result),
                }
            }
            Err(e) => {
                warn!("Gateway request failed: {}", e);
                self.fallback(ctx, payload.file_name.as_deref().unwrap_or_default(), &target)
                    .await
            }
        }
    }

    async fn fallback(&self, ctx: SessionContext, file_name: &str, target: &str) -> Outcome {
        if !self.settings.demo_fallback {
            return Outcome {
                context: update(ctx, Event::GatewayFailed { demo: None }),
                result: None,
            };
        }

        tokio::time::sleep(Duration::from_millis(self.settings.demo_delay_ms)).await;
        let demo = demo::synthesize_demo(
            ctx.locale,
            file_name,
            target,
            self.settings.demo_confidence,
        );
        info!("{}", locale::text(ctx.locale, "demo.logHint"));

        Outcome {
            context: update(
                ctx,
                Event::GatewayFailed {
                    demo: Some(demo.clone()),
                },
            ),
            result: Some(demo),
        }
    }
}

async fn read_payload(path: &Path, target: &str) -> Result<TranslatePayload, ClientError> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mime_type = audio::mime_for_extension(path);

    Ok(TranslatePayload {
        audio_format: Some(audio::infer_audio_format(&file_name, mime_type)),
        file_name: Some(file_name),
        mime_type: mime_type.map(str::to_string),
        base64_audio: Some(STANDARD.encode(bytes)),
        target_language: Some(target.to_string()),
    })
}
