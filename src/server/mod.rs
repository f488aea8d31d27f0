// HTTP surface of the gateway
//
// - handlers: `POST /api/translate`, bounded body reading, OPTIONS preflight
// - static_files: entry document and asset serving

pub mod handlers;
pub mod static_files;

use std::any::Any;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::http::Response;
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::post;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};

use crate::config::Config;
use crate::error::GatewayError;
use crate::gateway::Gateway;
use crate::transcribe::OpenAITranscriber;
use crate::translate::OpenAITranslator;

pub use handlers::{preflight_middleware, read_body_limited, translate_handler};
pub use static_files::static_handler;

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<Gateway>,
    pub static_dir: PathBuf,
    pub max_request_bytes: usize,
}

impl AppState {
    pub fn new(gateway: Gateway, static_dir: PathBuf, max_request_bytes: usize) -> Self {
        Self {
            gateway: Arc::new(gateway),
            static_dir,
            max_request_bytes,
        }
    }

    /// Wire the upstream clients from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        let credential = config.upstream.credential();
        if credential.is_none() {
            tracing::warn!(
                "{} is not set; translate requests will fail with 502",
                config.upstream.api_key_env
            );
        }

        let transcriber =
            OpenAITranscriber::new(client.clone(), config.upstream.clone(), credential.clone());
        let translator = OpenAITranslator::new(client, config.upstream.clone(), credential);
        let gateway = Gateway::new(
            Box::new(transcriber),
            Box::new(translator),
            config.upstream.translation_model.clone(),
            config.server.max_request_bytes,
        );

        Ok(Self::new(
            gateway,
            config.server.static_dir.clone(),
            config.server.max_request_bytes,
        ))
    }
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response<axum::body::Body> {
    let reason = panic
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| panic.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_else(|| "unknown panic".to_string());
    GatewayError::Internal(reason).into_response()
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new().allow_origin(AnyOrigin);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route(
            "/api/translate",
            post(translate_handler).fallback(static_handler),
        )
        .fallback(static_handler)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors)
        .layer(middleware::from_fn(preflight_middleware))
        .layer(trace_layer)
        .with_state(state)
}

/// Bind and serve until Ctrl-C.
pub async fn serve(config: &Config) -> Result<()> {
    let state = AppState::from_config(config)?;
    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "Invalid listen address {}:{}",
                config.server.host, config.server.port
            )
        })?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Traislate gateway listening on http://{}", addr);
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await
        .context("Server error")?;
    Ok(())
}
