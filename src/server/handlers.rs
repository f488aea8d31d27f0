use axum::Json;
use axum::body::{Body, Bytes};
use axum::extract::{Request, State};
use axum::http::{Method, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use http_body_util::{BodyExt, LengthLimitError, Limited};
use tracing::debug;

use super::AppState;
use crate::error::GatewayError;

/// Collect `body`, failing as soon as more than `limit` bytes have streamed in.
/// A body of exactly `limit` bytes is accepted.
pub async fn read_body_limited(body: Body, limit: usize) -> Result<Bytes, GatewayError> {
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.is::<LengthLimitError>() => Err(GatewayError::PayloadTooLarge { limit }),
        Err(e) => Err(GatewayError::Internal(format!("failed to read request body: {}", e))),
    }
}

#[tracing::instrument(skip(state, body))]
pub async fn translate_handler(State(state): State<AppState>, body: Body) -> Response {
    let bytes = match read_body_limited(body, state.max_request_bytes).await {
        Ok(bytes) => bytes,
        Err(e) => return e.into_response(),
    };
    debug!("Received translate request body: {} bytes", bytes.len());

    match state.gateway.handle(&bytes).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Answer every `OPTIONS` request with 204 and permissive CORS headers.
pub async fn preflight_middleware(request: Request, next: Next) -> Response {
    if request.method() != Method::OPTIONS {
        return next.run(request).await;
    }

    (
        StatusCode::NO_CONTENT,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, "GET,POST,OPTIONS"),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
        ],
    )
        .into_response()
}
