use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Failures talking to the upstream speech/LLM service.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("upstream API key is not configured")]
    MissingCredentials,

    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to decode upstream response: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Coarse classification used for status mapping and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ClientInput,
    PayloadTooLarge,
    UpstreamTransport,
    UpstreamContract,
    Internal,
}

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Invalid JSON in request body")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Missing Base64 audio data")]
    MissingAudio,

    #[error("Specify the target translation language")]
    MissingTargetLanguage,

    #[error("Could not decode audio data")]
    AudioDecode(#[source] base64::DecodeError),

    #[error("Empty audio file")]
    EmptyAudio,

    #[error("Audio file is too large")]
    PayloadTooLarge { limit: usize },

    #[error("Audio transcription failed")]
    Transcription(#[source] UpstreamError),

    #[error("Transcription returned no text")]
    NoSpeech,

    #[error("Translation request failed")]
    Translation(#[source] UpstreamError),

    #[error("No output from the translation model")]
    MissingOutput,

    #[error("Could not parse the translation model output")]
    MalformedOutput(#[source] serde_json::Error),

    #[error("Internal server error")]
    Internal(String),
}

impl GatewayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidJson(_)
            | Self::MissingAudio
            | Self::MissingTargetLanguage
            | Self::AudioDecode(_)
            | Self::EmptyAudio => ErrorKind::ClientInput,
            Self::PayloadTooLarge { .. } => ErrorKind::PayloadTooLarge,
            Self::Transcription(UpstreamError::Decode(_))
            | Self::Translation(UpstreamError::Decode(_))
            | Self::NoSpeech
            | Self::MissingOutput
            | Self::MalformedOutput(_) => ErrorKind::UpstreamContract,
            Self::Transcription(_) | Self::Translation(_) => ErrorKind::UpstreamTransport,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::ClientInput => StatusCode::BAD_REQUEST,
            ErrorKind::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ErrorKind::UpstreamTransport | ErrorKind::UpstreamContract => StatusCode::BAD_GATEWAY,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Diagnostic text for upstream-facing failures only.
    pub fn details(&self) -> Option<String> {
        match self {
            Self::Transcription(e) | Self::Translation(e) => Some(e.to_string()),
            Self::MalformedOutput(e) => Some(e.to_string()),
            _ => None,
        }
    }

    /// Server-side log text: kind, message and details.
    pub fn diagnostic(&self) -> String {
        match self.details() {
            Some(details) => format!("[{:?}] {}: {}", self.kind(), self, details),
            None => format!("[{:?}] {}", self.kind(), self),
        }
    }
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self.kind() {
            ErrorKind::ClientInput | ErrorKind::PayloadTooLarge => {
                warn!("Rejected translate request: {}", self);
            }
            ErrorKind::UpstreamTransport | ErrorKind::UpstreamContract => {
                error!("Upstream failure {}", self.diagnostic());
            }
            ErrorKind::Internal => {
                if let Self::Internal(reason) = &self {
                    error!("Internal fault: {}", reason);
                }
            }
        }

        let body = ErrorBody {
            error: self.to_string(),
            details: self.details(),
        };
        (status, Json(body)).into_response()
    }
}

/// Failures seen by the client side of the protocol.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Unable to read the audio file: {0}")]
    Read(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("gateway returned {status}: {body}")]
    Gateway { status: u16, body: String },

    #[error("failed to decode gateway response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_error() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("{").unwrap_err()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(GatewayError::MissingAudio.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            GatewayError::PayloadTooLarge { limit: 1 }.status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(GatewayError::NoSpeech.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            GatewayError::Transcription(UpstreamError::MissingCredentials).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            GatewayError::Internal("boom".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_diagnostic_names_the_kind() {
        let contract = GatewayError::Translation(UpstreamError::Decode(decode_error()));
        assert!(
            contract
                .diagnostic()
                .starts_with("[UpstreamContract] Translation request failed: ")
        );

        let transport = GatewayError::Transcription(UpstreamError::Status {
            status: 401,
            body: "bad key".to_string(),
        });
        assert_eq!(
            transport.diagnostic(),
            "[UpstreamTransport] Audio transcription failed: upstream returned 401: bad key"
        );
        assert_eq!(
            GatewayError::NoSpeech.diagnostic(),
            "[UpstreamContract] Transcription returned no text"
        );
    }

    #[test]
    fn test_contract_and_transport_are_distinguished() {
        let contract = GatewayError::Translation(UpstreamError::Decode(decode_error()));
        let transport = GatewayError::Translation(UpstreamError::Status {
            status: 500,
            body: "oops".to_string(),
        });
        assert_eq!(contract.kind(), ErrorKind::UpstreamContract);
        assert_eq!(transport.kind(), ErrorKind::UpstreamTransport);
        assert_eq!(contract.status(), transport.status());
    }

    #[test]
    fn test_details_only_for_upstream_failures() {
        assert!(GatewayError::MissingTargetLanguage.details().is_none());
        assert!(GatewayError::Internal("panic".to_string()).details().is_none());
        let details = GatewayError::Transcription(UpstreamError::Status {
            status: 401,
            body: "invalid key".to_string(),
        })
        .details();
        assert_eq!(details.as_deref(), Some("upstream returned 401: invalid key"));
    }
}
