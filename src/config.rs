use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};

/// 60 MiB, applied to the inbound body and to the decoded audio.
pub const DEFAULT_MAX_REQUEST_BYTES: usize = 60 * 1024 * 1024;

pub const DEFAULT_TRANSCRIPTION_MODEL: &str = "gpt-4o-mini-transcribe";
pub const DEFAULT_TRANSLATION_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub client: ClientConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Directory holding the static front-end assets
    pub static_dir: PathBuf,
    /// Byte ceiling for inbound request bodies and decoded audio
    pub max_request_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the speech/LLM API, without trailing slash
    pub base_url: String,
    /// Model used for the transcription call
    pub transcription_model: String,
    /// Model used for the structured translation call
    pub translation_model: String,
    /// Name of the environment variable carrying the API key
    pub api_key_env: String,
    /// Deadline for the transcription call in seconds (0 = transport default)
    pub transcription_timeout_secs: u64,
    /// Deadline for the translation call in seconds (0 = transport default)
    pub translation_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Gateway endpoint used by `submit`
    pub endpoint: String,
    /// Substitute a demo result when the gateway is unreachable
    pub demo_fallback: bool,
    /// Artificial delay before showing the demo result
    pub demo_delay_ms: u64,
    /// Confidence reported by the demo result
    pub demo_confidence: f64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            static_dir: PathBuf::from("public"),
            max_request_bytes: DEFAULT_MAX_REQUEST_BYTES,
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            transcription_model: DEFAULT_TRANSCRIPTION_MODEL.to_string(),
            translation_model: DEFAULT_TRANSLATION_MODEL.to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            transcription_timeout_secs: 120,
            translation_timeout_secs: 60,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:3000/api/translate".to_string(),
            demo_fallback: true,
            demo_delay_ms: 650,
            demo_confidence: 0.87,
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Explicit path first, then `./config.toml`, then built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None if Path::new("config.toml").exists() => Self::from_file("config.toml"),
            None => Ok(Self::default()),
        }
    }

    /// Apply `HOST`, `PORT` and `OPENAI_BASE_URL` from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST").filter(|h| !h.trim().is_empty()) {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT").and_then(|p| p.trim().parse::<u16>().ok()) {
            self.server.port = port;
        }
        if let Some(url) = lookup("OPENAI_BASE_URL").filter(|u| !u.trim().is_empty()) {
            self.upstream.base_url = url.trim_end_matches('/').to_string();
        }
    }
}

impl UpstreamConfig {
    pub fn transcription_timeout(&self) -> Option<Duration> {
        (self.transcription_timeout_secs > 0)
            .then(|| Duration::from_secs(self.transcription_timeout_secs))
    }

    pub fn translation_timeout(&self) -> Option<Duration> {
        (self.translation_timeout_secs > 0)
            .then(|| Duration::from_secs(self.translation_timeout_secs))
    }

    /// Read the API key named by `api_key_env`. Empty values count as absent.
    pub fn credential(&self) -> Option<Credential> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .map(Credential::new)
    }
}

/// Bearer token for the upstream API. Never printed.
#[derive(Clone)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}
