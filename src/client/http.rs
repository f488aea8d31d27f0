// Gateway client over HTTP

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::GatewayClient;
use crate::error::ClientError;
use crate::model::{TranslatePayload, TranslationResult};

pub struct HttpGatewayClient {
    client: Client,
    endpoint: String,
}

impl HttpGatewayClient {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl GatewayClient for HttpGatewayClient {
    async fn translate(
        &self,
        payload: &TranslatePayload,
    ) -> Result<TranslationResult, ClientError> {
        debug!("POST {}", self.endpoint);
        let response = self.client.post(&self.endpoint).json(payload).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ClientError::Gateway {
                status: status.as_u16(),
                body,
            });
        }
        Ok(serde_json::from_str(&body)?)
    }
}
