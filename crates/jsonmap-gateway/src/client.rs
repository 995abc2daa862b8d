//! HTTP implementation of the persistence gateway.
//!
//! Records are POSTed as a JSON array to a fixed endpoint that creates or
//! appends them, and the endpoint answers with JSON. There is no retry.

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use tracing::{debug, info};

use crate::PersistenceGateway;
use crate::config::GatewayConfig;
use crate::error::{GatewayError, Result};

const JSON_MIME: &str = "application/json";

/// Blocking HTTP client for the storage endpoint.
pub struct HttpGateway {
    client: Client,
    endpoint: String,
}

impl HttpGateway {
    /// Create a gateway from configuration.
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self::with_client(client, config.endpoint.clone()))
    }

    /// Create a gateway around an existing client.
    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl PersistenceGateway for HttpGateway {
    fn submit(&self, records: &[Value]) -> Result<Value> {
        debug!(endpoint = %self.endpoint, records = records.len(), "submitting records");

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, JSON_MIME)
            .header(ACCEPT, JSON_MIME)
            .json(records)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GatewayError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text()?;
        let saved: Value = serde_json::from_str(&body)
            .map_err(|err| GatewayError::InvalidResponse(err.to_string()))?;
        info!(endpoint = %self.endpoint, status = status.as_u16(), "records saved");
        Ok(saved)
    }
}
