//! Gateway transport - one HTTP round trip per invocation
//!
//! `HttpTransport` never retries. Every failure is folded into an
//! `InvocationResult` so callers see a single classified outcome.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::error::{BridgeError, Result, TransportErrorKind};

use super::types::{InvocationRequest, InvocationResult};
use super::wire::{CallRequest, CallResponse};

/// Default gateway base URL
pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:28888";

/// Default request timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Sends one invocation to the gateway
#[async_trait]
pub trait Transport: Send + Sync {
    async fn invoke(&self, request: &InvocationRequest) -> InvocationResult;

    /// Endpoint used in diagnostics
    fn endpoint(&self) -> &str;
}

/// Connection settings for the gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GATEWAY_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl GatewayConfig {
    /// Create a config for a specific base URL
    pub fn with_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL of the call endpoint
    pub fn call_url(&self) -> String {
        format!("{}/call", self.base_url.trim_end_matches('/'))
    }
}

/// reqwest-backed transport
pub struct HttpTransport {
    client: Client,
    config: GatewayConfig,
}

impl HttpTransport {
    /// Create a transport; a malformed gateway URL is rejected here
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let invalid = |reason: String| {
            BridgeError::Usage(format!("Invalid gateway URL '{}': {}", config.base_url, reason))
        };
        let url = Url::parse(&config.call_url()).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }

        let client = Client::builder().build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    fn classify(&self, error: reqwest::Error, timeout: Duration) -> InvocationResult {
        if error.is_timeout() {
            InvocationResult::transport(
                TransportErrorKind::Timeout,
                format!("Request timed out after {} ms", timeout.as_millis()),
            )
        } else if error.is_builder() {
            InvocationResult::transport(
                TransportErrorKind::Unreachable,
                format!("Invalid gateway URL '{}': {}", self.config.base_url, error),
            )
        } else if error.is_body() || error.is_decode() {
            InvocationResult::transport(
                TransportErrorKind::InvalidResponse,
                format!("Failed to read response from {}: {}", self.config.base_url, error),
            )
        } else if error.is_connect() {
            InvocationResult::transport(
                TransportErrorKind::Unreachable,
                format!(
                    "Cannot connect to gateway at {}. Make sure the gateway is running.",
                    self.config.base_url
                ),
            )
        } else {
            InvocationResult::transport(
                TransportErrorKind::Unreachable,
                format!("Request to {} failed: {}", self.config.base_url, error),
            )
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn invoke(&self, request: &InvocationRequest) -> InvocationResult {
        let url = self.config.call_url();
        let timeout = request.timeout.unwrap_or(self.config.timeout);
        let body = CallRequest {
            server: &request.server,
            tool: &request.tool,
            arguments: &request.arguments,
        };

        log::debug!("POST {} {}/{} (timeout {:?})", url, request.server, request.tool, timeout);

        let response = match self.client.post(&url).timeout(timeout).json(&body).send().await {
            Ok(response) => response,
            Err(e) => return self.classify(e, timeout),
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => return self.classify(e, timeout),
        };

        if !status.is_success() {
            return InvocationResult::transport(
                TransportErrorKind::HttpStatus(status.as_u16()),
                format!("HTTP {} - {}", status.as_u16(), text),
            );
        }

        match serde_json::from_str::<CallResponse>(&text) {
            Ok(envelope) => envelope.into_result(),
            Err(e) => InvocationResult::transport(
                TransportErrorKind::InvalidResponse,
                format!("Invalid response from gateway: {}", e),
            ),
        }
    }

    fn endpoint(&self) -> &str {
        &self.config.base_url
    }
}
