//! HTTP client for the Reframe API

use serde::Serialize;
use tracing::debug;

use super::request::{GenerateRequest, TransformRequest, ValidateRequest};
use super::response::ApiResponse;
use super::{ApiConfig, Endpoint};
use crate::error::SandboxError;
use crate::result::Result;

/// Thin async client over the three Reframe endpoints
#[derive(Debug, Clone)]
pub struct ReframeClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl ReframeClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SandboxError::config_error(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Generate a sample message for a type and scenario
    pub async fn generate(&self, request: &GenerateRequest) -> Result<ApiResponse> {
        if request.message_type.trim().is_empty() || request.scenario.trim().is_empty() {
            return Err(SandboxError::invalid_input(
                "Please select both a message type and a scenario",
            ));
        }

        self.post(Endpoint::Generate, request)
            .await?
            .error_for_status()
    }

    /// Validate a message. The returned response carries the verdict.
    pub async fn validate(&self, request: &ValidateRequest) -> Result<ApiResponse> {
        if request.message.trim().is_empty() {
            return Err(SandboxError::invalid_input(
                "Please enter a message to validate",
            ));
        }

        self.post(Endpoint::Validate, request)
            .await?
            .error_for_status()
    }

    /// Transform a message between MT and MX
    pub async fn transform(&self, request: &TransformRequest) -> Result<ApiResponse> {
        if request.message.trim().is_empty() {
            return Err(SandboxError::invalid_input(
                "Please enter a message to transform",
            ));
        }

        self.post(Endpoint::Transform, request)
            .await?
            .error_for_status()?
            .error_for_failure()
    }

    async fn post<B: Serialize + ?Sized>(&self, endpoint: Endpoint, body: &B) -> Result<ApiResponse> {
        let url = self.config.endpoint_url(endpoint);
        debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(&url, e))?;

        let status = response.status().as_u16();
        debug!("{} answered with status {}", url, status);

        let text = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(&url, e))?;

        Ok(ApiResponse::from_text(status, &text))
    }

    fn map_transport_error(&self, url: &str, error: reqwest::Error) -> SandboxError {
        if error.is_timeout() {
            SandboxError::Timeout {
                endpoint: url.to_string(),
                seconds: self.config.timeout.as_secs(),
            }
        } else if error.is_connect() {
            SandboxError::Connection {
                endpoint: url.to_string(),
                message: error.to_string(),
            }
        } else {
            SandboxError::Http {
                endpoint: url.to_string(),
                message: error.to_string(),
            }
        }
    }
}
