//! Reframe API access
//!
//! The Reframe service generates, validates and transforms payment
//! messages. All three operations are JSON `POST`s against a configurable
//! base URL; see [`ReframeClient`].

mod client;
mod request;
mod response;

use std::time::Duration;

use serde::Serialize;

pub use client::ReframeClient;
pub use request::{
    GenerateRequest, MessageFamily, TransformRequest, ValidateOptions, ValidateRequest,
};
pub use response::{ApiResponse, GENERIC_VALIDATION_FAILURE, ValidationIssue, ValidationVerdict};

use crate::config::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
use crate::json::to_pretty;

/// API endpoints, relative to the base URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Generate,
    Validate,
    Transform,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Generate => "/api/generate",
            Endpoint::Validate => "/api/validate",
            Endpoint::Transform => "/api/transform",
        }
    }
}

/// Where the API lives and how long to wait for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL of an endpoint
    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), endpoint.path())
    }
}

/// Render a request the way it goes over the wire, for display
pub fn describe_request<B: Serialize + ?Sized>(url: &str, body: &B) -> String {
    format!(
        "POST {}\nContent-Type: application/json\n\n{}",
        url,
        to_pretty(body)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_trims_trailing_slash() {
        let config = ApiConfig::new("https://reframe.example.com/");
        assert_eq!(
            config.endpoint_url(Endpoint::Transform),
            "https://reframe.example.com/api/transform"
        );
        assert_eq!(
            ApiConfig::default().endpoint_url(Endpoint::Generate),
            "http://localhost:3000/api/generate"
        );
    }

    #[test]
    fn test_describe_request() {
        let request = GenerateRequest::new(MessageFamily::Mt, "MT103", "standard");
        let text = describe_request("http://localhost:3000/api/generate", &request);
        assert_eq!(
            text,
            "POST http://localhost:3000/api/generate\n\
             Content-Type: application/json\n\
             \n\
             {\n  \"message_type\": \"MT103\",\n  \"scenario\": \"standard\",\n  \"debug\": false\n}"
        );
    }
}
