//! Configuration types for the sandbox
//!
//! ## Example Configuration (sandbox.yaml)
//!
//! ```yaml
//! api:
//!   baseUrl: https://reframe.example.com
//!   timeoutSecs: 30
//!
//! formatter:
//!   indentStyle: spaces
//!   indentSize: 2
//!   maxDepth: 512
//!
//! catalog:
//!   dataDir: website/static/data
//! ```

use anyhow::{Context, bail};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::ApiConfig;
use crate::xml::{Indent, XmlFormatOptions};

/// Environment variable that overrides `api.baseUrl`
pub const API_URL_ENV: &str = "REFRAME_API_URL";

/// Default API location when nothing is configured
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Default request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default directory holding the catalog JSON files
pub const DEFAULT_DATA_DIR: &str = "static/data";

/// Top-level configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SandboxConfig {
    /// Reframe API connection settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api: Option<ApiConfiguration>,

    /// XML formatter settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatter: Option<FormatterConfiguration>,

    /// Scenario catalog settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<CatalogConfiguration>,
}

/// Reframe API configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfiguration {
    /// Base URL of the Reframe API
    #[schemars(description = "Base URL of the Reframe API (default: http://localhost:3000)")]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[schemars(description = "Request timeout in seconds (default: 30)")]
    pub timeout_secs: Option<u64>,
}

/// Indent style for formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum IndentStyle {
    /// Use spaces for indentation
    Spaces,
    /// Use tabs for indentation
    Tabs,
}

/// Formatter configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormatterConfiguration {
    #[schemars(description = "Indentation style: 'spaces' or 'tabs'")]
    pub indent_style: Option<IndentStyle>,

    #[schemars(description = "Number of spaces per nesting level (default: 2)")]
    pub indent_size: Option<usize>,

    #[schemars(
        description = "Deepest nesting level to format; deeper documents are shown unformatted (default: unlimited)"
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

/// Catalog configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogConfiguration {
    #[schemars(description = "Directory containing the dropdown/inventory JSON files")]
    pub data_dir: Option<String>,
}

impl SandboxConfig {
    /// Load configuration from a `.json`, `.toml`, `.yaml` or `.yml` file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;

        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            _ => bail!("Unsupported file extension (expected .json, .toml, .yaml or .yml)"),
        };
        Ok(config)
    }

    /// Apply overrides from the environment (`REFRAME_API_URL`)
    pub fn apply_env_overrides(&mut self) {
        self.apply_api_url(std::env::var(API_URL_ENV).ok());
    }

    /// Override the API base URL if a non-empty value is given
    pub fn apply_api_url(&mut self, url: Option<String>) {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.api.get_or_insert_with(Default::default).base_url = Some(url);
        }
    }

    /// Resolved API settings
    pub fn api_config(&self) -> ApiConfig {
        let api = self.api.clone().unwrap_or_default();
        ApiConfig {
            base_url: api.base_url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            timeout: Duration::from_secs(api.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        }
    }

    /// Resolved formatter settings
    pub fn formatter_options(&self) -> XmlFormatOptions {
        XmlFormatOptions::from(&self.formatter.clone().unwrap_or_default())
    }

    /// Resolved catalog data directory
    pub fn data_dir(&self) -> PathBuf {
        self.catalog
            .as_ref()
            .and_then(|c| c.data_dir.as_deref())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }
}

impl From<&FormatterConfiguration> for XmlFormatOptions {
    fn from(config: &FormatterConfiguration) -> Self {
        let indent = match config.indent_style {
            Some(IndentStyle::Tabs) => Indent::Tabs,
            Some(IndentStyle::Spaces) | None => Indent::Spaces(config.indent_size.unwrap_or(2)),
        };
        XmlFormatOptions {
            indent,
            max_depth: config.max_depth,
        }
    }
}
