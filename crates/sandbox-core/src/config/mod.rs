//! Configuration system for the sandbox
//!
//! Configuration is optional. When no file is given explicitly, the loader
//! searches the current directory and its parents for one of
//! `.sandboxrc.json`, `.sandboxrc.toml`, `sandbox.yaml`, `sandbox.yml` or
//! `sandbox.json`.
//!
//! Precedence, lowest first: built-in defaults, the config file, the
//! `REFRAME_API_URL` environment variable, command-line flags.
//!
//! ```json
//! {
//!   "api": { "baseUrl": "http://localhost:3000", "timeoutSecs": 30 },
//!   "formatter": { "indentStyle": "spaces", "indentSize": 2 },
//!   "catalog": { "dataDir": "static/data" }
//! }
//! ```

mod loader;
mod sandbox_config;

pub use loader::{CONFIG_FILE_NAMES, ConfigLoader, Result};
pub use sandbox_config::{
    API_URL_ENV, ApiConfiguration, CatalogConfiguration, DEFAULT_API_URL, DEFAULT_DATA_DIR,
    DEFAULT_TIMEOUT_SECS, FormatterConfiguration, IndentStyle, SandboxConfig,
};

/// JSON Schema for the configuration file
pub fn config_schema() -> serde_json::Value {
    serde_json::to_value(schemars::schema_for!(SandboxConfig)).unwrap_or_default()
}
