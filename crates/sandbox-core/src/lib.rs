//! Reframe Sandbox Core
//!
//! Building blocks for working with the Reframe financial messaging API:
//! an XML pretty-printer for ISO 20022 payloads, JSON formatting, the
//! message type and scenario catalogs, and an HTTP client for the API's
//! generate, validate and transform endpoints.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod json;
pub mod result;
pub mod xml;

// Re-export commonly used types
pub use api::{
    ApiConfig, ApiResponse, Endpoint, GenerateRequest, MessageFamily, ReframeClient,
    TransformRequest, ValidateRequest, ValidationIssue, ValidationVerdict, describe_request,
};
pub use catalog::{CatalogKind, CatalogStore, DropdownData, DropdownOption, MessageTypeOption};
pub use config::{ConfigLoader, SandboxConfig};
pub use error::{ErrorKind, SandboxError};
pub use json::{format_json, format_json_str};
pub use result::{Result, ResultExt};
pub use xml::{
    Indent, XmlFormatError, XmlFormatOptions, XmlFormatOutcome, format_xml, format_xml_with,
    is_formatted, try_format_xml,
};

/// Initialize the tracing subscriber for logging
///
/// Logs go to stderr so formatted output on stdout stays clean.
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sandbox=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
