//! Configuration commands

use sandbox_core::config::{
    ApiConfiguration, CatalogConfiguration, ConfigLoader, DEFAULT_API_URL, DEFAULT_DATA_DIR,
    DEFAULT_TIMEOUT_SECS, FormatterConfiguration, IndentStyle, config_schema,
};
use sandbox_core::json::to_pretty;
use sandbox_core::{Indent, Result, SandboxConfig, SandboxError};
use std::path::PathBuf;
use tracing::{debug, error};

use super::load_config;
use crate::{ConfigFormat, GlobalArgs};

/// Starting configuration with every setting spelled out
fn default_config() -> SandboxConfig {
    SandboxConfig {
        api: Some(ApiConfiguration {
            base_url: Some(DEFAULT_API_URL.to_string()),
            timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
        }),
        formatter: Some(FormatterConfiguration {
            indent_style: Some(IndentStyle::Spaces),
            indent_size: Some(2),
            max_depth: None,
        }),
        catalog: Some(CatalogConfiguration {
            data_dir: Some(DEFAULT_DATA_DIR.to_string()),
        }),
    }
}

/// Config init command implementation
pub fn init_command(format: ConfigFormat, force: bool) -> Result<()> {
    debug!("Initializing configuration file with format: {:?}", format);

    let filename = match format {
        ConfigFormat::Json => ".sandboxrc.json",
        ConfigFormat::Toml => ".sandboxrc.toml",
        ConfigFormat::Yaml => "sandbox.yaml",
    };
    let config_path = PathBuf::from(filename);

    if config_path.exists() && !force {
        return Err(SandboxError::config_error(format!(
            "Configuration file '{filename}' already exists. Use --force to overwrite"
        )));
    }

    let config = default_config();
    let content = match format {
        ConfigFormat::Json => serde_json::to_string_pretty(&config).map_err(|e| {
            SandboxError::config_error(format!("Failed to serialize JSON: {e}"))
        })?,
        ConfigFormat::Toml => toml::to_string_pretty(&config).map_err(|e| {
            SandboxError::config_error(format!("Failed to serialize TOML: {e}"))
        })?,
        ConfigFormat::Yaml => serde_yaml::to_string(&config).map_err(|e| {
            SandboxError::config_error(format!("Failed to serialize YAML: {e}"))
        })?,
    };

    std::fs::write(&config_path, content).map_err(|e| SandboxError::io_error(&config_path, e))?;

    println!("✅ Created configuration file: {filename}");
    println!("   Edit the file to point the sandbox at your Reframe API.");

    Ok(())
}

/// Config validate command implementation
pub fn validate_command(path: Option<PathBuf>) -> Result<()> {
    debug!("Validating configuration file: {:?}", path);

    match ConfigLoader::load(path.as_deref(), None) {
        Ok(config) => {
            let api = config.api_config();
            println!("✅ Configuration is valid");
            println!("   API URL: {}", api.base_url);
            println!("   Timeout: {}s", api.timeout.as_secs());
            println!("   Catalog data: {}", config.data_dir().display());
            Ok(())
        }
        Err(e) => {
            error!("❌ Configuration validation failed: {}", e);
            Err(e)
        }
    }
}

/// Config show command implementation
pub fn show_command(resolved: bool, globals: &GlobalArgs) -> Result<()> {
    debug!("Showing configuration (resolved: {})", resolved);

    if !resolved {
        let config = ConfigLoader::load_or_default(globals.config.as_deref(), None)?;
        println!("Configuration:");
        println!("==============");
        println!("{}", to_pretty(&config));
        return Ok(());
    }

    let config = load_config(globals)?;
    let api = config.api_config();
    let formatter = config.formatter_options();
    let (indent_style, indent_size) = match formatter.indent {
        Indent::Spaces(n) => ("spaces", n),
        Indent::Tabs => ("tabs", 1),
    };

    println!("Resolved Configuration:");
    println!("======================");
    println!(
        "{}",
        to_pretty(&serde_json::json!({
            "api": {
                "baseUrl": api.base_url,
                "timeoutSecs": api.timeout.as_secs(),
            },
            "formatter": {
                "indentStyle": indent_style,
                "indentSize": indent_size,
                "maxDepth": formatter.max_depth,
            },
            "catalog": {
                "dataDir": config.data_dir(),
            },
        }))
    );

    Ok(())
}

/// Print the configuration JSON Schema
pub fn schema_command() -> Result<()> {
    println!("{}", to_pretty(&config_schema()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let config = default_config();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: SandboxConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
