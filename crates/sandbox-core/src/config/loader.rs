//! Configuration file discovery and loading

use super::sandbox_config::SandboxConfig;
use crate::error::SandboxError;
use std::path::{Path, PathBuf};

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, SandboxError>;

/// Config file names, in priority order
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".sandboxrc.json",
    ".sandboxrc.toml",
    "sandbox.yaml",
    "sandbox.yml",
    "sandbox.json",
];

/// Configuration loader for discovering and loading config files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Auto-discover a config file by traversing upward from `start_path`
    ///
    /// Each directory is checked for [`CONFIG_FILE_NAMES`] in order, stopping
    /// at the first match or at the filesystem root.
    pub fn auto_discover(start_path: &Path) -> Result<Option<PathBuf>> {
        let mut current = start_path
            .canonicalize()
            .map_err(|e| SandboxError::config_error(format!("Invalid path: {e}")))?;

        loop {
            for filename in CONFIG_FILE_NAMES {
                let config_path = current.join(filename);
                if config_path.is_file() {
                    tracing::debug!("Found config: {}", config_path.display());
                    return Ok(Some(config_path));
                }
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => break,
            }
        }

        Ok(None)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<SandboxConfig> {
        SandboxConfig::load(path).map_err(|e| {
            SandboxError::config_error(format!(
                "Failed to load config from '{}': {:#}",
                path.display(),
                e
            ))
        })
    }

    /// Load config from an explicit path, or auto-discover one
    ///
    /// Fails when an explicit path does not exist or when discovery finds
    /// nothing.
    pub fn load(custom_path: Option<&Path>, start_dir: Option<&Path>) -> Result<SandboxConfig> {
        match Self::resolve(custom_path, start_dir)? {
            Some(path) => Self::load_from_file(&path),
            None => Err(SandboxError::config_error(
                "No config file found (.sandboxrc.json, .sandboxrc.toml, sandbox.yaml, sandbox.yml or sandbox.json). Run 'sandbox config init' to create one",
            )),
        }
    }

    /// Like [`ConfigLoader::load`], but defaults when discovery finds nothing
    ///
    /// Environment overrides are applied in both cases.
    pub fn load_or_default(
        custom_path: Option<&Path>,
        start_dir: Option<&Path>,
    ) -> Result<SandboxConfig> {
        let mut config = match Self::resolve(custom_path, start_dir)? {
            Some(path) => Self::load_from_file(&path)?,
            None => {
                tracing::debug!("No config file found, using defaults");
                SandboxConfig::default()
            }
        };
        config.apply_env_overrides();
        Ok(config)
    }

    fn resolve(custom_path: Option<&Path>, start_dir: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = custom_path {
            if !path.exists() {
                return Err(SandboxError::config_error(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Ok(Some(path.to_path_buf()));
        }

        Self::auto_discover(start_dir.unwrap_or_else(|| Path::new(".")))
    }
}
