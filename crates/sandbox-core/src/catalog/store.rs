//! Memoizing catalog loader

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, error};

use super::types::{DropdownData, DropdownOption, MessageTypeOption};
use crate::api::MessageFamily;
use crate::error::SandboxError;
use crate::result::Result;

/// Which dropdown catalog to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    SwiftMt,
    Mx,
    /// Transformation scenarios, keyed by direction (`forward`, `reverse`)
    Reframe,
}

impl CatalogKind {
    pub const ALL: [CatalogKind; 3] = [CatalogKind::SwiftMt, CatalogKind::Mx, CatalogKind::Reframe];

    pub fn file_name(&self) -> &'static str {
        match self {
            CatalogKind::SwiftMt => "swift_mt_dropdown.json",
            CatalogKind::Mx => "mx_dropdown.json",
            CatalogKind::Reframe => "reframe_dropdown.json",
        }
    }
}

impl From<MessageFamily> for CatalogKind {
    fn from(family: MessageFamily) -> Self {
        match family {
            MessageFamily::Mt => CatalogKind::SwiftMt,
            MessageFamily::Mx => CatalogKind::Mx,
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CatalogKind::SwiftMt => "Swift MT",
            CatalogKind::Mx => "MX",
            CatalogKind::Reframe => "Reframe",
        };
        f.write_str(name)
    }
}

/// Reads dropdown catalogs from a data directory and keeps them in memory.
///
/// Only successful loads are cached. A missing or broken file yields an
/// empty catalog, so callers always get something to list, and the next
/// call tries the file again.
#[derive(Debug)]
pub struct CatalogStore {
    data_dir: PathBuf,
    cache: DashMap<CatalogKind, Arc<DropdownData>>,
}

impl CatalogStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            cache: DashMap::new(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path_for(&self, kind: CatalogKind) -> PathBuf {
        self.data_dir.join(kind.file_name())
    }

    /// Load a catalog, reporting failures to the caller
    pub fn try_load(&self, kind: CatalogKind) -> Result<Arc<DropdownData>> {
        if let Some(cached) = self.cache.get(&kind) {
            return Ok(Arc::clone(cached.value()));
        }

        let path = self.path_for(kind);
        debug!("Loading {} catalog from {}", kind, path.display());

        let content =
            std::fs::read_to_string(&path).map_err(|e| SandboxError::io_error(&path, e))?;
        let data: DropdownData = serde_json::from_str(&content).map_err(|e| {
            SandboxError::catalog_error(format!(
                "Failed to load {} dropdown data from {}: {}",
                kind,
                path.display(),
                e
            ))
        })?;

        let data = Arc::new(data);
        self.cache.insert(kind, Arc::clone(&data));
        Ok(data)
    }

    /// Load a catalog, falling back to an empty one on failure
    pub fn load(&self, kind: CatalogKind) -> Arc<DropdownData> {
        self.try_load(kind).unwrap_or_else(|e| {
            error!("Error loading {} dropdown data: {}", kind, e);
            Arc::new(DropdownData::default())
        })
    }

    pub fn message_types(&self, kind: CatalogKind) -> Vec<MessageTypeOption> {
        self.load(kind).message_types.clone()
    }

    pub fn scenarios(&self, kind: CatalogKind, message_type: &str) -> Vec<DropdownOption> {
        self.load(kind).scenarios(message_type).to_vec()
    }

    pub fn description(&self, kind: CatalogKind, message_type: &str) -> Option<String> {
        self.load(kind)
            .message_type(message_type)
            .and_then(|t| t.description.clone())
    }

    pub fn find_scenario(
        &self,
        kind: CatalogKind,
        message_type: &str,
        value: &str,
    ) -> Option<DropdownOption> {
        self.load(kind)
            .scenarios(message_type)
            .iter()
            .find(|s| s.value == value)
            .cloned()
    }

    /// The scenario selected by default for a type
    pub fn first_scenario(&self, kind: CatalogKind, message_type: &str) -> Option<DropdownOption> {
        self.load(kind).scenarios(message_type).first().cloned()
    }

    pub fn is_cached(&self, kind: CatalogKind) -> bool {
        self.cache.contains_key(&kind)
    }

    /// Drop every cached catalog
    pub fn clear(&self) {
        self.cache.clear();
    }
}
