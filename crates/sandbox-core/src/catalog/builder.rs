//! Builds catalog files from test scenario directories
//!
//! A scenario directory holds one subdirectory per message type (`mt103`,
//! `pacs008`, ...). Each contains one JSON file per scenario plus an optional
//! `index.json` whose `description` describes the message type.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};
use walkdir::WalkDir;

use super::store::CatalogKind;
use super::types::{
    DropdownData, DropdownOption, FamilyInventory, FamilyStatistics, Inventory, MessageSummary,
    MessageTypeInventory, MessageTypeOption, Scenario, SummaryMessageTypes, SummaryStatistics,
};
use crate::api::MessageFamily;
use crate::error::SandboxError;
use crate::result::{Result, ResultExt};

const INDEX_FILE: &str = "index.json";

const MX_PREFIXES: [&str; 3] = ["camt", "pacs", "pain"];

/// Applied in order after title-casing
const DISPLAY_REPLACEMENTS: [(&str, &str); 16] = [
    ("Cbpr", "CBPR+"),
    ("Mt", "MT"),
    ("Stp", "STP"),
    ("Fx", "FX"),
    ("Fi ", "FI "),
    ("B2c", "B2C"),
    ("B2b", "B2B"),
    ("Saas", "SaaS"),
    ("Lei", "LEI"),
    ("Uetr", "UETR"),
    ("Cov ", "COV "),
    ("Iso", "ISO"),
    ("Xml", "XML"),
    ("Api", "API"),
    ("Kyc", "KYC"),
    ("Aml", "AML"),
];

pub const MT_INVENTORY_FILE: &str = "swift_mt_inventory.json";
pub const MX_INVENTORY_FILE: &str = "mx_inventory.json";
pub const SUMMARY_FILE: &str = "message_summary.json";

/// Dropdown data and full inventory for one message family
#[derive(Debug, Clone, PartialEq)]
pub struct FamilyCatalog {
    pub family: MessageFamily,
    pub dropdown: DropdownData,
    pub inventory: FamilyInventory,
}

impl FamilyCatalog {
    /// The inventory wrapped under its family key
    pub fn wrapped_inventory(&self) -> Inventory {
        match self.family {
            MessageFamily::Mt => Inventory {
                swift_mt_messages: Some(self.inventory.clone()),
                ..Default::default()
            },
            MessageFamily::Mx => Inventory {
                iso20022_mx_messages: Some(self.inventory.clone()),
                ..Default::default()
            },
        }
    }

    fn statistics(&self) -> FamilyStatistics {
        FamilyStatistics {
            message_types: self.dropdown.total_types,
            scenarios: self.dropdown.total_scenarios,
        }
    }
}

/// Human-readable name for a scenario file stem.
///
/// ```
/// use sandbox_core::catalog::format_display_name;
///
/// assert_eq!(format_display_name("cbpr_stp_compliant"), "CBPR+ STP Compliant");
/// ```
pub fn format_display_name(name: &str) -> String {
    let mut display = title_case(&name.replace('_', " "));
    for (from, to) in DISPLAY_REPLACEMENTS {
        display = display.replace(from, to);
    }
    display
}

/// Uppercase the first letter of every run of letters, lowercase the rest
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Message type name for a scenario subdirectory, or `None` to skip it
fn message_type_for(family: MessageFamily, dir_name: &str) -> Option<String> {
    match family {
        MessageFamily::Mt => dir_name
            .starts_with("mt")
            .then(|| dir_name.to_uppercase()),
        MessageFamily::Mx => MX_PREFIXES
            .iter()
            .find(|prefix| dir_name.starts_with(*prefix))
            .map(|prefix| format!("{}.{}", prefix, &dir_name[prefix.len()..])),
    }
}

fn inventory_description(family: MessageFamily) -> &'static str {
    match family {
        MessageFamily::Mt => "Swift MT Message Test Scenarios Inventory",
        MessageFamily::Mx => "ISO 20022 MX Message Test Scenarios Inventory",
    }
}

pub fn build_mt_catalog(dir: &Path) -> Result<FamilyCatalog> {
    build_family_catalog(MessageFamily::Mt, dir)
}

pub fn build_mx_catalog(dir: &Path) -> Result<FamilyCatalog> {
    build_family_catalog(MessageFamily::Mx, dir)
}

/// Scan a scenario directory for one family
pub fn build_family_catalog(family: MessageFamily, dir: &Path) -> Result<FamilyCatalog> {
    if !dir.is_dir() {
        return Err(SandboxError::catalog_error(format!(
            "Scenario directory does not exist: {}",
            dir.display()
        )));
    }

    let mut dropdown = DropdownData::default();
    let mut inventory = FamilyInventory {
        description: inventory_description(family).to_string(),
        ..Default::default()
    };

    for (type_dir, message_type) in list_type_dirs(family, dir)? {
        let description = read_description(&type_dir)
            .recoverable()?
            .unwrap_or_default();
        let scenario_files = list_scenario_files(&type_dir)?;
        debug!(
            "{}: {} scenarios in {}",
            message_type,
            scenario_files.len(),
            type_dir.display()
        );

        let scenarios: Vec<Scenario> = scenario_files
            .into_iter()
            .map(|file| {
                let name = file.trim_end_matches(".json").to_string();
                Scenario {
                    display_name: format_display_name(&name),
                    file,
                    name,
                }
            })
            .collect();

        dropdown.message_types.push(MessageTypeOption {
            value: message_type.clone(),
            label: message_type.clone(),
            description: Some(description.clone()),
        });
        dropdown.scenarios_by_type.insert(
            message_type.clone(),
            scenarios
                .iter()
                .map(|s| DropdownOption {
                    value: s.name.clone(),
                    label: s.display_name.clone(),
                    source: None,
                })
                .collect(),
        );
        inventory.message_types.insert(
            message_type,
            MessageTypeInventory {
                description,
                scenario_count: scenarios.len(),
                scenarios,
            },
        );
    }

    inventory.total_message_types = inventory.message_types.len();
    inventory.total_scenarios = inventory
        .message_types
        .values()
        .map(|t| t.scenario_count)
        .sum();
    dropdown.total_types = inventory.total_message_types;
    dropdown.total_scenarios = inventory.total_scenarios;

    Ok(FamilyCatalog {
        family,
        dropdown,
        inventory,
    })
}

/// Message type subdirectories, sorted by directory name
fn list_type_dirs(family: MessageFamily, dir: &Path) -> Result<Vec<(PathBuf, String)>> {
    let mut found = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| SandboxError::io_error(dir, std::io::Error::other(e)))?;
        if !entry.file_type().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if let Some(message_type) = message_type_for(family, &name) {
            found.push((entry.path().to_path_buf(), message_type));
        }
    }
    Ok(found)
}

/// Scenario file names (`*.json` except the index), sorted
fn list_scenario_files(type_dir: &Path) -> Result<Vec<String>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(type_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry =
            entry.map_err(|e| SandboxError::io_error(type_dir, std::io::Error::other(e)))?;
        let name = entry.file_name().to_string_lossy();
        if entry.file_type().is_file() && name.ends_with(".json") && name != INDEX_FILE {
            files.push(name.into_owned());
        }
    }
    Ok(files)
}

fn read_description(type_dir: &Path) -> Result<String> {
    let index_path = type_dir.join(INDEX_FILE);
    if !index_path.exists() {
        return Ok(String::new());
    }

    let content =
        std::fs::read_to_string(&index_path).map_err(|e| SandboxError::io_error(&index_path, e))?;
    let index: serde_json::Value = serde_json::from_str(&content).map_err(|e| {
        SandboxError::catalog_error(format!("Invalid {}: {}", index_path.display(), e))
    })?;

    Ok(index
        .get("description")
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default()
        .to_string())
}

/// Totals and type lists across both families
pub fn build_summary(
    mt: &FamilyCatalog,
    mx: &FamilyCatalog,
    generated_at: DateTime<Utc>,
) -> MessageSummary {
    let swift_mt = mt.statistics();
    let iso20022_mx = mx.statistics();

    MessageSummary {
        generated_at: generated_at.to_rfc3339(),
        statistics: SummaryStatistics {
            total_message_types: swift_mt.message_types + iso20022_mx.message_types,
            total_scenarios: swift_mt.scenarios + iso20022_mx.scenarios,
            swift_mt,
            iso20022_mx,
        },
        message_types: SummaryMessageTypes {
            swift_mt: mt.inventory.message_types.keys().cloned().collect(),
            iso20022_mx: mx.inventory.message_types.keys().cloned().collect(),
        },
    }
}

/// Write the dropdown, inventory and summary files. Returns the written paths.
pub fn write_catalogs(
    out_dir: &Path,
    mt: &FamilyCatalog,
    mx: &FamilyCatalog,
    summary: &MessageSummary,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir).map_err(|e| SandboxError::io_error(out_dir, e))?;

    let files: BTreeMap<&str, serde_json::Value> = BTreeMap::from([
        (CatalogKind::SwiftMt.file_name(), to_value(&mt.dropdown)?),
        (MT_INVENTORY_FILE, to_value(&mt.wrapped_inventory())?),
        (CatalogKind::Mx.file_name(), to_value(&mx.dropdown)?),
        (MX_INVENTORY_FILE, to_value(&mx.wrapped_inventory())?),
        (SUMMARY_FILE, to_value(summary)?),
    ]);

    let mut written = Vec::with_capacity(files.len());
    for (name, value) in files {
        let path = out_dir.join(name);
        let content = serde_json::to_string_pretty(&value)?;
        std::fs::write(&path, content).map_err(|e| SandboxError::io_error(&path, e))?;
        info!("Wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}

fn to_value<T: Serialize>(value: &T) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(value)?)
}
