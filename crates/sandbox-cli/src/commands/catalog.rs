//! Catalog browsing commands

use colored::*;
use sandbox_core::json::to_pretty;
use sandbox_core::{CatalogKind, CatalogStore, Result};

use super::load_config;
use crate::output::{print_message_types, print_scenarios};
use crate::{GlobalArgs, ReportFormat};

fn open_store(globals: &GlobalArgs) -> Result<CatalogStore> {
    let config = load_config(globals)?;
    Ok(CatalogStore::new(config.data_dir()))
}

/// Catalog a message type belongs to: directions are transformation
/// scenarios, `MT...` is Swift MT, anything else ISO 20022
fn detect_kind(message_type: &str) -> CatalogKind {
    match message_type {
        "forward" | "reverse" => CatalogKind::Reframe,
        t if t.to_ascii_uppercase().starts_with("MT") => CatalogKind::SwiftMt,
        _ => CatalogKind::Mx,
    }
}

/// List message types of a catalog
pub fn types_command(kind: CatalogKind, format: ReportFormat, globals: &GlobalArgs) -> Result<()> {
    let store = open_store(globals)?;
    let data = store.try_load(kind)?;

    match format {
        ReportFormat::Json => println!("{}", to_pretty(&data.message_types)),
        ReportFormat::Human => {
            print_message_types(&format!("{kind} message types"), &data.message_types);
            println!(
                "\n{} types, {} scenarios",
                data.total_types, data.total_scenarios
            );
        }
    }

    Ok(())
}

/// List scenarios of a message type
pub fn scenarios_command(
    message_type: &str,
    kind: Option<CatalogKind>,
    format: ReportFormat,
    globals: &GlobalArgs,
) -> Result<()> {
    let kind = kind.unwrap_or_else(|| detect_kind(message_type));
    let store = open_store(globals)?;
    store.try_load(kind)?;

    let scenarios = store.scenarios(kind, message_type);
    match format {
        ReportFormat::Json => println!("{}", to_pretty(&scenarios)),
        ReportFormat::Human if scenarios.is_empty() => {
            println!("No scenarios found for {message_type} in the {kind} catalog");
        }
        ReportFormat::Human => {
            print_scenarios(&format!("Scenarios for {message_type}"), &scenarios);
        }
    }

    Ok(())
}

/// Show one message type: description, default scenario and scenario list
pub fn describe_command(
    message_type: &str,
    kind: Option<CatalogKind>,
    format: ReportFormat,
    globals: &GlobalArgs,
) -> Result<()> {
    let kind = kind.unwrap_or_else(|| detect_kind(message_type));
    let store = open_store(globals)?;
    let data = store.try_load(kind)?;

    if data.message_type(message_type).is_none() {
        return Err(sandbox_core::SandboxError::catalog_error(format!(
            "Unknown message type '{message_type}' in the {kind} catalog"
        )));
    }

    let description = store.description(kind, message_type);
    let default_scenario = store.first_scenario(kind, message_type);
    let scenarios = store.scenarios(kind, message_type);

    match format {
        ReportFormat::Json => println!(
            "{}",
            to_pretty(&serde_json::json!({
                "messageType": message_type,
                "description": description,
                "defaultScenario": default_scenario.map(|s| s.value),
                "scenarios": scenarios,
            }))
        ),
        ReportFormat::Human => {
            println!("{}", message_type.bold());
            if let Some(description) = description.filter(|d| !d.is_empty()) {
                println!("{description}");
            }
            if let Some(default_scenario) = default_scenario {
                println!(
                    "Default scenario: {} ({})",
                    default_scenario.value.cyan(),
                    default_scenario.label
                );
            }
            println!();
            print_scenarios("Scenarios", &scenarios);
        }
    }

    Ok(())
}
