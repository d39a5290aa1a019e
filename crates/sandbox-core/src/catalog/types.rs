//! Catalog file formats

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One selectable scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownOption {
    /// Name the API knows the scenario by
    pub value: String,
    /// Display name
    pub label: String,
    /// Message type to generate from, for transformation scenarios
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// One selectable message type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageTypeOption {
    pub value: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Contents of a `*_dropdown.json` file
///
/// The transformation catalog names its type list `transformationTypes`;
/// both spellings are accepted on read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropdownData {
    #[serde(default, alias = "transformationTypes")]
    pub message_types: Vec<MessageTypeOption>,
    #[serde(default)]
    pub scenarios_by_type: BTreeMap<String, Vec<DropdownOption>>,
    #[serde(default)]
    pub total_types: usize,
    #[serde(default)]
    pub total_scenarios: usize,
}

impl DropdownData {
    pub fn is_empty(&self) -> bool {
        self.message_types.is_empty() && self.scenarios_by_type.is_empty()
    }

    pub fn message_type(&self, value: &str) -> Option<&MessageTypeOption> {
        self.message_types.iter().find(|t| t.value == value)
    }

    /// Scenarios of a type; empty when the type is unknown
    pub fn scenarios(&self, message_type: &str) -> &[DropdownOption] {
        self.scenarios_by_type
            .get(message_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Scenario entry in a full inventory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub file: String,
    pub name: String,
    pub display_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageTypeInventory {
    pub description: String,
    pub scenario_count: usize,
    pub scenarios: Vec<Scenario>,
}

/// Every scenario of one message family
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyInventory {
    pub description: String,
    pub total_message_types: usize,
    pub total_scenarios: usize,
    pub message_types: BTreeMap<String, MessageTypeInventory>,
}

/// Contents of a `*_inventory.json` file; exactly one family is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swift_mt_messages: Option<FamilyInventory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso20022_mx_messages: Option<FamilyInventory>,
}

impl Inventory {
    pub fn family(&self) -> Option<&FamilyInventory> {
        self.swift_mt_messages
            .as_ref()
            .or(self.iso20022_mx_messages.as_ref())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyStatistics {
    pub message_types: usize,
    pub scenarios: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub total_message_types: usize,
    pub total_scenarios: usize,
    pub swift_mt: FamilyStatistics,
    pub iso20022_mx: FamilyStatistics,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryMessageTypes {
    pub swift_mt: Vec<String>,
    pub iso20022_mx: Vec<String>,
}

/// Contents of `message_summary.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSummary {
    pub generated_at: String,
    pub statistics: SummaryStatistics,
    pub message_types: SummaryMessageTypes,
}
