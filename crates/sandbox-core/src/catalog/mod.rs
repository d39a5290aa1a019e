//! Message type and scenario catalogs
//!
//! Catalogs are static JSON files listing which message types and test
//! scenarios the Reframe API can generate. [`CatalogStore`] reads them;
//! [`build_mt_catalog`] and [`build_mx_catalog`] produce them from scenario
//! directories.

mod builder;
mod store;
mod types;

pub use builder::{
    FamilyCatalog, MT_INVENTORY_FILE, MX_INVENTORY_FILE, SUMMARY_FILE, build_family_catalog,
    build_mt_catalog, build_mx_catalog, build_summary, format_display_name, write_catalogs,
};
pub use store::{CatalogKind, CatalogStore};
pub use types::{
    DropdownData, DropdownOption, FamilyInventory, FamilyStatistics, Inventory, MessageSummary,
    MessageTypeInventory, MessageTypeOption, Scenario, SummaryMessageTypes, SummaryStatistics,
};
