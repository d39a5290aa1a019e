//! Inventory build command

use colored::*;
use sandbox_core::catalog::{build_mt_catalog, build_mx_catalog, build_summary, write_catalogs};
use sandbox_core::Result;
use std::path::{Path, PathBuf};
use tracing::info;

use super::load_config;
use crate::GlobalArgs;

/// Scan both scenario directories and write the catalog files
pub fn build_command(
    mt_dir: &Path,
    mx_dir: &Path,
    out: Option<PathBuf>,
    globals: &GlobalArgs,
) -> Result<()> {
    let out_dir = match out {
        Some(dir) => dir,
        None => load_config(globals)?.data_dir(),
    };

    info!("Scanning Swift MT scenarios in {}", mt_dir.display());
    let mt = build_mt_catalog(mt_dir)?;
    info!("Scanning ISO 20022 scenarios in {}", mx_dir.display());
    let mx = build_mx_catalog(mx_dir)?;

    let summary = build_summary(&mt, &mx, chrono::Utc::now());
    let written = write_catalogs(&out_dir, &mt, &mx, &summary)?;

    println!("{} Files generated in {}", "✓".green(), out_dir.display());
    for path in &written {
        if let Some(name) = path.file_name() {
            println!("  - {}", name.to_string_lossy());
        }
    }

    println!("\n{}", "Statistics:".bold());
    println!(
        "  Swift MT: {} types, {} scenarios",
        summary.statistics.swift_mt.message_types, summary.statistics.swift_mt.scenarios
    );
    println!(
        "  ISO 20022 MX: {} types, {} scenarios",
        summary.statistics.iso20022_mx.message_types, summary.statistics.iso20022_mx.scenarios
    );
    println!(
        "  Total: {} types, {} scenarios",
        summary.statistics.total_message_types, summary.statistics.total_scenarios
    );

    Ok(())
}
