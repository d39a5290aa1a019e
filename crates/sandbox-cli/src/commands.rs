//! Command implementations

pub mod api;
pub mod catalog;
pub mod config;
pub mod inventory;

use colored::*;
use rayon::prelude::*;
use sandbox_core::config::ConfigLoader;
use sandbox_core::{
    Indent, Result, SandboxConfig, SandboxError, XmlFormatOptions, format_json, format_xml_with,
    is_formatted,
};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, warn};

use crate::GlobalArgs;
use crate::output::{render_diff, utils};

/// Load the configuration and apply global CLI overrides
pub fn load_config(globals: &GlobalArgs) -> Result<SandboxConfig> {
    let mut config = ConfigLoader::load_or_default(globals.config.as_deref(), None)?;
    config.apply_api_url(globals.api_url.clone());
    if let Some(dir) = &globals.data_dir {
        config.catalog.get_or_insert_with(Default::default).data_dir =
            Some(dir.display().to_string());
    }
    Ok(config)
}

/// Read a message from a file, or from stdin when no file is given
pub fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => {
            std::fs::read_to_string(path).map_err(|e| SandboxError::io_error(path, e))
        }
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| SandboxError::io_error("<stdin>", e))?;
            Ok(buffer)
        }
    }
}

/// Flags of the `fmt` command
pub struct FormatArgs {
    pub write: bool,
    pub check: bool,
    pub diff: bool,
    pub indent_size: Option<usize>,
    pub tabs: bool,
    pub json: bool,
}

struct FormattedFile {
    path: PathBuf,
    original: String,
    formatted: String,
}

impl FormattedFile {
    fn changed(&self) -> bool {
        self.original != self.formatted
    }
}

/// Format command implementation
pub fn format_command(paths: Vec<PathBuf>, args: FormatArgs, globals: &GlobalArgs) -> Result<()> {
    debug!("Running format command on paths: {:?}", paths);

    let config = load_config(globals)?;
    let mut options = config.formatter_options();
    if args.tabs {
        options.indent = Indent::Tabs;
    } else if let Some(size) = args.indent_size {
        options.indent = Indent::Spaces(size);
    }

    if reads_stdin(&paths)? {
        return format_stdin(&args, &options);
    }

    let files = collect_files(&paths, args.json)?;
    if files.is_empty() {
        println!("No XML or JSON files found in specified paths.");
        return Ok(());
    }
    debug!("Found {} files to format", files.len());

    let start_time = Instant::now();

    let results = files
        .par_iter()
        .map(|path| -> Result<FormattedFile> {
            let original = read_input(Some(path))?;
            require_content(&original, &path.display().to_string())?;
            let as_json = args.json || has_extension(path, "json");
            let formatted = format_text(&original, as_json, &options, &path.display().to_string());
            Ok(FormattedFile {
                path: path.clone(),
                original,
                formatted,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let changed: Vec<&FormattedFile> = results.iter().filter(|f| f.changed()).collect();

    if !(args.write || args.check || args.diff) {
        for file in &results {
            if results.len() > 1 {
                println!("{}", format!("==> {} <==", file.path.display()).bold());
            }
            print!("{}", file.formatted);
        }
        return Ok(());
    }

    if args.diff {
        for file in &changed {
            println!("\n{}", file.path.display().to_string().bold());
            print!("{}", render_diff(&file.original, &file.formatted));
        }
    }

    if args.write {
        for file in &changed {
            std::fs::write(&file.path, &file.formatted)
                .map_err(|e| SandboxError::io_error(&file.path, e))?;
        }
        println!("{} checked", utils::plural(results.len(), "file"));
        if changed.is_empty() {
            println!("{} All files are formatted correctly", "✓".green());
        } else {
            println!(
                "{} Applied formatting to {}",
                "✓".green(),
                utils::plural(changed.len(), "file")
            );
        }
    } else if args.check {
        for file in &changed {
            println!("Would reformat: {}", file.path.display());
        }
        if changed.is_empty() {
            println!("{} All files are formatted correctly", "✓".green());
        } else {
            println!(
                "{} {} need formatting",
                "✗".red(),
                utils::plural(changed.len(), "file")
            );
        }
    }

    println!(
        "Completed in {}",
        utils::format_duration(start_time.elapsed())
    );

    if args.check && !changed.is_empty() {
        std::process::exit(1);
    }

    Ok(())
}

/// No paths, or a lone `-`, means stdin
fn reads_stdin(paths: &[PathBuf]) -> Result<bool> {
    let dashes = paths.iter().filter(|p| p.as_os_str() == "-").count();
    match (dashes, paths.len()) {
        (0, 0) => Ok(true),
        (0, _) => Ok(false),
        (1, 1) => Ok(true),
        _ => Err(SandboxError::invalid_input(
            "'-' (stdin) cannot be combined with other paths",
        )),
    }
}

fn format_stdin(args: &FormatArgs, options: &XmlFormatOptions) -> Result<()> {
    if args.write {
        return Err(SandboxError::invalid_input(
            "--write needs file paths, stdin cannot be written back",
        ));
    }

    let input = read_input(None)?;
    require_content(&input, "<stdin>")?;
    let formatted = format_text(&input, args.json, options, "<stdin>");

    if !(args.check || args.diff) {
        print!("{}", formatted);
        return Ok(());
    }

    let changed = if args.json {
        formatted != input
    } else {
        !is_formatted(&input, options)
    };

    if args.diff && changed {
        print!("{}", render_diff(&input, &formatted));
    }

    if args.check {
        if changed {
            println!("Would reformat: <stdin>");
            std::process::exit(1);
        }
        println!("{} <stdin> is formatted correctly", "✓".green());
    }

    Ok(())
}

/// Empty documents are rejected before formatting
fn require_content(input: &str, name: &str) -> Result<()> {
    if input.trim().is_empty() {
        return Err(SandboxError::invalid_input(format!(
            "Please provide a message to format: {} is empty",
            name
        )));
    }
    Ok(())
}

/// Format one document, keeping it unchanged when it cannot be formatted
fn format_text(input: &str, as_json: bool, options: &XmlFormatOptions, name: &str) -> String {
    if as_json {
        return match serde_json::from_str::<serde_json::Value>(input) {
            Ok(value) => format!("{}\n", format_json(&value)),
            Err(e) => {
                warn!("{} is not valid JSON, leaving it unchanged: {}", name, e);
                input.to_string()
            }
        };
    }

    let outcome = format_xml_with(input, options);
    if let Some(e) = &outcome.error {
        warn!("Could not format {}: {}", name, e);
    }
    outcome.into_output()
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|ext| ext == extension)
}

/// Expand files, directories and glob patterns into a sorted file list
fn collect_files(paths: &[PathBuf], json: bool) -> Result<Vec<PathBuf>> {
    let extension = if json { "json" } else { "xml" };
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            let pattern = path.join("**").join(format!("*.{extension}"));
            files.extend(glob_files(&pattern.to_string_lossy(), path)?);
        } else if path.to_string_lossy().contains('*') {
            files.extend(glob_files(&path.to_string_lossy(), path)?);
        } else {
            return Err(SandboxError::io_error(
                path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such file or directory"),
            ));
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn glob_files(pattern: &str, origin: &Path) -> Result<Vec<PathBuf>> {
    let entries = glob::glob(pattern).map_err(|e| SandboxError::IoError {
        path: origin.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, e),
    })?;

    Ok(entries.filter_map(|entry| entry.ok()).filter(|p| p.is_file()).collect())
}
