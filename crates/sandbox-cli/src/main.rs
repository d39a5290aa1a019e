//! Reframe Sandbox CLI
//!
//! Command-line interface for formatting, generating, validating and
//! transforming SWIFT MT and ISO 20022 payment messages

mod commands;
mod output;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use sandbox_core::{CatalogKind, ErrorKind, MessageFamily, Result, init_tracing};
use std::io;
use std::path::PathBuf;
use tracing::error;

#[derive(Parser)]
#[command(name = "sandbox")]
#[command(about = "Reframe sandbox: format, generate, validate and transform payment messages")]
#[command(version = sandbox_core::VERSION)]
#[command(
    long_about = "The Reframe sandbox works with SWIFT MT and ISO 20022 (MX) messages through the Reframe API.\n\
It pretty-prints XML and JSON locally and browses the bundled scenario catalogs.\n\
\n\
Examples:\n  \
sandbox fmt message.xml              # Pretty-print an XML message\n  \
sandbox generate -t MT103            # Generate a sample MT103\n  \
sandbox validate message.xml         # Validate a message\n  \
sandbox transform mt103.txt          # Transform MT to MX\n  \
sandbox catalog scenarios MT103      # List MT103 scenarios"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(
        short,
        long,
        global = true,
        help = "Path to configuration file (.sandboxrc.json/.sandboxrc.toml/sandbox.yaml)"
    )]
    config: Option<PathBuf>,

    /// Reframe API base URL
    #[arg(
        long,
        global = true,
        env = "REFRAME_API_URL",
        help = "Base URL of the Reframe API (default: http://localhost:3000)"
    )]
    api_url: Option<String>,

    /// Catalog data directory
    #[arg(
        long,
        global = true,
        help = "Directory containing the catalog JSON files (default: static/data)"
    )]
    data_dir: Option<PathBuf>,

    /// Verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Number of threads to use for parallel processing
    #[arg(
        short = 'j',
        long,
        global = true,
        help = "Number of threads (default: number of CPU cores)"
    )]
    threads: Option<usize>,

    /// Generate shell completion script
    #[arg(
        long,
        value_enum,
        help = "Generate completion script for specified shell"
    )]
    generate_completion: Option<Shell>,
}

#[derive(Subcommand)]
enum Commands {
    /// Pretty-print XML (or JSON) messages
    #[command(alias = "format")]
    Fmt {
        /// Files, directories or glob patterns to format
        #[arg(help = "Files or directories to format (default: read stdin)")]
        paths: Vec<PathBuf>,

        /// Write formatted output back to the files
        #[arg(long, help = "Write formatted output back to the files")]
        write: bool,

        /// Check formatting without modifying files
        #[arg(
            long,
            help = "Check if files are formatted without modifying them",
            conflicts_with = "write"
        )]
        check: bool,

        /// Show diff of proposed changes without applying them
        #[arg(long, help = "Show diff of proposed formatting changes")]
        diff: bool,

        /// Indentation size
        #[arg(long, help = "Number of spaces per nesting level")]
        indent_size: Option<usize>,

        /// Indent with tabs
        #[arg(long, help = "Indent with tabs instead of spaces")]
        tabs: bool,

        /// Treat input as JSON
        #[arg(long, help = "Treat input as JSON (default: by extension, else XML)")]
        json: bool,
    },

    /// Generate a sample message through the Reframe API
    #[command(alias = "gen")]
    Generate {
        /// Message family
        #[arg(short, long, default_value = "mt", help = "Message family")]
        family: Family,

        /// Message type, e.g. MT103 or pacs.008
        #[arg(
            short = 't',
            long = "type",
            help = "Message type (default: taken from the transformation scenario)"
        )]
        message_type: Option<String>,

        /// Scenario name
        #[arg(short, long, help = "Scenario name (default: first scenario of the type)")]
        scenario: Option<String>,

        /// Print the HTTP request before sending it
        #[arg(long, help = "Print the API request")]
        show_request: bool,
    },

    /// Validate a message through the Reframe API
    Validate {
        /// Message file
        #[arg(help = "Message file (default: read stdin)")]
        file: Option<PathBuf>,

        /// Message family
        #[arg(short, long, help = "Message family (default: detected from the message)")]
        family: Option<Family>,

        /// Include the canonical JSON rendition
        #[arg(long, help = "Include the canonical JSON rendition")]
        canonical: bool,

        /// Run business rules in addition to schema checks
        #[arg(long, help = "Run business validation rules")]
        business_validation: bool,

        /// Output format
        #[arg(long, default_value = "human", help = "Output format")]
        format: ReportFormat,

        /// Print the HTTP request before sending it
        #[arg(long, help = "Print the API request")]
        show_request: bool,
    },

    /// Transform a message between MT and MX through the Reframe API
    Transform {
        /// Message file
        #[arg(help = "Message file (default: read stdin, or generate from --scenario)")]
        file: Option<PathBuf>,

        /// Generate the input from a transformation scenario
        #[arg(
            short,
            long,
            conflicts_with = "file",
            help = "Generate the input message from this transformation scenario"
        )]
        scenario: Option<String>,

        /// Scenario direction when generating the input
        #[arg(long, default_value = "forward", help = "Scenario direction")]
        direction: Direction,

        /// Validate the input before transforming
        #[arg(long, help = "Validate the message before transforming")]
        validation: bool,

        /// Ask the API for debug output
        #[arg(long, help = "Request debug output from the API")]
        debug: bool,

        /// Print the full API response
        #[arg(long, help = "Print the full JSON response instead of the message")]
        raw: bool,

        /// Print the HTTP request before sending it
        #[arg(long, help = "Print the API request")]
        show_request: bool,
    },

    /// Browse message types and scenarios
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,

        /// Output format
        #[arg(long, default_value = "human", help = "Output format")]
        format: ReportFormat,
    },

    /// Build catalog files from scenario directories
    Inventory {
        #[command(subcommand)]
        action: InventoryAction,
    },

    /// Configuration file management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show version information
    #[command(alias = "ver")]
    Version {
        /// Show detailed version information
        #[arg(long, help = "Show detailed version and build information")]
        detailed: bool,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List message types
    Types {
        #[arg(short, long, default_value = "mt", help = "Catalog to read")]
        family: CatalogFamily,
    },

    /// List scenarios of a message type
    Scenarios {
        #[arg(help = "Message type, or 'forward'/'reverse' for the reframe catalog")]
        message_type: String,

        #[arg(short, long, help = "Catalog to read (default: detected from the type)")]
        family: Option<CatalogFamily>,
    },

    /// Show a message type's description and scenarios
    Describe {
        #[arg(help = "Message type")]
        message_type: String,

        #[arg(short, long, help = "Catalog to read (default: detected from the type)")]
        family: Option<CatalogFamily>,
    },
}

#[derive(Subcommand)]
enum InventoryAction {
    /// Scan scenario directories and write the catalog files
    Build {
        /// Directory with SWIFT MT scenario folders (mt103, mt202, ...)
        #[arg(long, help = "SWIFT MT scenario directory")]
        mt_dir: PathBuf,

        /// Directory with ISO 20022 scenario folders (pacs008, camt053, ...)
        #[arg(long, help = "ISO 20022 scenario directory")]
        mx_dir: PathBuf,

        /// Output directory
        #[arg(short, long, help = "Output directory (default: catalog data directory)")]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Initialize a new configuration file
    Init {
        /// Configuration file format
        #[arg(long, default_value = "json", help = "Configuration file format")]
        format: ConfigFormat,

        /// Overwrite existing configuration file
        #[arg(long, help = "Overwrite existing configuration file")]
        force: bool,
    },

    /// Validate configuration file
    Validate {
        /// Path to configuration file to validate
        #[arg(help = "Path to configuration file (default: search for .sandboxrc)")]
        path: Option<PathBuf>,
    },

    /// Show current configuration
    Show {
        /// Show resolved settings, defaults and environment included
        #[arg(long, help = "Show resolved settings including defaults")]
        resolved: bool,
    },

    /// Print the configuration JSON Schema
    Schema,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Family {
    /// SWIFT MT
    Mt,
    /// ISO 20022 MX
    Mx,
}

impl From<Family> for MessageFamily {
    fn from(family: Family) -> Self {
        match family {
            Family::Mt => MessageFamily::Mt,
            Family::Mx => MessageFamily::Mx,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum CatalogFamily {
    /// SWIFT MT message types
    Mt,
    /// ISO 20022 message types
    Mx,
    /// Transformation scenarios
    Reframe,
}

impl From<CatalogFamily> for CatalogKind {
    fn from(family: CatalogFamily) -> Self {
        match family {
            CatalogFamily::Mt => CatalogKind::SwiftMt,
            CatalogFamily::Mx => CatalogKind::Mx,
            CatalogFamily::Reframe => CatalogKind::Reframe,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    /// MT to MX
    Forward,
    /// MX to MT
    Reverse,
}

impl Direction {
    fn as_str(&self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Reverse => "reverse",
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ReportFormat {
    /// Human-readable output with colors
    Human,
    /// JSON format for programmatic consumption
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ConfigFormat {
    /// JSON configuration format
    Json,
    /// TOML configuration format
    Toml,
    /// YAML configuration format
    Yaml,
}

/// Settings shared by every command
pub struct GlobalArgs {
    pub config: Option<PathBuf>,
    pub api_url: Option<String>,
    pub data_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

async fn async_main() -> Result<()> {
    let cli = Cli::parse();

    // Handle shell completion generation
    if let Some(shell) = cli.generate_completion {
        generate_completion_script(shell);
        return Ok(());
    }

    if !cli.no_color && std::env::var("NO_COLOR").is_err() {
        colored::control::set_override(true);
    } else {
        colored::control::set_override(false);
    }

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => "sandbox=error",
        1 => "sandbox=warn",
        2 => "sandbox=info",
        3 => "sandbox=debug",
        _ => "sandbox=trace",
    };
    unsafe {
        std::env::set_var("RUST_LOG", log_level);
    }
    init_tracing();

    if let Some(threads) = cli.threads
        && let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
    {
        error!("Failed to set thread pool size: {}", e);
        std::process::exit(1);
    }

    match run_command(cli).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("{}", e);
            std::process::exit(exit_code(e.kind()));
        }
    }
}

/// Usage problems exit with 2, unreachable services with 3.
fn exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Config | ErrorKind::InvalidInput => 2,
        ErrorKind::Network => 3,
        _ => 1,
    }
}

fn generate_completion_script(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

async fn run_command(cli: Cli) -> Result<()> {
    let globals = GlobalArgs {
        config: cli.config,
        api_url: cli.api_url,
        data_dir: cli.data_dir,
    };

    match cli.command {
        Some(Commands::Fmt {
            paths,
            write,
            check,
            diff,
            indent_size,
            tabs,
            json,
        }) => commands::format_command(
            paths,
            commands::FormatArgs {
                write,
                check,
                diff,
                indent_size,
                tabs,
                json,
            },
            &globals,
        ),

        Some(Commands::Generate {
            family,
            message_type,
            scenario,
            show_request,
        }) => {
            commands::api::generate_command(
                family.into(),
                message_type,
                scenario,
                show_request,
                &globals,
            )
            .await
        }

        Some(Commands::Validate {
            file,
            family,
            canonical,
            business_validation,
            format,
            show_request,
        }) => {
            commands::api::validate_command(
                file,
                family.map(Into::into),
                canonical,
                business_validation,
                format,
                show_request,
                &globals,
            )
            .await
        }

        Some(Commands::Transform {
            file,
            scenario,
            direction,
            validation,
            debug,
            raw,
            show_request,
        }) => {
            commands::api::transform_command(
                commands::api::TransformArgs {
                    file,
                    scenario,
                    direction,
                    validation,
                    debug,
                    raw,
                    show_request,
                },
                &globals,
            )
            .await
        }

        Some(Commands::Catalog { action, format }) => match action {
            CatalogAction::Types { family } => {
                commands::catalog::types_command(family.into(), format, &globals)
            }
            CatalogAction::Scenarios {
                message_type,
                family,
            } => commands::catalog::scenarios_command(
                &message_type,
                family.map(Into::into),
                format,
                &globals,
            ),
            CatalogAction::Describe {
                message_type,
                family,
            } => commands::catalog::describe_command(
                &message_type,
                family.map(Into::into),
                format,
                &globals,
            ),
        },

        Some(Commands::Inventory { action }) => match action {
            InventoryAction::Build { mt_dir, mx_dir, out } => {
                commands::inventory::build_command(&mt_dir, &mx_dir, out, &globals)
            }
        },

        Some(Commands::Config { action }) => match action {
            ConfigAction::Init { format, force } => commands::config::init_command(format, force),
            ConfigAction::Validate { path } => commands::config::validate_command(path),
            ConfigAction::Show { resolved } => commands::config::show_command(resolved, &globals),
            ConfigAction::Schema => commands::config::schema_command(),
        },

        Some(Commands::Version { detailed }) => {
            if detailed {
                println!("sandbox {}", sandbox_core::VERSION);
                println!("Build information:");
                println!("  Target: {}", std::env::consts::ARCH);
                println!("  OS: {}", std::env::consts::OS);
                println!(
                    "  Rust version: {}",
                    option_env!("CARGO_PKG_RUST_VERSION").unwrap_or("unknown")
                );
            } else {
                println!("{}", sandbox_core::VERSION);
            }
            Ok(())
        }

        None => {
            // No subcommand provided, show help
            let mut cmd = Cli::command();
            cmd.print_help()?;
            Ok(())
        }
    }
}
