//! swc-port-tools: merge and diff AUTOSAR SWC port declarations
//!
//! Compares the ports declared by software components across port-mapping
//! exports and reports what was added, removed or modified.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use swc_port_tools::{
    cli,
    config::{
        AppConfig, ConfigOverrides, DiffConfigBuilder, MergeConfig, Validatable, ViewConfig,
        CONFIG_FILE_NAMES,
    },
    pipeline::exit_codes,
    reports::{ReportFormat, SummaryPosition},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with format support info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nInput Formats:",
        "\n  AUTOSAR port-mapping XML (ITEM/PORTS/PORT)",
        "\n  JSON collection snapshot (written by merge/view -o json)",
        "\n\nOutput Formats:",
        "\n  summary, table, json, csv"
    )
}

#[derive(Parser)]
#[command(name = "swc-port-tools")]
#[command(version, long_version = build_long_version())]
#[command(about = "Merge and diff AUTOSAR SWC port declarations", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success / no changes
    1  Changes detected (--fail-on-change) or conflicts (--fail-on-conflict)
    3  Error occurred

EXAMPLES:
    # Compare two releases of one export
    swc-port-tools diff --base v1/dids.xml --candidate v2/dids.xml

    # Merge several exports per side, write a spreadsheet
    swc-port-tools diff -b v1/dids.xml v1/rids.xml -c v2/dids.xml v2/rids.xml -O diff.csv

    # New ports of one SWC only
    swc-port-tools diff -b v1.xml -c v2.xml --swc Diag --only-changes

    # Merge exports into a reusable snapshot
    swc-port-tools merge xml/dids.xml xml/rids.xml -O merged.json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs
// ============================================================================

/// Arguments for the `diff` subcommand
#[derive(Parser)]
struct DiffArgs {
    /// Baseline port source(s), merged in order
    #[arg(short, long, required = true, num_args = 1..)]
    base: Vec<PathBuf>,

    /// Candidate port source(s), merged in order
    #[arg(short, long, required = true, num_args = 1..)]
    candidate: Vec<PathBuf>,

    /// Output format (auto picks by output file extension, else summary)
    #[arg(short, long, default_value = "auto")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Place summary rows at the top or bottom of row-based reports
    #[arg(long)]
    summary_position: Option<SummaryPosition>,

    /// Only show ports with changes (hide unchanged)
    #[arg(long)]
    only_changes: bool,

    /// Restrict the report to one SWC
    #[arg(long, value_name = "NAME")]
    swc: Option<String>,

    /// Do not treat a changed item ID as a modification
    #[arg(long)]
    ignore_source_id: bool,

    /// Compare even if the inputs look like they use different identity schemes
    #[arg(long)]
    no_consistency_check: bool,

    /// Skip malformed PORT entries instead of failing
    #[arg(long)]
    lenient: bool,

    /// Exit with code 1 if any changes detected
    #[arg(long)]
    fail_on_change: bool,
}

/// Arguments for the `merge` subcommand
#[derive(Parser)]
struct MergeArgs {
    /// Port sources to merge; later files win on conflicts
    #[arg(required = true, num_args = 2..)]
    files: Vec<PathBuf>,

    /// Output format (auto picks by output file extension, else json)
    #[arg(short, long, default_value = "auto")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Skip malformed PORT entries instead of failing
    #[arg(long)]
    lenient: bool,

    /// Exit with code 1 if any conflicts were found
    #[arg(long)]
    fail_on_conflict: bool,
}

/// Arguments for the `view` subcommand
#[derive(Parser)]
struct ViewArgs {
    /// Port source to list
    file: PathBuf,

    /// Only list the ports of this SWC
    #[arg(long, value_name = "NAME")]
    swc: Option<String>,

    /// Output format (auto picks by output file extension, else table)
    #[arg(short, long, default_value = "auto")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Skip malformed PORT entries instead of failing
    #[arg(long)]
    lenient: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare base and candidate port sources
    Diff(DiffArgs),

    /// Merge several port sources into one collection
    Merge(MergeArgs),

    /// List the ports of a single source
    View(ViewArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .swc-port-tools.yaml in the current directory
    Init,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for reports. The config file
    // may ask for quiet output, so read it before picking the level.
    let (file_config, _) = swc_port_tools::config::load_or_default(cli.config.as_deref());
    let mut behavior = file_config.behavior;
    behavior.quiet |= cli.quiet;
    let log_level = behavior.log_level(cli.verbose);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    match run(cli) {
        Ok(exit_codes::SUCCESS) => {}
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}

/// Dispatch to command handlers
fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Diff(ref args) => {
            let overrides = ConfigOverrides {
                settings: AppConfig::builder()
                    .output_format(args.output)
                    .output_file(args.output_file.clone())
                    .no_color(cli.no_color)
                    .only_changes(args.only_changes)
                    .compare_source_id(!args.ignore_source_id)
                    .consistency_check(!args.no_consistency_check)
                    .lenient(args.lenient)
                    .fail_on_change(args.fail_on_change)
                    .quiet(cli.quiet)
                    .build(),
                summary_position: args.summary_position,
            };
            let app = load_app_config(&cli, &overrides)?;

            let config = DiffConfigBuilder::from_app_config(app)
                .base_paths(args.base.clone())
                .candidate_paths(args.candidate.clone())
                .swc_filter(args.swc.clone())
                .build()?;
            cli::run_diff(config)
        }

        Commands::Merge(ref args) => {
            let overrides: ConfigOverrides = AppConfig::builder()
                .output_format(args.output)
                .output_file(args.output_file.clone())
                .no_color(cli.no_color)
                .lenient(args.lenient)
                .fail_on_conflict(args.fail_on_conflict)
                .quiet(cli.quiet)
                .build()
                .into();
            let app = load_app_config(&cli, &overrides)?;

            cli::run_merge(MergeConfig {
                paths: args.files.clone(),
                output: app.output,
                parsing: app.parsing,
                behavior: app.behavior,
            })
        }

        Commands::View(ref args) => {
            let overrides: ConfigOverrides = AppConfig::builder()
                .output_format(args.output)
                .output_file(args.output_file.clone())
                .no_color(cli.no_color)
                .lenient(args.lenient)
                .quiet(cli.quiet)
                .build()
                .into();
            let app = load_app_config(&cli, &overrides)?;

            cli::run_view(ViewConfig {
                path: args.file.clone(),
                output: app.output,
                parsing: app.parsing,
                swc_filter: args.swc.clone(),
                quiet: app.behavior.quiet,
            })
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "swc-port-tools", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::ConfigSchema { ref output } => {
            let schema = swc_port_tools::config::generate_json_schema()
                .context("failed to serialize config schema")?;
            match output {
                Some(path) => {
                    std::fs::write(path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => println!("{schema}"),
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { ref action } => run_config_action(action, &cli),
    }
}

/// Layer CLI overrides over the explicit or discovered config file
fn load_app_config(cli: &Cli, overrides: &ConfigOverrides) -> Result<AppConfig> {
    let (mut config, loaded_from) = match cli.config.as_deref() {
        Some(path) => {
            let config = swc_port_tools::config::load_config_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?;
            (config, Some(path.to_path_buf()))
        }
        None => swc_port_tools::config::load_or_default(None),
    };
    if let Some(path) = loaded_from {
        tracing::debug!("Loaded config from {}", path.display());
    }
    config.apply_overrides(overrides);

    let errors = config.validate();
    if !errors.is_empty() {
        let listed: Vec<String> = errors.iter().map(ToString::to_string).collect();
        anyhow::bail!("invalid configuration: {}", listed.join("; "));
    }
    Ok(config)
}

fn run_config_action(action: &ConfigAction, cli: &Cli) -> Result<i32> {
    match action {
        ConfigAction::Show => {
            let (config, loaded_from) =
                swc_port_tools::config::load_or_default(cli.config.as_deref());
            if let Some(path) = &loaded_from {
                eprintln!("# Loaded from: {}", path.display());
            } else {
                eprintln!("# No config file found; showing defaults");
            }
            let yaml = serde_yaml_ng::to_string(&config).context("failed to serialize config")?;
            print!("{yaml}");
        }
        ConfigAction::Path => {
            eprintln!("Config file search paths (in order):");
            for path in swc_port_tools::config::search_paths() {
                eprintln!("  {}", path.display());
            }
            eprintln!();
            eprintln!("Recognized file names:");
            for name in CONFIG_FILE_NAMES {
                eprintln!("  {name}");
            }
            eprintln!();
            match swc_port_tools::config::discover_config_file(cli.config.as_deref()) {
                Some(path) => eprintln!("Active config file: {}", path.display()),
                None => eprintln!("No config file found."),
            }
        }
        ConfigAction::Init => {
            let target = std::env::current_dir()
                .context("cannot determine current directory")?
                .join(".swc-port-tools.yaml");
            if target.exists() {
                anyhow::bail!(
                    "{} already exists. Remove it first to re-initialize.",
                    target.display()
                );
            }
            let content = swc_port_tools::config::generate_full_example_config();
            std::fs::write(&target, content)
                .with_context(|| format!("failed to write {}", target.display()))?;
            eprintln!("Created {}", target.display());
        }
    }
    Ok(exit_codes::SUCCESS)
}
