//! API Sidebar CLI
//!
//! Command-line interface for generating and checking API reference sidebars.

use std::path::PathBuf;
use std::process::ExitCode;

use api_sidebar::logging::{init_logging, LogFormat};
use api_sidebar::{
    check, extract_operations, load_description_auto, load_operations_auto, load_rules,
    overview_from_description, synthesize, to_docusaurus, to_json, GroupingRules, Operation,
    Overview, Severity, TagStrategy, DEFAULT_SIDEBAR_ID,
};
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "api-sidebar")]
#[command(about = "Generate API reference sidebars from OpenAPI descriptions")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Human, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a sidebar from an API description
    Generate {
        #[command(flatten)]
        input: InputArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Docusaurus)]
        format: OutputFormat,

        /// Sidebar id in the Docusaurus module
        #[arg(long, default_value = DEFAULT_SIDEBAR_ID)]
        sidebar_id: String,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Report normalizations, collisions and malformed operations
    Check {
        #[command(flatten)]
        input: InputArgs,

        /// Output results as JSON (for automation)
        #[arg(long)]
        json: bool,

        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Source: file path or URL (http:// or https://), JSON or YAML
    source: String,

    /// Source is a normalized operation list instead of an OpenAPI description
    #[arg(long)]
    operations: bool,

    /// Grouping rules file (JSON or YAML); flags below override it
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Tag strategy: first-tag, path-segment, or extension:<key>
    #[arg(long)]
    tag_strategy: Option<TagStrategy>,

    /// Category title for operations without a tag
    #[arg(long)]
    untagged_label: Option<String>,

    /// Place the untagged category last
    #[arg(long, overrides_with = "no_untagged_last")]
    untagged_last: bool,

    /// Keep the untagged category at its first-appearance position
    #[arg(long, overrides_with = "untagged_last")]
    no_untagged_last: bool,

    /// Prefix for document ids (e.g. openapi/)
    #[arg(long)]
    doc_prefix: Option<String>,

    /// Overview document id (default: derived from info.title)
    #[arg(long, conflicts_with = "no_overview")]
    overview_id: Option<String>,

    /// Overview document label (default: info.title)
    #[arg(long, conflicts_with = "no_overview")]
    overview_label: Option<String>,

    /// Do not emit the overview document
    #[arg(long)]
    no_overview: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Docusaurus SidebarsConfig TypeScript module
    Docusaurus,
    /// Generic node tree as JSON
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.verbose);

    let result = match cli.command {
        Commands::Generate {
            input,
            format,
            sidebar_id,
            output,
            pretty,
        } => run_generate(&input, format, &sidebar_id, output, pretty),

        Commands::Check {
            input,
            json,
            strict,
        } => run_check(&input, json, strict),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

/// Load the operation list and build the effective rules.
fn load_input(input: &InputArgs) -> Result<(Vec<Operation>, GroupingRules), u8> {
    let mut rules = match &input.rules {
        Some(path) => load_rules(path).map_err(|e| {
            eprintln!("Error loading rules: {}", e);
            e.exit_code() as u8
        })?,
        None => GroupingRules::new(),
    };

    let (operations, described_overview) = if input.operations {
        let operations = load_operations_auto(&input.source).map_err(|e| {
            eprintln!("Error: {}", e);
            e.exit_code() as u8
        })?;
        (operations, None)
    } else {
        let description = load_description_auto(&input.source).map_err(|e| {
            eprintln!("Error: {}", e);
            e.exit_code() as u8
        })?;
        let operations = extract_operations(&description).map_err(|e| {
            eprintln!("Error: {}", e);
            e.exit_code() as u8
        })?;
        (operations, overview_from_description(&description))
    };
    tracing::info!(source = %input.source, operations = operations.len(), "loaded operations");

    if let Some(strategy) = &input.tag_strategy {
        rules = rules.tag_strategy(strategy.clone());
    }
    if let Some(label) = &input.untagged_label {
        rules = rules.untagged_label(label.clone());
    }
    if input.untagged_last {
        rules = rules.untagged_last(true);
    } else if input.no_untagged_last {
        rules = rules.untagged_last(false);
    }
    if let Some(prefix) = &input.doc_prefix {
        rules = rules.doc_prefix(prefix.clone());
    }
    rules.overview = resolve_overview(input, rules.overview.take(), described_overview);

    Ok((operations, rules))
}

/// Flags win over the rules file, which wins over the description title.
fn resolve_overview(
    input: &InputArgs,
    configured: Option<Overview>,
    described: Option<Overview>,
) -> Option<Overview> {
    if input.no_overview {
        return None;
    }
    let base = configured.or(described);
    match (&input.overview_id, &input.overview_label, base) {
        (None, None, base) => base,
        (id, label, base) => {
            let id = id
                .clone()
                .or_else(|| base.as_ref().map(|o| o.id.clone()))
                .or_else(|| label.as_deref().map(api_sidebar::slugify))?;
            let label = label
                .clone()
                .or_else(|| base.map(|o| o.label))
                .unwrap_or_else(|| id.clone());
            Some(Overview::new(id, label))
        }
    }
}

fn run_generate(
    input: &InputArgs,
    format: OutputFormat,
    sidebar_id: &str,
    output: Option<PathBuf>,
    pretty: bool,
) -> Result<(), u8> {
    let (operations, rules) = load_input(input)?;

    let tree = synthesize(&operations, &rules).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let rendered = match format {
        OutputFormat::Docusaurus => to_docusaurus(&tree, sidebar_id),
        OutputFormat::Json => to_json(&tree, pretty).map_err(|e| {
            eprintln!("Error serializing output: {}", e);
            2u8
        })?,
    };

    match output {
        Some(path) => {
            std::fs::write(&path, &rendered).map_err(|e| {
                eprintln!("Error writing to {}: {}", path.display(), e);
                3u8
            })?;
            tracing::info!(path = %path.display(), leaves = tree.leaves().len(), "wrote sidebar");
        }
        None => {
            print!("{}", rendered);
            if !rendered.ends_with('\n') {
                println!();
            }
        }
    }

    Ok(())
}

fn run_check(input: &InputArgs, json_output: bool, strict: bool) -> Result<(), u8> {
    let (operations, rules) = load_input(input)?;
    let result = check(&operations, &rules);

    if json_output {
        let rendered = serde_json::to_string_pretty(&result).map_err(|e| {
            eprintln!("Error serializing output: {}", e);
            2u8
        })?;
        println!("{}", rendered);
    } else {
        for diag in &result.diagnostics {
            let (color, severity) = match diag.severity {
                Severity::Error => ("\x1b[31m", "error"),
                Severity::Warning => ("\x1b[33m", "warning"),
            };
            println!(
                "  {}{}[{}]\x1b[0m: #{} {} - {}",
                color, severity, diag.code, diag.position, diag.operation, diag.message
            );
        }

        if result.passed(strict) {
            println!(
                "\x1b[32m✓ {} operations in {} categories, {} warnings\x1b[0m",
                result.operations, result.categories, result.warnings
            );
        } else {
            println!(
                "\x1b[31m✗ {} operations checked: {} errors, {} warnings\x1b[0m",
                result.operations, result.errors, result.warnings
            );
        }
    }

    if result.passed(strict) {
        Ok(())
    } else if result.is_ok() {
        Err(1)
    } else {
        Err(2)
    }
}
