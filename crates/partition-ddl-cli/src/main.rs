//! partition-ddl CLI - render and diff MySQL/MariaDB table partitioning.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use partition_ddl::{
    alter_table_statement, Document, Flavor, PartitionError, PartitioningMode,
    StatementModifiers, TablePartitioning,
};
use serde::Serialize;
use tracing::{debug, info, warn, Level};

/// Flavor used when neither the command line nor the document names one.
const DEFAULT_FLAVOR: &str = "mysql:8.0";

#[derive(Parser)]
#[command(name = "partition-ddl")]
#[command(about = "Render and diff MySQL/MariaDB table partitioning")]
#[command(version)]
struct Cli {
    /// Server flavor, e.g. mysql:8.0 or mariadb:10.6 (overrides the document)
    #[arg(long, global = true)]
    flavor: Option<String>,

    /// Log format: text or json
    #[arg(long, default_value = "text", global = true)]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "warn", global = true)]
    verbosity: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the PARTITION BY clause of a partitioning document
    Render {
        /// Path to YAML partitioning document
        file: PathBuf,
    },

    /// Print the ALTER TABLE statement turning one document into another
    Diff {
        /// Current partitioning document
        from: PathBuf,

        /// Desired partitioning document
        to: PathBuf,

        /// How to treat adding or removing partitioning
        #[arg(long, value_enum, default_value = "permissive")]
        partitioning: ModeArg,

        /// Output JSON result to stdout
        #[arg(long)]
        output_json: bool,
    },

    /// Validate a partitioning document
    Validate {
        /// Path to YAML partitioning document
        file: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Permissive,
    Remove,
    Keep,
}

impl From<ModeArg> for PartitioningMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Permissive => PartitioningMode::Permissive,
            ModeArg::Remove => PartitioningMode::Remove,
            ModeArg::Keep => PartitioningMode::Keep,
        }
    }
}

#[derive(Serialize)]
struct DiffOutput {
    table: String,
    supported: bool,
    statement: Option<String>,
    clauses: Vec<ClauseOutput>,
}

#[derive(Serialize)]
struct ClauseOutput {
    kind: &'static str,
    /// Empty when the clause renders no DDL under the chosen mode.
    sql: String,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

fn run() -> Result<(), PartitionError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity, &cli.log_format);

    match cli.command {
        Commands::Render { ref file } => {
            let doc = Document::load(file)?;
            let flavor = resolve_flavor(cli.flavor.as_deref(), &[&doc])?;
            info!("Rendering partitioning of {} for {}", doc.table, flavor);

            let definition = doc
                .to_partitioning()?
                .map(|tp| tp.definition(&flavor))
                .unwrap_or_default();
            if definition.is_empty() {
                info!("Table {} is not partitioned", doc.table);
            } else {
                println!("{}", definition.trim_start_matches('\n'));
            }
        }

        Commands::Diff {
            ref from,
            ref to,
            partitioning,
            output_json,
        } => {
            let from_doc = Document::load(from)?;
            let to_doc = Document::load(to)?;
            if from_doc.table != to_doc.table {
                warn!(
                    "Diffing different tables {} and {}; using {}",
                    from_doc.table, to_doc.table, from_doc.table
                );
            }

            let flavor = resolve_flavor(cli.flavor.as_deref(), &[&from_doc, &to_doc])?;
            let mods = StatementModifiers::new(flavor).with_partitioning(partitioning.into());

            let from_tp = from_doc.to_partitioning()?;
            let to_tp = to_doc.to_partitioning()?;
            let (clauses, supported) =
                TablePartitioning::diff(from_tp.as_ref(), to_tp.as_ref());
            debug!(
                "Diff of {} produced {} clause(s), supported={}",
                from_doc.table,
                clauses.len(),
                supported
            );

            let statement = alter_table_statement(&from_doc.table, &clauses, &mods);

            if output_json {
                let output = DiffOutput {
                    table: from_doc.table.clone(),
                    supported,
                    statement: statement.clone(),
                    clauses: clauses
                        .iter()
                        .map(|c| ClauseOutput {
                            kind: c.kind(),
                            sql: c.clause(&mods),
                        })
                        .collect(),
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else if let Some(ref stmt) = statement {
                println!("{};", stmt);
            }

            if !supported {
                return Err(PartitionError::unsupported(from_doc.table));
            }
        }

        Commands::Validate { ref file } => {
            let doc = Document::load(file)?;
            resolve_flavor(cli.flavor.as_deref(), &[&doc])?;
            println!("OK: {}", file.display());
        }
    }

    Ok(())
}

/// Pick the flavor: command line first, then the first document naming one,
/// then the default.
fn resolve_flavor(
    cli_flavor: Option<&str>,
    docs: &[&Document],
) -> Result<Flavor, PartitionError> {
    if let Some(flavor) = cli_flavor {
        return flavor.parse();
    }
    for doc in docs {
        if let Some(flavor) = doc.flavor()? {
            return Ok(flavor);
        }
    }
    DEFAULT_FLAVOR.parse()
}

fn setup_logging(verbosity: &str, format: &str) {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false);

    if format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
