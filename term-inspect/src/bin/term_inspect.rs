//! term-inspect command line interface.
//!
//! Prints a table overview or the key paths of one nested column for a CSV,
//! JSON, NDJSON or Parquet file.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use term_inspect::formatters::OutputFormat;
use term_inspect::logging::setup::{init_logging, parse_level};
use term_inspect::prelude::*;
use term_inspect::reporters::{write_column_report, write_overview_report};
use term_inspect::sources::{DataSource, FileSource, JsonRowsSource};
use tracing::{debug, error};

#[derive(Parser, Debug)]
#[command(author, version, about = "Discover the key structure of nested table columns", long_about = None)]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level for term-inspect (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Write logs to stderr as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Data file or glob pattern (.csv, .json, .ndjson, .jsonl, .parquet)
    path: String,

    /// Read JSON rows as-is instead of inferring one Arrow schema
    #[arg(long)]
    schemaless: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    format: OutputFormat,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summarize every column and flag the nested ones
    Overview(InputArgs),

    /// List the key paths of one nested column
    Column {
        #[command(flatten)]
        input: InputArgs,

        /// Column to inspect
        column: String,

        /// Non-null values to sample
        #[arg(long, env = "TERM_INSPECT_SAMPLE_SIZE")]
        sample_size: Option<usize>,

        /// Maximum path depth
        #[arg(long, env = "TERM_INSPECT_MAX_DEPTH")]
        max_depth: Option<usize>,
    },
}

impl Command {
    fn input(&self) -> &InputArgs {
        match self {
            Self::Overview(input) => input,
            Self::Column { input, .. } => input,
        }
    }
}

enum LoadedTable {
    Arrow(ArrowTable),
    Json(JsonTable),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "term-inspect failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = build_config(&cli)?;
    init_logging(&config.logging)?;
    debug!(?config, "Resolved configuration");

    let table = load(cli.command.input()).await?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match table {
        LoadedTable::Arrow(table) => render(&table, &cli.command, &config, &mut out)?,
        LoadedTable::Json(table) => render(&table, &cli.command, &config, &mut out)?,
    }
    out.flush()?;
    Ok(())
}

fn build_config(cli: &Cli) -> Result<InspectConfig> {
    let mut config = match &cli.config {
        Some(path) => InspectConfig::from_json_file(path)?,
        None => InspectConfig::default(),
    };

    if let Some(level) = &cli.log_level {
        config.logging.inspect_level = parse_level(level)?;
    }
    if cli.log_json {
        config.logging.json_format = true;
    }
    if let Command::Column {
        sample_size,
        max_depth,
        ..
    } = &cli.command
    {
        if let Some(size) = sample_size {
            config.discovery.sample_size = *size;
        }
        if let Some(depth) = max_depth {
            config.discovery.max_depth = *depth;
        }
    }

    config.validate()?;
    Ok(config)
}

async fn load(input: &InputArgs) -> Result<LoadedTable> {
    if input.schemaless {
        let table = JsonRowsSource::new(&input.path).load().await?;
        return Ok(LoadedTable::Json(table));
    }
    let table = FileSource::new(input.path.as_str())?.load().await?;
    Ok(LoadedTable::Arrow(table))
}

fn render<T: Table, W: Write>(
    table: &T,
    command: &Command,
    config: &InspectConfig,
    out: &mut W,
) -> Result<()> {
    let formatter = command.input().format.formatter(config.formatter.clone());
    match command {
        Command::Overview(_) => write_overview_report(table, config, formatter.as_ref(), out),
        Command::Column { column, .. } => {
            write_column_report(table, column, config, formatter.as_ref(), out)
        }
    }
}
