//! Casecurve CLI
//!
//! Loads the confirmed-cases time series, derives per-country daily
//! trends, and prints or exports a filtered range for charting.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use casecurve::commands::{
    display_schema, display_version, execute_filter, execute_load, list_countries,
    validate_export_file, FilterArgs, LoadArgs, SourceArgs,
};
use casecurve::utils::config::{DEFAULT_SOURCE_URL, SOURCE_URL_ENV};

/// Casecurve - per-country daily case trends from a wide time series
#[derive(Parser, Debug)]
#[command(name = "casecurve")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Where to read the raw table from
#[derive(Args, Debug)]
struct SourceOpts {
    /// URL of the wide-format CSV
    #[arg(long, env = SOURCE_URL_ENV, default_value = DEFAULT_SOURCE_URL)]
    source: String,

    /// Read the CSV from a local file instead of the URL
    #[arg(short, long)]
    input: Option<PathBuf>,
}

impl From<SourceOpts> for SourceArgs {
    fn from(opts: SourceOpts) -> Self {
        Self {
            url: opts.source,
            input: opts.input,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Load and derive the dataset, then print the load report
    Load {
        #[command(flatten)]
        source: SourceOpts,

        /// Output path for the full derived table (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List all countries in the dataset
    Countries {
        #[command(flatten)]
        source: SourceOpts,
    },

    /// Filter one country's series to a date range
    Filter {
        #[command(flatten)]
        source: SourceOpts,

        /// Country name (defaults to the dashboard preselection)
        #[arg(short, long)]
        country: Option<String>,

        /// Inclusive start date, YYYY-MM-DD (defaults to 90 days before the end)
        #[arg(long)]
        start: Option<String>,

        /// Inclusive end date, YYYY-MM-DD (defaults to the latest date)
        #[arg(long)]
        end: Option<String>,

        /// Output path for the series JSON (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print key metrics instead of every row
        #[arg(long)]
        summary: bool,
    },

    /// Validate an export JSON file
    Validate {
        /// Path to export JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Load { source, output } => {
            let args = LoadArgs {
                source: source.into(),
                output_json: output,
            };
            execute_load(&args)?;
        }

        Commands::Countries { source } => {
            let source: SourceArgs = source.into();
            list_countries(&source)?;
        }

        Commands::Filter {
            source,
            country,
            start,
            end,
            output,
            summary,
        } => {
            let args = FilterArgs {
                source: source.into(),
                country,
                start,
                end,
                output_json: output,
                print_summary: summary,
            };
            execute_filter(&args)?;
        }

        Commands::Validate { file } => {
            validate_export_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
