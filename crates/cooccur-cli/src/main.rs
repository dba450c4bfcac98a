//! cooccur: market-basket co-occurrence analysis for order exports.
//!
//! Reads a CSV order export, runs the analysis pipeline from
//! `cooccur-core`, and renders or exports the combination report. This
//! binary is deliberately thin: all semantics live in the core crate.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use cooccur_core::{run_full, AnalysisConfig};

mod ingest;
mod render;

/// Sample order export, matching the schema `analyze` expects.
const SAMPLE_CSV: &str = "\
order_id,product_id,product_title
1001,501,Espresso Beans
1001,502,Milk Frother
1002,501,Espresso Beans
1002,503,Hand Grinder
1003,502,Milk Frother
";

/// Market-basket co-occurrence analytics
#[derive(Parser, Debug)]
#[command(name = "cooccur")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze an order export and emit the combination report
    Analyze(AnalyzeArgs),
    /// Print a sample input CSV (or a sample configuration)
    Sample {
        /// Print a sample TOML configuration instead of a sample CSV
        #[arg(long)]
        config: bool,
    },
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// Order export CSV with order_id, product_id and product_title columns
    input: PathBuf,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Report output format
    #[arg(short, long, value_enum, default_value = "table")]
    format: Format,

    /// Also dump the raw co-occurrence matrix as headerless CSV
    #[arg(long)]
    matrix_out: Option<PathBuf>,

    /// Rank only the top N products (default: rank all of them)
    #[arg(long)]
    top: Option<usize>,

    /// Ranked partners per product (default: 10)
    #[arg(long)]
    partners: Option<usize>,

    /// TOML configuration file
    #[arg(short, long, env = "COOCCUR_CONFIG")]
    config: Option<PathBuf>,
}

/// Report output formats.
#[derive(ValueEnum, Copy, Clone, Debug)]
pub enum Format {
    /// Human-readable table
    Table,
    /// CSV with the report's tabular header
    Csv,
    /// JSON array of report rows
    Json,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Commands::Analyze(args) => analyze(args),
        Commands::Sample { config } => sample(config),
    }
}

fn analyze(args: AnalyzeArgs) -> anyhow::Result<()> {
    let mut config =
        AnalysisConfig::load(args.config.as_deref()).context("loading configuration")?;
    if args.top.is_some() {
        config.top_products = args.top;
    }
    if let Some(partners) = args.partners {
        config.partner_limit = partners;
    }

    let table = ingest::read_csv(&args.input)?;
    let output = run_full(&table, &config)
        .with_context(|| format!("analyzing {}", args.input.display()))?;

    if let Some(path) = &args.matrix_out {
        render::write_matrix_csv(&output.matrix, path)
            .with_context(|| format!("writing matrix to {}", path.display()))?;
    }

    match &args.output {
        Some(path) => render::write_report_file(&output.report, path, args.format)
            .with_context(|| format!("writing report to {}", path.display()))?,
        None => render::write_report_stdout(&output.report, args.format)?,
    }
    Ok(())
}

fn sample(config: bool) -> anyhow::Result<()> {
    if config {
        let rendered = toml::to_string_pretty(&AnalysisConfig::default())
            .context("rendering sample configuration")?;
        print!("{rendered}");
    } else {
        print!("{SAMPLE_CSV}");
    }
    Ok(())
}
