use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use rust_afp::table::write_table;
use rust_afp::{logging, Taxonomy};
use synth_data::make_discharge_table;

/// Write a table of synthetic discharge records
#[derive(Parser, Debug)]
#[command(name = "synth_data")]
struct Args {
    /// Number of records
    #[arg(long, default_value_t = 1000)]
    rows: usize,
    /// Global seed for all random columns
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Output table (.csv or .parquet)
    #[arg(long, default_value = "synthetic_discharges.csv")]
    output: PathBuf,
    /// Taxonomy file (yaml) to draw keywords from instead of the
    /// built-in one
    #[arg(long)]
    taxonomy: Option<PathBuf>,
    /// Log level, unless RUST_LOG is set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(&args.log_level);

    let taxonomy =
        Taxonomy::load(args.taxonomy.as_deref(), false).context("failed to load taxonomy")?;
    let mut df = make_discharge_table(args.seed, args.rows, &taxonomy)
        .context("failed to generate synthetic records")?;
    write_table(&mut df, &args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    info!(rows = args.rows, seed = args.seed, output = %args.output.display(), "wrote synthetic records");
    Ok(())
}
