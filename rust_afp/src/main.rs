use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use rust_afp::report::Summary;
use rust_afp::{analyze_file, logging, AnalysisConfig, Classifier, Taxonomy};

#[derive(Parser, Debug)]
#[command(
    name = "afp_analysis",
    about = "Check whether discharge diagnoses justify an alpha-fetoprotein test"
)]
struct Cli {
    /// Log level, unless RUST_LOG is set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify every diagnosis in a table and save the table
    /// with the verdict columns added.
    Analyze {
        /// The table to analyse (.csv or .parquet)
        #[arg(long)]
        input: Option<PathBuf>,
        /// Configuration file (yaml)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Name of the diagnosis column
        #[arg(long)]
        column: Option<String>,
        /// Where to save the results (.csv or .parquet)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Number of rows classified between progress updates
        #[arg(long)]
        chunk_size: Option<usize>,
        /// Taxonomy file (yaml) to use instead of the built-in one
        #[arg(long)]
        taxonomy: Option<PathBuf>,
        /// Number of example rows of each kind to print
        #[arg(long)]
        samples: Option<usize>,
        /// Fail if a keyword belongs to more than one category
        #[arg(long)]
        reject_collisions: bool,
    },

    /// Classify diagnoses given on the command line.
    Classify {
        /// Diagnoses to classify
        #[arg(required = true)]
        diagnoses: Vec<String>,
        /// Taxonomy file (yaml) to use instead of the built-in one
        #[arg(long)]
        taxonomy: Option<PathBuf>,
    },

    /// Print the taxonomy categories and any keyword collisions.
    Taxonomy {
        /// Taxonomy file (yaml) to use instead of the built-in one
        #[arg(long)]
        taxonomy: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level);

    match cli.command {
        Commands::Analyze {
            input,
            config,
            column,
            output,
            chunk_size,
            taxonomy,
            samples,
            reject_collisions,
        } => {
            let mut config = match config {
                Some(path) => AnalysisConfig::from_path(&path)
                    .with_context(|| format!("failed to load config {}", path.display()))?,
                None => AnalysisConfig::default(),
            };
            if let Some(input) = input {
                config.input = input;
            }
            if let Some(column) = column {
                config.diagnosis_column = column;
            }
            if let Some(output) = output {
                config.output = output;
            }
            if let Some(chunk_size) = chunk_size {
                config.chunk_size = chunk_size;
            }
            if let Some(samples) = samples {
                config.sample_size = samples;
            }
            if taxonomy.is_some() {
                config.taxonomy = taxonomy;
            }
            config.reject_keyword_collisions |= reject_collisions;
            cmd_analyze(&config)?;
        }
        Commands::Classify {
            diagnoses,
            taxonomy,
        } => {
            cmd_classify(&diagnoses, taxonomy)?;
        }
        Commands::Taxonomy { taxonomy } => {
            cmd_taxonomy(taxonomy)?;
        }
    }

    Ok(())
}

fn cmd_analyze(config: &AnalysisConfig) -> anyhow::Result<()> {
    let analysis = analyze_file(config)
        .with_context(|| format!("failed to analyse {}", config.input.display()))?;

    println!("=== Summary ===");
    println!("{}", analysis.summary());
    println!();
    println!("=== Examples ===");
    print!("{}", analysis.samples(config.sample_size));
    println!();
    println!("Results saved to '{}'", config.output.display());
    println!("{}", analysis.timing);
    Ok(())
}

fn cmd_classify(diagnoses: &[String], taxonomy: Option<PathBuf>) -> anyhow::Result<()> {
    let taxonomy =
        Taxonomy::load(taxonomy.as_deref(), false).context("failed to load taxonomy")?;
    let batch = Classifier::new(&taxonomy).classify_batch(diagnoses);

    for row in &batch {
        println!("{}\t{}\t{}", row.diagnosis, row.indication, row.joined_reasons);
    }
    println!();
    println!("{}", Summary::from_batch(&batch));
    Ok(())
}

fn cmd_taxonomy(taxonomy: Option<PathBuf>) -> anyhow::Result<()> {
    let taxonomy =
        Taxonomy::load(taxonomy.as_deref(), false).context("failed to load taxonomy")?;

    for category in taxonomy.categories() {
        println!(
            "{} ({}): {} keywords",
            category.name(),
            category.label(),
            category.keywords().len()
        );
        println!("  {}", category.keywords().join(", "));
    }

    let collisions = taxonomy.keyword_collisions();
    if collisions.is_empty() {
        println!("No keyword collisions");
    } else {
        for collision in collisions {
            println!(
                "Collision: '{}' moves from {} to {}",
                collision.keyword, collision.previous, collision.replacement
            );
        }
    }
    Ok(())
}
