use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Error};
use clap::Parser;
use mimalloc::MiMalloc;
use tracing_subscriber::EnvFilter;

use review_analytics::report::write_report;
use review_analytics::{LinguaClassifier, PipelineConfig, QueryParams, pipeline};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Answer the five catalog/review queries and print the report.
#[derive(Parser, Debug)]
#[command(name = "review-analytics", version)]
struct Args {
    /// Headerless games export (its first row is skipped)
    games: PathBuf,

    /// Reviews export with an app_id,review_text,review_score header
    reviews: PathBuf,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Strict lower bound on negative reviews for query 4
    #[arg(long, default_value_t = 5000)]
    negative_threshold: i64,

    /// Percentile of negative review counts for query 5, in [0, 1]
    #[arg(long, default_value_t = 0.90)]
    percentile: f64,
}

/// Logs go to stderr; stdout only carries the report.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<(), Error> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let config = PipelineConfig::new(&args.games, &args.reviews).with_params(QueryParams {
        negative_threshold: args.negative_threshold,
        percentile: args.percentile,
        ..Default::default()
    });

    let classifier = LinguaClassifier::new();
    let report = pipeline::run(&config, &classifier)?;

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating report file {}", path.display()))?;
            write_report(&mut BufWriter::new(file), &report)
                .with_context(|| format!("writing report to {}", path.display()))?;
        }
        None => write_report(&mut io::stdout().lock(), &report).context("writing report")?,
    }

    Ok(())
}
