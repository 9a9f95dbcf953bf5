use anyhow::Context;
use clap::Parser;
use revmatch::{match_files, EncoderCache, ProfileAggregation, RunConfig};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Exact reviewer assignment for peer review
#[derive(Parser, Debug)]
#[command(name = "revmatch")]
#[command(about = "Assign reviewers to papers by exact branch-and-bound", long_about = None)]
struct Args {
    /// JSON array of paper records
    #[arg(long)]
    papers: PathBuf,

    /// JSON array of reviewer records
    #[arg(long)]
    reviewers: PathBuf,

    /// JSON config file; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reviewers per paper
    #[arg(short = 'k', long)]
    reviewers_per_paper: Option<usize>,

    /// Constraint to enforce (repeatable; default: all built-ins)
    #[arg(long = "constraint")]
    constraints: Vec<String>,

    /// Most papers a single reviewer may get
    #[arg(long)]
    max_load: Option<usize>,

    /// How category similarities combine: max or mean
    #[arg(long)]
    aggregation: Option<ProfileAggregation>,

    /// Dimension of the hashing encoder
    #[arg(long)]
    dimension: Option<usize>,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn run_config(&self) -> anyhow::Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::from_file(path)
                .with_context(|| format!("failed to read config {:?}", path))?,
            None => RunConfig::default(),
        };

        if let Some(k) = self.reviewers_per_paper {
            config.matcher.reviewers_per_paper = k;
        }
        if !self.constraints.is_empty() {
            config.matcher.constraints = self.constraints.clone();
        }
        if let Some(load) = self.max_load {
            config.matcher.max_reviewer_load = Some(load);
        }
        if let Some(aggregation) = self.aggregation {
            config.matcher.aggregation = aggregation;
        }
        if let Some(dimension) = self.dimension {
            config.encoder.dimension = dimension;
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // The report may go to stdout, so logs go to stderr
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting revmatch v{}", env!("CARGO_PKG_VERSION"));
    info!("Papers: {:?}", args.papers);
    info!("Reviewers: {:?}", args.reviewers);

    let config = args.run_config()?;
    let encoders = EncoderCache::new();
    let matching = match_files(&config, &args.papers, &args.reviewers, &encoders)
        .context("matching failed")?;

    let report = serde_json::to_string_pretty(&matching)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, report)
                .with_context(|| format!("failed to write report to {:?}", path))?;
            info!("Report written to {:?}", path);
        }
        None => println!("{}", report),
    }

    Ok(())
}
