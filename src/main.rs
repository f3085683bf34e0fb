//! affinitymap CLI - ranked member recommendations from blended signals
//!
//! Orchestrates the full batch pass:
//!
//! 1. Config: affinity.toml (or --config), falling back to the demo dataset
//! 2. Signal store: validate the entity universe across all four sources
//! 3. Scoring: content, collaborative, social, distance matrices in parallel
//! 4. Combination: weighted blend, self pairs forced to the sentinel
//! 5. Ranking: top-N candidates per member, printed to stdout
//! 6. Export: the full combined matrix written as CSV
//!
//! Any error aborts the run before output is produced.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use affinitymap::config::AffinityConfig;
use affinitymap::export::write_csv;
use affinitymap::pipeline::Pipeline;
use affinitymap::ranking::RecommendationRanker;
use affinitymap::rendering::RecommendationRenderer;
use affinitymap::Weights;

/// Ranked member recommendations from interests, interactions, social ties and distance
///
/// Examples:
///   affinitymap                              # Demo dataset, default weights
///   affinitymap --config crew.toml           # Your own population
///   affinitymap --top-n 5 --explain          # Longer lists with signal breakdown
///   affinitymap --weights 0.4,0.3,0.2,0.1    # Override blend weights
#[derive(Parser, Debug)]
#[command(name = "affinitymap")]
#[command(version)]
#[command(about, long_about = None)]
pub struct Cli {
    /// Configuration file
    ///
    /// Defaults to ./affinity.toml when present, the built-in demo
    /// dataset otherwise.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Recommendations per member (overrides config)
    #[arg(short = 'n', long)]
    pub top_n: Option<usize>,

    /// CSV output path (overrides config)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Blend weights as content,collaborative,social,distance
    ///
    /// Must be non-negative and sum to 1.0.
    #[arg(short, long, value_name = "C,COL,S,D", allow_hyphen_values = true)]
    pub weights: Option<Weights>,

    /// Show each signal's contribution under every candidate
    #[arg(long)]
    pub explain: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Verbose output (stage logs on stderr)
    #[arg(short, long)]
    pub verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let output = run(&cli)?;
    print!("{}", output);

    Ok(())
}

/// Execute the pipeline and return everything meant for stdout.
fn run(cli: &Cli) -> Result<String> {
    let config = load_config(cli)?;
    info!("configuration loaded\n{}", config.display_summary());

    let scores = Pipeline::new()
        .run(&config)
        .context("scoring pipeline failed")?;

    let lists = RecommendationRanker::new(&scores)
        .recommend_all(config.top_n)
        .context("ranking failed")?;
    let mut out = RecommendationRenderer::new(!cli.no_color)
        .with_explain(cli.explain)
        .render_all(&scores, &lists)
        .context("rendering recommendations failed")?;

    write_csv(&config.output, &scores)
        .with_context(|| format!("failed to export {}", config.output.display()))?;
    out.push_str(&format!("\nSaved: {}\n", config.output.display()));

    Ok(out)
}

/// Resolve the config file, then apply command-line overrides.
fn load_config(cli: &Cli) -> Result<AffinityConfig> {
    let mut config = match &cli.config {
        Some(path) => AffinityConfig::load_file(path),
        None => {
            let cwd = std::env::current_dir().context("cannot resolve working directory")?;
            AffinityConfig::load(&cwd)
        }
    }
    .context("failed to load configuration")?;

    if let Some(top_n) = cli.top_n {
        config.top_n = top_n;
    }
    if let Some(output) = &cli.output {
        config.output = output.clone();
    }
    if let Some(weights) = cli.weights {
        config.weights = weights;
    }

    config.validate().context("invalid command-line options")?;
    Ok(config)
}
