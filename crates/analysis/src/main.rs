use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use neuronav_core::config::NavigatorConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use neuronav_analysis::generate::generate_snapshot;
use neuronav_analysis::snapshot::{load_snapshot, write_snapshot};
use neuronav_analysis::{analyze, render_text, Analysis, Dataset};

/// Relate learning-style match levels to step completion.
#[derive(Debug, Parser)]
#[command(name = "neuronav-analysis", version, propagate_version = true)]
struct Cli {
    /// Navigator configuration (TOML). Built-in defaults when omitted.
    #[arg(long, global = true, env = "NAVIGATOR_CONFIG")]
    config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Report completion and efficiency by match level.
    Analyze(AnalyzeArgs),
    /// Write a synthetic snapshot for trying the analysis.
    Generate(GenerateArgs),
}

#[derive(Debug, Args)]
struct AnalyzeArgs {
    /// Postgres connection string to read users, roadmaps and progress from.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// JSON snapshot to analyze instead of a live database.
    #[arg(long, conflicts_with = "database_url")]
    snapshot: Option<PathBuf>,

    /// Print the full report as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// Where to write the snapshot.
    #[arg(short, long)]
    output: PathBuf,

    /// Seed for a reproducible snapshot. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "neuronav_analysis=debug,neuronav_core=debug"
    } else {
        "neuronav_analysis=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match &cli.config {
        Some(path) => NavigatorConfig::load(path)
            .with_context(|| format!("loading navigator config {}", path.display()))?,
        None => NavigatorConfig::default(),
    };

    match cli.command {
        Commands::Analyze(args) => run_analyze(&config, args).await,
        Commands::Generate(args) => run_generate(&config, &args.output, args.seed),
    }
}

async fn run_analyze(config: &NavigatorConfig, args: AnalyzeArgs) -> anyhow::Result<()> {
    let dataset = match (&args.snapshot, &args.database_url) {
        (Some(path), _) => load_snapshot(path)?,
        (None, Some(url)) => Dataset::from_database(url).await?,
        (None, None) => anyhow::bail!("either --snapshot or --database-url (DATABASE_URL) is required"),
    };

    match analyze(config, &dataset) {
        Analysis::Insufficient { users, events } => {
            println!(
                "Insufficient data for analysis: {users} users and {events} events \
                 (need at least {} users and {} events).",
                config.analysis.min_users, config.analysis.min_events
            );
        }
        Analysis::Report(report) if args.json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Analysis::Report(report) => print!("{}", render_text(&report)),
    }
    Ok(())
}

fn run_generate(config: &NavigatorConfig, output: &Path, seed: Option<u64>) -> anyhow::Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    let snapshot = generate_snapshot(config, &mut rng, chrono::Utc::now());
    write_snapshot(output, &snapshot)?;
    println!(
        "Wrote {} users, {} roadmaps and {} progress records to {}",
        snapshot.users.len(),
        snapshot.roadmaps.len(),
        snapshot.progress.len(),
        output.display()
    );
    Ok(())
}
