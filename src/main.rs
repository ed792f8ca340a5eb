//! Idlemax - Command Line Interface
//!
//! This is the main entry point for the purchase-schedule optimizer.
//! Run with `--help` to see all available options.

use anyhow::{bail, Context};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use idlemax::{
    data::load_catalog,
    display::{display_plan, format_time},
    models::StartMode,
    search::{SearchConfig, SearchEngine},
};

/// Command-line arguments for Idlemax.
#[derive(Parser, Debug)]
#[command(name = "idlemax")]
#[command(author, version, about = "Compute the optimal purchase schedule for an idle-game economy", long_about = None)]
struct Args {
    /// Search horizon in seconds of game time
    #[arg(short = 't', long)]
    horizon: f64,

    /// Directory containing things.csv
    #[arg(long, default_value = "data")]
    data: PathBuf,

    /// Start from a manual "Human" producer instead of the first catalog item
    #[arg(long, default_value_t = false)]
    manual_start: bool,

    /// Production rate of the manual Human producer
    #[arg(long, default_value_t = 4.0)]
    human_rate: f64,

    /// Seconds of wall clock between progress reports (0 disables)
    #[arg(long, default_value_t = 0.0)]
    report_interval: f64,

    /// Run the dominance pruning pass every N expansions
    #[arg(long)]
    prune_every: Option<u64>,

    /// Verbose per-expansion trace
    #[arg(long, default_value_t = false)]
    debug: bool,

    /// Emit the outcome as JSON instead of the human-readable report
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if args.horizon < 0.0 {
        bail!("horizon must be non-negative");
    }
    if !args.data.exists() {
        bail!(
            "data directory `{}` not found; run from the project root or pass --data",
            args.data.display()
        );
    }

    let start = if args.manual_start {
        StartMode::Manual {
            human_rate: args.human_rate,
        }
    } else {
        StartMode::Automated
    };

    let catalog = load_catalog(&args.data, start)
        .with_context(|| format!("loading catalog from `{}`", args.data.display()))?;

    if !args.json {
        println!("Idlemax - Purchase Schedule Optimizer");
        println!("================================================================");
        println!();
        println!("Configuration:");
        println!("  Horizon:         {}", format_time(args.horizon));
        println!(
            "  Start:           {}",
            if args.manual_start {
                format!("manual (Human, {:.1}/s)", args.human_rate)
            } else {
                format!("automated ({})", catalog.item(catalog.bootstrap()).name)
            }
        );
        println!(
            "  Pruning:         {}",
            match args.prune_every {
                Some(every) => format!("every {} expansions", every),
                None => "off".to_string(),
            }
        );
        println!();
        println!("Loaded {} catalog items.", catalog.len());
    }

    let config = SearchConfig {
        horizon: args.horizon,
        debug: args.debug,
        report_interval: args.report_interval,
        prune_every: args.prune_every,
    };
    let mut engine = SearchEngine::new(&catalog, config);
    let outcome = engine.run().context("search failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        display_plan(&catalog, &outcome);
    }

    Ok(())
}
