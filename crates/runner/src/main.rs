//! impactfit - fit power-law market impact curves to depth snapshots
//!
//! ```text
//! impactfit --data-dir Data --volumes 100,500,1000,2000,5000
//! impactfit --config study.json --summary out/summary.json
//! RUST_LOG=debug impactfit --side sell --no-charts
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use impactfit_core::{Quantity, Side};
use impactfit_runner::{ImpactStudy, StudyConfig};
use log::{info, warn};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Power-law market impact fitting over order book snapshots")]
struct Args {
    /// Load study configuration from a JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory searched recursively for snapshot CSVs
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Comma-separated target order sizes
    #[arg(short, long, value_delimiter = ',')]
    volumes: Option<Vec<Quantity>>,

    /// Order side to simulate (buy or sell)
    #[arg(short, long)]
    side: Option<Side>,

    /// Levels per side read from each snapshot
    #[arg(long)]
    depth: Option<usize>,

    /// Output directory for log-log chart data
    #[arg(long)]
    loglog_dir: Option<PathBuf>,

    /// Output directory for residual chart data
    #[arg(long)]
    residuals_dir: Option<PathBuf>,

    /// Write a JSON summary of every snapshot to this path
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Worker threads
    #[arg(short, long)]
    workers: Option<usize>,

    /// Skip chart data output
    #[arg(long)]
    no_charts: bool,

    /// Do not print per-snapshot results
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn into_config(self) -> Result<StudyConfig> {
        let mut config = match &self.config {
            Some(path) => {
                info!("Loading configuration from: {}", path.display());
                StudyConfig::from_file(path)?
            }
            None => StudyConfig::default(),
        };

        if let Some(dir) = self.data_dir {
            config.data_dir = dir;
        }
        if let Some(volumes) = self.volumes {
            config.volumes = volumes;
        }
        if let Some(side) = self.side {
            config.side = side;
        }
        if let Some(depth) = self.depth {
            config.depth = depth;
        }
        if let Some(dir) = self.loglog_dir {
            config.output.loglog_dir = dir;
        }
        if let Some(dir) = self.residuals_dir {
            config.output.residuals_dir = dir;
        }
        if let Some(path) = self.summary {
            config.output.summary = Some(path);
        }
        if self.workers.is_some() {
            config.workers = self.workers;
        }
        if self.no_charts {
            config.output.charts = false;
        }
        if self.quiet {
            config.output.console = false;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Args::parse().into_config()?;
    info!(
        "Volumes: {:?}, side: {}, depth: {}",
        config.volumes, config.side, config.depth
    );

    let study = ImpactStudy::new(config);
    let mut sinks = study.default_sinks();
    let summary = study
        .run(&mut sinks)
        .with_context(|| format!("study over {} failed", study.config().data_dir.display()))?;

    if summary.skipped > 0 {
        warn!(
            "{} of {} snapshot(s) skipped",
            summary.skipped,
            summary.total()
        );
    }
    Ok(())
}
