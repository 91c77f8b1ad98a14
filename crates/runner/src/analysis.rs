//! Per-snapshot analysis
//!
//! Walks the configured volumes against one snapshot, fits the power law
//! and derives residuals. Everything a sink needs ends up in the
//! [`SnapshotReport`].

use impactfit_core::{DepthSnapshot, Price, Quantity, Side};
use impactfit_impact::{
    BookWalker, ImpactCurve, PowerLawFitter, PowerLawModel, RegressionStats, Residual,
};
use impactfit_loader::{SnapshotSource, load_snapshot};
use log::warn;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::StudyConfig;
use crate::error::Result;

/// Label used when a snapshot carries none
const UNLABELLED: &str = "snapshot";

/// What to measure on each snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    pub side: Side,
    pub volumes: Vec<Quantity>,
    /// Levels per side read from snapshot files
    pub depth: usize,
}

impl From<&StudyConfig> for AnalysisSettings {
    fn from(config: &StudyConfig) -> Self {
        Self {
            side: config.side,
            volumes: config.volumes.clone(),
            depth: config.depth,
        }
    }
}

/// Impact curve, fit and residuals of one snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotReport {
    pub label: String,
    /// File the snapshot was loaded from
    pub source: Option<PathBuf>,
    pub side: Side,
    pub mid_price: Price,
    /// Best bid at or above best ask; impacts may be negative
    pub crossed: bool,
    pub curve: ImpactCurve,
    /// Impact of each curve sample in basis points of mid
    pub impact_bps: Vec<Option<Decimal>>,
    pub model: PowerLawModel,
    pub stats: RegressionStats,
    pub residuals: Vec<Residual>,
}

impl SnapshotReport {
    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Source path when known, label otherwise
    pub fn display_name(&self) -> String {
        match &self.source {
            Some(path) => path.display().to_string(),
            None => self.label.clone(),
        }
    }
}

/// Measure and fit one in-memory snapshot
pub fn analyze_snapshot(
    snapshot: &DepthSnapshot,
    settings: &AnalysisSettings,
) -> Result<SnapshotReport> {
    let label = snapshot.label().unwrap_or(UNLABELLED);
    let crossed = snapshot.is_crossed();
    if crossed {
        warn!(
            "snapshot {} is crossed (spread {:?})",
            label,
            snapshot.spread()
        );
    }

    let walker = BookWalker::new(snapshot)?;
    let curve = walker.curve(settings.side, &settings.volumes)?;
    let (model, stats) = PowerLawFitter::new().fit_with_stats(&curve)?;
    let residuals = model.residuals(&curve);
    let impact_bps = curve.iter().map(|s| s.impact_bps()).collect();

    Ok(SnapshotReport {
        label: label.to_string(),
        source: None,
        side: settings.side,
        mid_price: walker.mid_price(),
        crossed,
        curve,
        impact_bps,
        model,
        stats,
        residuals,
    })
}

/// Load a snapshot file and analyze it
///
/// The report is labelled after the source rather than the file contents.
pub fn analyze_source(source: &SnapshotSource, settings: &AnalysisSettings) -> Result<SnapshotReport> {
    let snapshot = load_snapshot(&source.path, settings.depth)?.with_label(source.label.clone());
    Ok(analyze_snapshot(&snapshot, settings)?.with_source(&source.path))
}
