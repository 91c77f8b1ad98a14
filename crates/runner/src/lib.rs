//! impactfit Runner - Market Impact Study
//!
//! Runs the impact engine over a directory of depth snapshots:
//!
//! - **Config**: JSON study configuration with defaults
//! - **Analysis**: impact curve, power-law fit and residuals per snapshot
//! - **Study**: discovery plus parallel analysis, failures skipped
//! - **Report**: console, chart data and JSON summary sinks
//!
//! ## Example
//!
//! ```no_run
//! use impactfit_runner::{ImpactStudy, StudyConfig};
//!
//! let study = ImpactStudy::new(StudyConfig::default());
//! let mut sinks = study.default_sinks();
//! let summary = study.run(&mut sinks)?;
//! println!("{} snapshots fitted", summary.processed);
//! # Ok::<(), impactfit_runner::Error>(())
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod report;
pub mod study;

// Re-export main types
pub use analysis::{AnalysisSettings, SnapshotReport, analyze_snapshot, analyze_source};
pub use config::{ConfigError, OutputConfig, StudyConfig};
pub use error::{Error, Result};
pub use report::{ChartDataSink, ConsoleSink, JsonSummarySink, ReportSink};
pub use study::{ImpactStudy, StudySummary};
