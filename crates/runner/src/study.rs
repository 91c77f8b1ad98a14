//! Impact study orchestration
//!
//! ```text
//! discover_sources ──► [rayon pool] analyze_source × N ──► reports in source order
//!                                                             │
//!                                   ┌─────────────────────────┼──────────────────┐
//!                                   ▼                         ▼                  ▼
//!                              ConsoleSink              ChartDataSink     JsonSummarySink
//! ```
//!
//! A snapshot that cannot be loaded or fitted is logged and skipped; it
//! never aborts the study.

use impactfit_loader::discover_sources;
use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::{AnalysisSettings, analyze_source};
use crate::config::StudyConfig;
use crate::error::Result;
use crate::report::{ChartDataSink, ConsoleSink, JsonSummarySink, ReportSink};

/// Outcome counts of a study run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudySummary {
    pub processed: usize,
    pub skipped: usize,
    /// `(label, message)` of every skipped snapshot
    pub failures: Vec<(String, String)>,
}

impl StudySummary {
    pub fn total(&self) -> usize {
        self.processed + self.skipped
    }
}

pub struct ImpactStudy {
    config: StudyConfig,
}

impl ImpactStudy {
    pub fn new(config: StudyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StudyConfig {
        &self.config
    }

    /// Sinks selected by the output configuration
    pub fn default_sinks(&self) -> Vec<Box<dyn ReportSink>> {
        let output = &self.config.output;
        let mut sinks: Vec<Box<dyn ReportSink>> = Vec::new();

        if output.console {
            sinks.push(Box::new(ConsoleSink::stdout()));
        }
        if output.charts {
            sinks.push(Box::new(ChartDataSink::new(
                &output.loglog_dir,
                &output.residuals_dir,
                output.fit_line_points,
            )));
        }
        if let Some(path) = &output.summary {
            sinks.push(Box::new(JsonSummarySink::new(path)));
        }

        sinks
    }

    /// Analyze every snapshot under the data directory
    ///
    /// Fails only on invalid configuration, an unreadable data directory
    /// or a sink error.
    pub fn run(&self, sinks: &mut [Box<dyn ReportSink>]) -> Result<StudySummary> {
        self.config.validate()?;

        let sources = discover_sources(&self.config.data_dir, &self.config.extension)?;
        info!(
            "found {} snapshot(s) under {}",
            sources.len(),
            self.config.data_dir.display()
        );

        let settings = AnalysisSettings::from(&self.config);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.workers.unwrap_or(0))
            .build()?;

        // collect() on an indexed parallel iterator keeps source order
        let results: Vec<_> = pool.install(|| {
            sources
                .par_iter()
                .map(|source| (source, analyze_source(source, &settings)))
                .collect()
        });

        let mut summary = StudySummary::default();
        for (source, result) in results {
            match result {
                Ok(report) => {
                    for sink in sinks.iter_mut() {
                        sink.report(&report)?;
                    }
                    summary.processed += 1;
                }
                Err(e) => {
                    warn!("skipping {}: {}", source.path.display(), e);
                    summary.skipped += 1;
                    summary.failures.push((source.label.clone(), e.to_string()));
                }
            }
        }

        for sink in sinks.iter_mut() {
            sink.finish(&summary)?;
            info!("{} sink finished", sink.name());
        }

        info!(
            "study complete: {} processed, {} skipped",
            summary.processed, summary.skipped
        );
        Ok(summary)
    }
}
