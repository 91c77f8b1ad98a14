//! Report sinks
//!
//! A study hands every successful [`SnapshotReport`] to each sink in
//! source order, then calls [`ReportSink::finish`] once with the summary.
//!
//! - [`ConsoleSink`]: human-readable lines on any writer
//! - [`ChartDataSink`]: log-log and residual chart data as CSV
//! - [`JsonSummarySink`]: every report plus the summary as one JSON file

mod chart;
mod console;
mod summary;

pub use chart::ChartDataSink;
pub use console::ConsoleSink;
pub use summary::JsonSummarySink;

use crate::analysis::SnapshotReport;
use crate::error::Result;
use crate::study::StudySummary;

/// Consumer of study results
pub trait ReportSink: Send {
    /// Short name for logging
    fn name(&self) -> &str;

    fn report(&mut self, report: &SnapshotReport) -> Result<()>;

    fn finish(&mut self, _summary: &StudySummary) -> Result<()> {
        Ok(())
    }
}
