//! Chart data output
//!
//! For each snapshot `<label>`:
//!
//! - `<loglog_dir>/impact_loglog_<label>.csv` with columns
//!   `kind,volume,impact`: one `observed` row per measured volume, then
//!   `fit` rows along the fitted curve, log-spaced between the smallest
//!   and largest volume
//! - `<residuals_dir>/residuals_<label>.csv` with columns
//!   `volume,observed,predicted,residual_pct`

use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

use crate::analysis::SnapshotReport;
use crate::error::{Error, Result};
use crate::report::ReportSink;

pub struct ChartDataSink {
    loglog_dir: PathBuf,
    residuals_dir: PathBuf,
    fit_line_points: usize,
}

impl ChartDataSink {
    pub fn new(
        loglog_dir: impl Into<PathBuf>,
        residuals_dir: impl Into<PathBuf>,
        fit_line_points: usize,
    ) -> Self {
        Self {
            loglog_dir: loglog_dir.into(),
            residuals_dir: residuals_dir.into(),
            fit_line_points,
        }
    }

    pub fn loglog_path(&self, label: &str) -> PathBuf {
        self.loglog_dir.join(format!("impact_loglog_{}.csv", label))
    }

    pub fn residuals_path(&self, label: &str) -> PathBuf {
        self.residuals_dir.join(format!("residuals_{}.csv", label))
    }

    fn write_loglog(&self, report: &SnapshotReport) -> Result<PathBuf> {
        let path = self.loglog_path(&report.label);
        let mut writer = csv::Writer::from_path(&path)?;

        writer.write_record(["kind", "volume", "impact"])?;
        for sample in report.curve.iter() {
            writer.write_record([
                "observed".to_string(),
                sample.target_volume.to_string(),
                sample.impact.to_string(),
            ])?;
        }

        if let Some((min, max)) = report.curve.volume_range() {
            for (volume, impact) in report.model.fit_line(min, max, self.fit_line_points) {
                writer.write_record(["fit".to_string(), volume.to_string(), impact.to_string()])?;
            }
        }

        writer.flush().map_err(|e| io_error(&path, e))?;
        Ok(path)
    }

    fn write_residuals(&self, report: &SnapshotReport) -> Result<PathBuf> {
        let path = self.residuals_path(&report.label);
        let mut writer = csv::Writer::from_path(&path)?;

        writer.write_record(["volume", "observed", "predicted", "residual_pct"])?;
        for r in &report.residuals {
            writer.write_record([
                r.volume.to_string(),
                r.observed.to_string(),
                r.predicted.to_string(),
                r.residual_pct.to_string(),
            ])?;
        }

        writer.flush().map_err(|e| io_error(&path, e))?;
        Ok(path)
    }
}

fn io_error(path: &Path, source: std::io::Error) -> Error {
    Error::Io {
        path: path.display().to_string(),
        source,
    }
}

impl ReportSink for ChartDataSink {
    fn name(&self) -> &str {
        "charts"
    }

    fn report(&mut self, report: &SnapshotReport) -> Result<()> {
        for dir in [&self.loglog_dir, &self.residuals_dir] {
            fs::create_dir_all(dir).map_err(|e| io_error(dir, e))?;
        }

        let loglog = self.write_loglog(report)?;
        let residuals = self.write_residuals(report)?;
        debug!(
            "wrote chart data for {}: {}, {}",
            report.label,
            loglog.display(),
            residuals.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{AnalysisSettings, analyze_snapshot};
    use impactfit_core::{DepthSnapshot, Side};
    use rust_decimal_macros::dec;

    fn report() -> SnapshotReport {
        let snapshot = DepthSnapshot::from_pairs(
            &[(dec!(99.5), dec!(50))],
            &[
                (dec!(100.0), dec!(50)),
                (dec!(100.5), dec!(100)),
                (dec!(101.0), dec!(200)),
            ],
        )
        .with_label("abc");
        let settings = AnalysisSettings {
            side: Side::Buy,
            volumes: vec![dec!(100), dec!(500), dec!(1000)],
            depth: 10,
        };
        analyze_snapshot(&snapshot, &settings).unwrap()
    }

    #[test]
    fn test_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = ChartDataSink::new(
            dir.path().join("Graph_LogLog"),
            dir.path().join("nested/Graph_Residuals"),
            10,
        );
        sink.report(&report()).unwrap();

        let loglog = fs::read_to_string(sink.loglog_path("abc")).unwrap();
        let lines: Vec<&str> = loglog.lines().collect();
        assert_eq!(lines[0], "kind,volume,impact");
        assert_eq!(lines.len(), 1 + 3 + 10);
        assert!(lines[1].starts_with("observed,100,"));
        assert_eq!(lines.iter().filter(|l| l.starts_with("fit,")).count(), 10);
        assert!(lines[4].starts_with("fit,"));

        let residuals = fs::read_to_string(sink.residuals_path("abc")).unwrap();
        let lines: Vec<&str> = residuals.lines().collect();
        assert_eq!(lines[0], "volume,observed,predicted,residual_pct");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_file_names() {
        let sink = ChartDataSink::new("a", "b", 100);
        assert_eq!(
            sink.loglog_path("x"),
            PathBuf::from("a").join("impact_loglog_x.csv")
        );
        assert_eq!(
            sink.residuals_path("x"),
            PathBuf::from("b").join("residuals_x.csv")
        );
    }
}
