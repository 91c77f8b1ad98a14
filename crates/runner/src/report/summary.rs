use log::info;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use crate::analysis::SnapshotReport;
use crate::error::{Error, Result};
use crate::report::ReportSink;
use crate::study::StudySummary;

/// Collects reports and writes them with the study summary as pretty JSON
pub struct JsonSummarySink {
    path: PathBuf,
    reports: Vec<SnapshotReport>,
}

#[derive(Serialize)]
struct SummaryDocument<'a> {
    summary: &'a StudySummary,
    reports: &'a [SnapshotReport],
}

impl JsonSummarySink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            reports: Vec::new(),
        }
    }
}

impl ReportSink for JsonSummarySink {
    fn name(&self) -> &str {
        "json-summary"
    }

    fn report(&mut self, report: &SnapshotReport) -> Result<()> {
        self.reports.push(report.clone());
        Ok(())
    }

    fn finish(&mut self, summary: &StudySummary) -> Result<()> {
        let io_err = |e| Error::Io {
            path: self.path.display().to_string(),
            source: e,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let mut writer = BufWriter::new(File::create(&self.path).map_err(io_err)?);
        serde_json::to_writer_pretty(
            &mut writer,
            &SummaryDocument {
                summary,
                reports: &self.reports,
            },
        )?;
        writer.flush().map_err(io_err)?;

        info!(
            "wrote summary of {} snapshot(s) to {}",
            self.reports.len(),
            self.path.display()
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

    fn report(label: &str) -> SnapshotReport {
        let snapshot = DepthSnapshot::from_pairs(
            &[(dec!(99.5), dec!(50))],
            &[(dec!(100.0), dec!(50)), (dec!(100.5), dec!(100))],
        )
        .with_label(label);
        let settings = AnalysisSettings {
            side: Side::Buy,
            volumes: vec![dec!(10), dec!(100)],
            depth: 10,
        };
        analyze_snapshot(&snapshot, &settings).unwrap()
    }

    #[test]
    fn test_writes_document_into_new_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/nested/summary.json");
        let mut sink = JsonSummarySink::new(&path);

        sink.report(&report("first")).unwrap();
        sink.report(&report("second")).unwrap();
        let summary = StudySummary {
            processed: 2,
            skipped: 1,
            failures: vec![("broken".to_string(), "Missing column: ask_sz_00".to_string())],
        };
        sink.finish(&summary).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["summary"]["processed"], 2);
        assert_eq!(json["summary"]["skipped"], 1);
        assert_eq!(json["summary"]["failures"][0][0], "broken");

        let reports = json["reports"].as_array().unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0]["label"], "first");
        assert_eq!(reports[1]["label"], "second");
        assert_eq!(reports[0]["crossed"], false);
        assert_eq!(reports[0]["curve"].as_array().unwrap().len(), 2);
        assert_eq!(reports[0]["impact_bps"].as_array().unwrap().len(), 2);
        assert!(reports[0]["model"]["exponent"].is_number());
    }

    #[test]
    fn test_empty_study_still_writes_summary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        let mut sink = JsonSummarySink::new(&path);
        sink.finish(&StudySummary::default()).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["summary"]["processed"], 0);
        assert!(json["reports"].as_array().unwrap().is_empty());
    }
}
