use rust_decimal::Decimal;
use std::io::{self, Stdout, Write};

use crate::analysis::SnapshotReport;
use crate::error::{Error, Result};
use crate::report::ReportSink;
use crate::study::StudySummary;

/// Prints each snapshot's impacts and fitted model
///
/// ```text
/// Snapshot: Data/aapl/xnas-20240102.csv
///      100 → impact = 0.2500
///      500 → impact = 0.7100
///   Fit: g(X) = 0.012345 * X^0.456
/// ```
pub struct ConsoleSink<W: Write = Stdout> {
    out: W,
}

impl ConsoleSink<Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_report(&mut self, report: &SnapshotReport) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Snapshot: {}", report.display_name())?;
        for sample in report.curve.iter() {
            writeln!(
                self.out,
                "  {:>6} → impact = {}",
                sample.target_volume.normalize().to_string(),
                fixed(sample.impact, 4)
            )?;
        }
        writeln!(self.out, "  Fit: {}", report.model)?;
        Ok(())
    }

    fn write_summary(&mut self, summary: &StudySummary) -> io::Result<()> {
        if !summary.failures.is_empty() {
            writeln!(self.out)?;
            writeln!(self.out, "Skipped {} snapshot(s):", summary.skipped)?;
            for (label, message) in &summary.failures {
                writeln!(self.out, "  {}: {}", label, message)?;
            }
        }
        self.out.flush()
    }
}

/// `value` rounded to exactly `dp` decimal places
fn fixed(value: Decimal, dp: u32) -> String {
    let mut rounded = value.round_dp(dp);
    rounded.rescale(dp);
    rounded.to_string()
}

impl<W: Write + Send> ReportSink for ConsoleSink<W> {
    fn name(&self) -> &str {
        "console"
    }

    fn report(&mut self, report: &SnapshotReport) -> Result<()> {
        self.write_report(report).map_err(|e| Error::Io {
            path: "<console>".to_string(),
            source: e,
        })
    }

    fn finish(&mut self, summary: &StudySummary) -> Result<()> {
        self.write_summary(summary).map_err(|e| Error::Io {
            path: "<console>".to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{AnalysisSettings, analyze_snapshot};
    use impactfit_core::{DepthSnapshot, Side};
    use rust_decimal_macros::dec;

    #[test]
    fn test_fixed() {
        assert_eq!(fixed(dec!(0.5416666), 4), "0.5417");
        assert_eq!(fixed(dec!(1), 4), "1.0000");
        assert_eq!(fixed(dec!(-0.25), 4), "-0.2500");
    }

    #[test]
    fn test_console_output() {
        // Every order overflows the single level, so impact is flat at 1
        let snapshot =
            DepthSnapshot::from_pairs(&[(dec!(99), dec!(10))], &[(dec!(101), dec!(10))])
                .with_label("flat");
        let settings = AnalysisSettings {
            side: Side::Buy,
            volumes: vec![dec!(100), dec!(1000.0)],
            depth: 1,
        };
        let report = analyze_snapshot(&snapshot, &settings)
            .unwrap()
            .with_source("Data/flat.csv");

        let mut sink = ConsoleSink::new(Vec::new());
        sink.report(&report).unwrap();
        sink.finish(&StudySummary::default()).unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "Snapshot: Data/flat.csv");
        assert_eq!(lines[2], "     100 → impact = 1.0000");
        assert_eq!(lines[3], "    1000 → impact = 1.0000");
        assert!(lines[4].starts_with("  Fit: g(X) = 1.000000 * X^"));
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_failures_listed_once_at_finish() {
        let summary = StudySummary {
            processed: 0,
            skipped: 2,
            failures: vec![
                ("a".to_string(), "Missing column: ask_sz_00".to_string()),
                ("b".to_string(), "Snapshot 'b' has no data rows".to_string()),
            ],
        };

        let mut sink = ConsoleSink::new(Vec::new());
        sink.finish(&summary).unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();

        assert_eq!(
            text,
            "\nSkipped 2 snapshot(s):\n  a: Missing column: ask_sz_00\n  b: Snapshot 'b' has no data rows\n"
        );
    }
}
