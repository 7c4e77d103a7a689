//! Batch reporting
//!
//! A [`BatchReport`] records which requests were applied and which were skipped,
//! with console and JSON renderings. It never contains cell values.

use crate::domain::{Result, ScrubError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// Outcome of one applied request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppliedTransform {
    /// Column that was replaced
    pub column: String,

    /// Transform kind
    pub kind: String,

    /// Rows in the replaced column
    pub rows: usize,

    /// Distinct values transformed
    pub distinct_values: usize,

    /// Wall-clock time spent (ms)
    pub elapsed_ms: u64,
}

/// A request the batch did not apply
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkippedRequest {
    /// Column named by the request
    pub column: String,

    /// Kind name as given in the request
    pub kind: String,

    /// Why it was skipped
    pub reason: String,
}

/// Report for one batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    /// Unique id of this run
    pub run_id: Uuid,

    /// When the batch started
    pub started_at: DateTime<Utc>,

    /// Rows in the input table
    pub total_rows: usize,

    /// Applied requests, in order
    pub applied: Vec<AppliedTransform>,

    /// Skipped requests, in order
    pub skipped: Vec<SkippedRequest>,

    /// Total processing time (ms)
    pub total_elapsed_ms: u64,

    /// Whether outputs were withheld
    pub dry_run: bool,
}

impl BatchReport {
    /// Create an empty report for a table of `total_rows` rows
    pub fn new(total_rows: usize) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            total_rows,
            applied: Vec::new(),
            skipped: Vec::new(),
            total_elapsed_ms: 0,
            dry_run: false,
        }
    }

    /// Record an applied request
    pub fn record_applied(&mut self, applied: AppliedTransform) {
        self.total_elapsed_ms += applied.elapsed_ms;
        self.applied.push(applied);
    }

    /// Record a skipped request
    pub fn record_skipped(
        &mut self,
        column: impl Into<String>,
        kind: impl Into<String>,
        error: &ScrubError,
    ) {
        self.skipped.push(SkippedRequest {
            column: column.into(),
            kind: kind.into(),
            reason: error.to_string(),
        });
    }

    /// Whether every request was applied
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Format report for console output
    pub fn format_console(&self) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        if self.dry_run {
            output.push_str("                  TABSCRUB DRY-RUN REPORT                      \n");
        } else {
            output.push_str("                      TABSCRUB REPORT                          \n");
        }
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push('\n');

        output.push_str("📊 SUMMARY\n");
        output.push_str("───────────────────────────────────────────────────────────────\n");
        output.push_str(&format!("  Run ID:             {}\n", self.run_id));
        output.push_str(&format!(
            "  Started:            {}\n",
            self.started_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        output.push_str(&format!("  Rows:               {}\n", self.total_rows));
        output.push_str(&format!("  Applied Transforms: {}\n", self.applied.len()));
        output.push_str(&format!("  Skipped Requests:   {}\n", self.skipped.len()));
        output.push_str(&format!(
            "  Processing Time:    {} ms\n",
            self.total_elapsed_ms
        ));
        output.push('\n');

        if !self.applied.is_empty() {
            output.push_str("🔐 APPLIED TRANSFORMS\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");
            output.push_str(&format!(
                "  {:24} {:12} {:>8} {:>9} {:>6}\n",
                "Column", "Kind", "Rows", "Distinct", "ms"
            ));
            for t in &self.applied {
                output.push_str(&format!(
                    "  {:24} {:12} {:>8} {:>9} {:>6}\n",
                    t.column, t.kind, t.rows, t.distinct_values, t.elapsed_ms
                ));
            }
            output.push('\n');
        }

        if !self.skipped.is_empty() {
            output.push_str("⚠️  SKIPPED REQUESTS\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");
            for s in &self.skipped {
                output.push_str(&format!("  • {} ({}): {}\n", s.column, s.kind, s.reason));
            }
            output.push('\n');
        }

        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push('\n');

        output
    }

    /// Format report as JSON
    pub fn format_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the JSON report to `path`
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let json = self.format_json()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn applied(column: &str, elapsed_ms: u64) -> AppliedTransform {
        AppliedTransform {
            column: column.to_string(),
            kind: "encrypt".to_string(),
            rows: 10,
            distinct_values: 4,
            elapsed_ms,
        }
    }

    #[test]
    fn test_report_creation() {
        let report = BatchReport::new(10);
        assert_eq!(report.total_rows, 10);
        assert!(report.applied.is_empty());
        assert!(report.is_complete());
    }

    #[test]
    fn test_record_applied_accumulates_time() {
        let mut report = BatchReport::new(10);
        report.record_applied(applied("ssn", 3));
        report.record_applied(applied("name", 5));
        assert_eq!(report.total_elapsed_ms, 8);
    }

    #[test]
    fn test_record_skipped() {
        let mut report = BatchReport::new(10);
        report.record_skipped("ssn", "bogus", &ScrubError::UnknownTransformKind("bogus".into()));
        assert!(!report.is_complete());
        assert!(report.skipped[0].reason.contains("bogus"));
    }

    #[test]
    fn test_format_console() {
        let mut report = BatchReport::new(10);
        report.record_applied(applied("ssn", 3));
        report.record_skipped("zip", "truncate", &ScrubError::missing_parameter("zip", "truncate", "count"));

        let output = report.format_console();
        assert!(output.contains("TABSCRUB REPORT"));
        assert!(output.contains("Applied Transforms: 1"));
        assert!(output.contains("Skipped Requests:   1"));
        assert!(output.contains("zip (truncate)"));
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports/run.json");
        let report = BatchReport::new(3);
        report.write_to_file(&path).unwrap();

        let parsed: BatchReport =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.run_id, report.run_id);
    }
}
