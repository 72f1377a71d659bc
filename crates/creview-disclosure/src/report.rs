//! # Disclosure Report
//!
//! The per-run aggregate the reporter renders: the witness registry and the
//! severity-sorted findings.

use serde::Serialize;

use creview_core::{ScannedSource, Severity, SourceFile};

use crate::rules::{evaluate, sort_by_severity, DisclosureIssue};
use crate::witness::{find_witness_declarations, WitnessDeclaration};

/// Finding counts by severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
}

impl SeverityCounts {
    pub fn total(&self) -> usize {
        self.critical + self.high + self.medium
    }
}

/// Result of a disclosure check over one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisclosureReport {
    /// Path of the analyzed file, as given.
    pub path: String,
    /// Registered witness declarations in file order.
    pub witnesses: Vec<WitnessDeclaration>,
    /// Findings, stably sorted by severity.
    pub issues: Vec<DisclosureIssue>,
    pub summary: SeverityCounts,
}

impl DisclosureReport {
    /// Run the full disclosure pipeline over a loaded file.
    pub fn analyze(source: &SourceFile) -> Self {
        Self::analyze_text(source.path().display().to_string(), source.text())
    }

    /// Run the pipeline over in-memory text.
    pub fn analyze_text(path: impl Into<String>, text: &str) -> Self {
        let scanned = ScannedSource::new(text);
        let witnesses = find_witness_declarations(&scanned);
        let mut issues = evaluate(&witnesses, &scanned);
        sort_by_severity(&mut issues);

        let mut summary = SeverityCounts::default();
        for issue in &issues {
            match issue.severity {
                Severity::Critical => summary.critical += 1,
                Severity::High => summary.high += 1,
                Severity::Medium => summary.medium += 1,
            }
        }

        Self {
            path: path.into(),
            witnesses,
            issues,
            summary,
        }
    }

    /// True when no findings were produced.
    pub fn passed(&self) -> bool {
        self.issues.is_empty()
    }
}
