// 💾 Export - issue list → CSV, audit report → JSON

use crate::vat::{AuditReport, VatIssue};
use anyhow::{Context, Result};
use std::path::Path;

/// Write the issue list as a one-column CSV ("VAT Issues" header),
/// one row per issue, in issue order
pub fn export_issues_csv(issues: &[VatIssue], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;

    wtr.write_record(["VAT Issues"])?;
    for issue in issues {
        wtr.write_record([issue.to_string()])?;
    }

    wtr.flush()
        .with_context(|| format!("Failed to write output file: {}", path.display()))?;
    Ok(())
}

/// Write the full audit report (issues + counts + timestamp) as JSON
pub fn export_report_json(report: &AuditReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write output file: {}", path.display()))?;
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
