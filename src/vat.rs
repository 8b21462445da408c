// ⚖️ VAT Comparator - actual vs expected tax per expense record
// One pass over the normalized report; issue order follows row order

use crate::rates::RateTable;
use crate::report::ExpenseRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tolerance for the tax comparison. Absorbs floating-point and
/// rounding noise in the source figures; fixed, not configurable.
pub const TOLERANCE: f64 = 0.01;

// ============================================================================
// VAT ISSUE
// ============================================================================

/// A human-readable flag for one expense record: either no rate rule
/// exists for its (category, country), or the recorded tax diverges
/// from the expected amount by more than the tolerance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VatIssue {
    MissingRule { expense: String },
    Mismatch { expense: String, expected_tax: f64 },
}

impl std::fmt::Display for VatIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VatIssue::MissingRule { expense } => {
                write!(f, "Missing tax code for expense: {}", expense)
            }
            VatIssue::Mismatch {
                expense,
                expected_tax,
            } => {
                write!(
                    f,
                    "Potential tax code mismatch for expense: {}, expected tax: {:.2}",
                    expense, expected_tax
                )
            }
        }
    }
}

// ============================================================================
// COMPARATOR
// ============================================================================

/// Compare each record's recorded tax against the rate table.
///
/// Per record, in input order:
/// 1. Exact-match lookup of (category, country); None == None.
/// 2. No rule → MissingRule issue.
/// 3. Rule present: if the record's tax or the rule's rate failed
///    numeric coercion, the arithmetic is undefined and the row passes
///    without an issue.
/// 4. Otherwise expected = amount * rate; a difference beyond the
///    tolerance → Mismatch issue with the expected tax.
pub fn find_vat_issues(records: &[ExpenseRecord], rates: &RateTable) -> Vec<VatIssue> {
    let mut issues = Vec::new();

    for record in records {
        match rates.get(&record.category, &record.country) {
            None => {
                issues.push(VatIssue::MissingRule {
                    expense: record.expense.clone(),
                });
            }
            Some(rate) => {
                let (tax, rate) = match (record.tax, rate) {
                    (Some(tax), Some(rate)) => (tax, rate),
                    _ => continue,
                };

                let expected_tax = record.amount * rate;
                if (tax - expected_tax).abs() > TOLERANCE {
                    issues.push(VatIssue::Mismatch {
                        expense: record.expense.clone(),
                        expected_tax,
                    });
                }
            }
        }
    }

    issues
}

/// Render the issue list as plain strings, in the same order
pub fn issue_messages(issues: &[VatIssue]) -> Vec<String> {
    issues.iter().map(|issue| issue.to_string()).collect()
}

// ============================================================================
// AUDIT REPORT
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub issues: Vec<VatIssue>,
    pub records_checked: usize,
    pub missing_rule_count: usize,
    pub mismatch_count: usize,
    pub checked_at: DateTime<Utc>,
}

impl AuditReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "Checked {} expense records: {} issues ({} missing tax codes, {} mismatches)",
            self.records_checked,
            self.issues.len(),
            self.missing_rule_count,
            self.mismatch_count
        )
    }
}

/// Run the comparator and wrap the result with counts and a timestamp
pub fn audit(records: &[ExpenseRecord], rates: &RateTable) -> AuditReport {
    let issues = find_vat_issues(records, rates);

    let missing_rule_count = issues
        .iter()
        .filter(|i| matches!(i, VatIssue::MissingRule { .. }))
        .count();
    let mismatch_count = issues.len() - missing_rule_count;

    AuditReport {
        issues,
        records_checked: records.len(),
        missing_rule_count,
        mismatch_count,
        checked_at: Utc::now(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
