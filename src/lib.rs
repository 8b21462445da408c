// VAT Audit - Core Library
// Exposes all modules for use in the CLI and tests

pub mod table;
pub mod loader;
pub mod report;
pub mod rates;
pub mod vat;
pub mod export;

// Re-export commonly used types
pub use table::{ColumnNotFound, Table};
pub use loader::load_table;
pub use report::{normalize_report, ExpenseRecord, ReportColumns};
pub use rates::{build_rate_table, RateColumns, RateKey, RateTable};
pub use vat::{audit, find_vat_issues, issue_messages, AuditReport, VatIssue, TOLERANCE};
pub use export::{export_issues_csv, export_report_json};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
