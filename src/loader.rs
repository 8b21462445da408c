// 📂 File Loader - CSV / XLSX / XLS → Table
// Dispatches on file extension; parse errors surface at this boundary
// so the core transforms never see half-loaded data

use crate::table::Table;
use anyhow::{anyhow, Context, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

/// Load an uploaded report or rate-config file into a Table.
///
/// Extension dispatch (case-insensitive):
///   csv        → delimited text with a header row
///   xlsx / xls → first worksheet, row 0 as headers
/// Anything else is rejected with a user-facing error.
pub fn load_table(path: &Path) -> Result<Table> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => load_csv(path),
        "xlsx" | "xls" => load_spreadsheet(path),
        _ => Err(anyhow!(
            "Unsupported file type: {}. Please use a CSV or Excel file.",
            path.display()
        )),
    }
}

fn load_csv(path: &Path) -> Result<Table> {
    // Flexible: ragged rows are tolerated here and padded/truncated to
    // header width by Table::push_row, same as spreadsheet input
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

    let headers = rdr
        .headers()
        .with_context(|| format!("Failed to read CSV headers: {}", path.display()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut table = Table::new(headers);

    for result in rdr.records() {
        let record = result
            .with_context(|| format!("Failed to read CSV row: {}", path.display()))?;
        table.push_row(record.iter().map(|c| c.to_string()).collect());
    }

    Ok(table)
}

fn load_spreadsheet(path: &Path) -> Result<Table> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open spreadsheet: {}", path.display()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| anyhow!("Spreadsheet has no worksheets: {}", path.display()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("Failed to read worksheet '{}'", sheet_name))?;

    let mut rows = range.rows();

    let headers = rows
        .next()
        .ok_or_else(|| anyhow!("Worksheet '{}' is empty", sheet_name))?
        .iter()
        .map(cell_to_string)
        .collect();

    let mut table = Table::new(headers);

    for row in rows {
        table.push_row(row.iter().map(cell_to_string).collect());
    }

    Ok(table)
}

/// Render a spreadsheet cell the way it would appear in a CSV export.
/// Empty cells become the empty string, the Table's absent value.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => {
            // Whole numbers render without a trailing ".0" so that
            // "100" in a spreadsheet matches "100" in a CSV
            if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("#{:?}", e),
    }
}

// ============================================================================
// TESTS
// ============================================================================
