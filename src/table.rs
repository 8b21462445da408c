// 📋 Table - Generic tabular structure
// Shared input shape for both the expense report and the rate config

use serde::{Deserialize, Serialize};

// ============================================================================
// COLUMN NOT FOUND
// ============================================================================

/// Raised when a named column does not exist in the source table.
/// Core transforms fail fast on this instead of guessing a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNotFound {
    pub column: String,
}

impl std::fmt::Display for ColumnNotFound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Column not found in table: {}", self.column)
    }
}

impl std::error::Error for ColumnNotFound {}

// ============================================================================
// TABLE
// ============================================================================

/// In-memory table: one header row plus string cells.
/// Every row holds exactly `headers.len()` cells (padded at load time),
/// so cell access by column index never goes out of bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Table {
            headers,
            rows: Vec::new(),
        }
    }

    /// Append a row, padding or truncating it to header width
    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    /// Resolve a column name to its index (exact match, first occurrence)
    pub fn column(&self, name: &str) -> Result<usize, ColumnNotFound> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ColumnNotFound {
                column: name.to_string(),
            })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ============================================================================
// CELL HELPERS
// ============================================================================

/// Blank-cell rule shared by the normalizer and the rate builder:
/// only the empty string counts as absent. No trimming - a cell of
/// whitespace is a value, same as the source system treats it.
pub fn opt_cell(cell: &str) -> Option<String> {
    if cell.is_empty() {
        None
    } else {
        Some(cell.to_string())
    }
}

/// Coerce-with-null numeric parse: trims, then parses as f64.
/// Anything unparseable (including blank) becomes None, never an error.
pub fn parse_numeric(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

// ============================================================================
// TESTS
// ============================================================================
