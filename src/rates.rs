// 🗺️ Rate Table Builder - tax config → (category, country) lookup
// One rate per (category, country) pair, last row wins on duplicates

use crate::table::{opt_cell, parse_numeric, ColumnNotFound, Table};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// RATE KEY
// ============================================================================

/// Lookup key for a rate rule. None means the config row left the
/// field blank; it is a literal key value with ordinary equality
/// (None == None), NOT a wildcard that matches everything.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RateKey {
    pub category: Option<String>,
    pub country: Option<String>,
}

impl RateKey {
    pub fn new(category: Option<String>, country: Option<String>) -> Self {
        RateKey { category, country }
    }
}

// ============================================================================
// RATE TABLE
// ============================================================================

/// Lookup from (category, country) to the applicable tax rate.
/// The rate is stored as coerced: None marks a config row whose rate
/// cell was not numeric. Such entries still exist (and still shadow
/// earlier rows for the same key) - the comparator decides what a
/// missing rate means.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RateTable {
    rules: HashMap<RateKey, Option<f64>>,
}

impl RateTable {
    pub fn new() -> Self {
        RateTable {
            rules: HashMap::new(),
        }
    }

    pub fn insert(&mut self, key: RateKey, rate: Option<f64>) {
        self.rules.insert(key, rate);
    }

    /// Exact-match lookup. Outer None = no rule for this key,
    /// inner None = rule exists but its rate was not numeric.
    pub fn get(&self, category: &Option<String>, country: &Option<String>) -> Option<Option<f64>> {
        let key = RateKey {
            category: category.clone(),
            country: country.clone(),
        };
        self.rules.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

// ============================================================================
// COLUMN SELECTORS
// ============================================================================

/// Which source columns hold each rate-config field.
/// Defaults match the standard tax-code configuration headers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateColumns {
    pub code: String,
    pub rate: String,
    pub category: String,
    pub country: String,
}

impl Default for RateColumns {
    fn default() -> Self {
        RateColumns {
            code: "TaxCode".to_string(),
            rate: "TaxRate".to_string(),
            category: "Category".to_string(),
            country: "Country".to_string(),
        }
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Build the rate lookup from an uploaded tax-code configuration table.
///
/// Rows are read in source order; a later row with the same
/// (category, country) silently overwrites an earlier one. The tax
/// code column must exist but its value is not used in matching -
/// the config schema carries it, the lookup does not.
///
/// Rates are numeric-coerced here rather than at comparison time: a
/// non-numeric rate cell is inserted as None, still shadows earlier
/// rows for its key, and suppresses the comparison for matching
/// records. Decision recorded in DESIGN.md.
pub fn build_rate_table(
    table: &Table,
    columns: &RateColumns,
) -> Result<RateTable, ColumnNotFound> {
    // Resolved so a malformed config still fails fast, read-and-ignore
    let _code_idx = table.column(&columns.code)?;
    let rate_idx = table.column(&columns.rate)?;
    let category_idx = table.column(&columns.category)?;
    let country_idx = table.column(&columns.country)?;

    let mut rates = RateTable::new();

    for row in &table.rows {
        let key = RateKey::new(opt_cell(&row[category_idx]), opt_cell(&row[country_idx]));
        rates.insert(key, parse_numeric(&row[rate_idx]));
    }

    Ok(rates)
}

// ============================================================================
// TESTS
// ============================================================================
