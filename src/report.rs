// 🧾 Report Normalizer - T&E report → ExpenseRecord rows
// Maps whatever columns the uploaded report uses onto a fixed
// six-field schema, coercing numerics and dropping unusable rows

use crate::table::{opt_cell, parse_numeric, ColumnNotFound, Table};
use serde::{Deserialize, Serialize};

// ============================================================================
// EXPENSE RECORD
// ============================================================================

/// One normalized line item from the uploaded report.
///
/// Invariant: `amount` is always a valid finite number - rows whose
/// amount fails numeric coercion never become records. `tax` is the
/// only numeric field allowed to be missing; that only affects the
/// comparison later, not retention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub expense: String,
    pub amount: f64,
    pub tax: Option<f64>,
    pub category: Option<String>,
    pub country: Option<String>,
    pub currency: String,
}

// ============================================================================
// COLUMN SELECTORS
// ============================================================================

/// Which source columns hold each report field.
/// Defaults match the standard T&E export headers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportColumns {
    pub expense: String,
    pub amount: String,
    pub tax: String,
    pub category: String,
    pub country: String,
    pub currency: String,
}

impl Default for ReportColumns {
    fn default() -> Self {
        ReportColumns {
            expense: "Expense".to_string(),
            amount: "Amount".to_string(),
            tax: "Tax".to_string(),
            category: "Category".to_string(),
            country: "Country".to_string(),
            currency: "Currency".to_string(),
        }
    }
}

// ============================================================================
// NORMALIZER
// ============================================================================

/// Normalize an uploaded expense report into ExpenseRecord rows.
///
/// - `amount` and `tax` are numeric-coerced; unparseable values become
///   missing rather than errors
/// - rows with a missing `amount` are dropped entirely
/// - `expense` and `currency` are copied verbatim
/// - `category` and `country` are copied verbatim, with a blank cell
///   normalized to None
/// - output order equals source row order restricted to retained rows
pub fn normalize_report(
    table: &Table,
    columns: &ReportColumns,
) -> Result<Vec<ExpenseRecord>, ColumnNotFound> {
    let expense_idx = table.column(&columns.expense)?;
    let amount_idx = table.column(&columns.amount)?;
    let tax_idx = table.column(&columns.tax)?;
    let category_idx = table.column(&columns.category)?;
    let country_idx = table.column(&columns.country)?;
    let currency_idx = table.column(&columns.currency)?;

    let mut records = Vec::new();

    for row in &table.rows {
        // Rows that fail amount coercion are unusable for comparison
        let amount = match parse_numeric(&row[amount_idx]) {
            Some(amount) => amount,
            None => continue,
        };

        records.push(ExpenseRecord {
            expense: row[expense_idx].clone(),
            amount,
            tax: parse_numeric(&row[tax_idx]),
            category: opt_cell(&row[category_idx]),
            country: opt_cell(&row[country_idx]),
            currency: row[currency_idx].clone(),
        });
    }

    Ok(records)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn report_table(rows: Vec<Vec<&str>>) -> Table {
        let mut table = Table::new(
            vec!["Expense", "Amount", "Tax", "Category", "Country", "Currency"]
                .into_iter()
                .map(String::from)
                .collect(),
        );
        for row in rows {
            table.push_row(row.into_iter().map(String::from).collect());
        }
        table
    }

    #[test]
    fn test_normalize_basic_report() {
        let table = report_table(vec![
            vec!["Hotel", "100", "19", "Lodging", "DE", "EUR"],
            vec!["Dinner", "45.50", "3.64", "Meal", "FR", "EUR"],
        ]);

        let records = normalize_report(&table, &ReportColumns::default()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].expense, "Hotel");
        assert_eq!(records[0].amount, 100.0);
        assert_eq!(records[0].tax, Some(19.0));
        assert_eq!(records[0].category.as_deref(), Some("Lodging"));
        assert_eq!(records[0].country.as_deref(), Some("DE"));
        assert_eq!(records[0].currency, "EUR");
    }

    #[test]
    fn test_rows_without_amount_are_dropped() {
        let table = report_table(vec![
            vec!["Hotel", "100", "19", "Lodging", "DE", "EUR"],
            vec!["Mystery", "n/a", "5", "Meal", "DE", "EUR"],
            vec!["Blank", "", "5", "Meal", "DE", "EUR"],
            vec!["Taxi", "20", "4", "Transport", "DE", "EUR"],
        ]);

        let records = normalize_report(&table, &ReportColumns::default()).unwrap();

        // No retained record has a missing amount
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.amount.is_finite()));
        // Row order preserved among retained rows
        assert_eq!(records[0].expense, "Hotel");
        assert_eq!(records[1].expense, "Taxi");
    }

    #[test]
    fn test_missing_tax_does_not_drop_row() {
        let table = report_table(vec![vec!["Hotel", "100", "", "Lodging", "DE", "EUR"]]);

        let records = normalize_report(&table, &ReportColumns::default()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].tax, None);
    }

    #[test]
    fn test_blank_category_and_country_become_none() {
        let table = report_table(vec![vec!["Hotel", "100", "19", "", "", "EUR"]]);

        let records = normalize_report(&table, &ReportColumns::default()).unwrap();

        assert_eq!(records[0].category, None);
        assert_eq!(records[0].country, None);
    }

    #[test]
    fn test_text_fields_copied_verbatim() {
        let table = report_table(vec![vec![
            "  Hotel Adlon  ",
            "100",
            "19",
            " Lodging",
            "DE ",
            " EUR",
        ]]);

        let records = normalize_report(&table, &ReportColumns::default()).unwrap();

        // No trimming on any text field
        assert_eq!(records[0].expense, "  Hotel Adlon  ");
        assert_eq!(records[0].category.as_deref(), Some(" Lodging"));
        assert_eq!(records[0].country.as_deref(), Some("DE "));
        assert_eq!(records[0].currency, " EUR");
    }

    #[test]
    fn test_missing_column_fails_fast() {
        let mut table = Table::new(vec!["Expense".to_string(), "Amount".to_string()]);
        table.push_row(vec!["Hotel".to_string(), "100".to_string()]);

        let err = normalize_report(&table, &ReportColumns::default()).unwrap_err();
        assert_eq!(err.column, "Tax");
    }

    #[test]
    fn test_custom_column_names() {
        let mut table = Table::new(
            vec!["Desc", "Net", "VAT", "Cat", "Ctry", "Ccy"]
                .into_iter()
                .map(String::from)
                .collect(),
        );
        table.push_row(
            vec!["Hotel", "100", "19", "Lodging", "DE", "EUR"]
                .into_iter()
                .map(String::from)
                .collect(),
        );

        let columns = ReportColumns {
            expense: "Desc".to_string(),
            amount: "Net".to_string(),
            tax: "VAT".to_string(),
            category: "Cat".to_string(),
            country: "Ctry".to_string(),
            currency: "Ccy".to_string(),
        };

        let records = normalize_report(&table, &columns).unwrap();
        assert_eq!(records[0].expense, "Hotel");
        assert_eq!(records[0].amount, 100.0);
    }
}
