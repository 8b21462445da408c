use anyhow::{anyhow, Result};
use std::env;
use std::path::{Path, PathBuf};

use vat_audit::{
    audit, build_rate_table, export_issues_csv, export_report_json, load_table, normalize_report,
    RateColumns, ReportColumns, VERSION,
};

/// Parsed command line: two input paths, an optional output path, and
/// column-name overrides on top of the fixed defaults
#[derive(Debug)]
struct CliOptions {
    report_path: PathBuf,
    rates_path: PathBuf,
    output: Option<PathBuf>,
    report_columns: ReportColumns,
    rate_columns: RateColumns,
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("❌ {}", e);
            eprintln!();
            print_usage(&args);
            std::process::exit(1);
        }
    };

    run_audit(&options)
}

fn parse_args(args: &[String]) -> Result<CliOptions> {
    let mut positional: Vec<String> = Vec::new();
    let mut report_columns = ReportColumns::default();
    let mut rate_columns = RateColumns::default();

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        if let Some(flag) = arg.strip_prefix("--") {
            let value = iter
                .next()
                .ok_or_else(|| anyhow!("Missing value for --{}", flag))?
                .clone();
            match flag {
                // Report column overrides
                "expense-col" => report_columns.expense = value,
                "amount-col" => report_columns.amount = value,
                "tax-col" => report_columns.tax = value,
                "category-col" => report_columns.category = value,
                "country-col" => report_columns.country = value,
                "currency-col" => report_columns.currency = value,
                // Rate-config column overrides
                "code-col" => rate_columns.code = value,
                "rate-col" => rate_columns.rate = value,
                "rates-category-col" => rate_columns.category = value,
                "rates-country-col" => rate_columns.country = value,
                _ => return Err(anyhow!("Unknown flag: --{}", flag)),
            }
        } else {
            positional.push(arg.clone());
        }
    }

    if positional.len() < 2 || positional.len() > 3 {
        return Err(anyhow!("Expected <report-file> <rates-file> [output-file]"));
    }

    Ok(CliOptions {
        report_path: PathBuf::from(&positional[0]),
        rates_path: PathBuf::from(&positional[1]),
        output: positional.get(2).map(PathBuf::from),
        report_columns,
        rate_columns,
    })
}

fn print_usage(args: &[String]) {
    let program = args.first().map(String::as_str).unwrap_or("vat-audit");
    eprintln!("vat-audit {}", VERSION);
    eprintln!();
    eprintln!("Usage: {} <report-file> <rates-file> [output-file] [flags]", program);
    eprintln!();
    eprintln!("  report-file   T&E report (csv, xlsx, xls)");
    eprintln!("  rates-file    Tax-code configuration (csv, xlsx, xls)");
    eprintln!("  output-file   Optional: write issues (.csv) or full report (.json)");
    eprintln!();
    eprintln!("Report column overrides (defaults in parentheses):");
    eprintln!("  --expense-col NAME    (Expense)");
    eprintln!("  --amount-col NAME     (Amount)");
    eprintln!("  --tax-col NAME        (Tax)");
    eprintln!("  --category-col NAME   (Category)");
    eprintln!("  --country-col NAME    (Country)");
    eprintln!("  --currency-col NAME   (Currency)");
    eprintln!();
    eprintln!("Rate-config column overrides:");
    eprintln!("  --code-col NAME            (TaxCode)");
    eprintln!("  --rate-col NAME            (TaxRate)");
    eprintln!("  --rates-category-col NAME  (Category)");
    eprintln!("  --rates-country-col NAME   (Country)");
}

fn run_audit(options: &CliOptions) -> Result<()> {
    println!("🧾 VAT Audit - expense report vs tax-rate configuration");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // 1. Load both input tables
    println!("\n📂 Loading report: {}", options.report_path.display());
    let report_table = load_table(&options.report_path)?;
    println!("✓ Loaded {} rows", report_table.row_count());

    println!("\n📂 Loading rate configuration: {}", options.rates_path.display());
    let rates_table = load_table(&options.rates_path)?;
    println!("✓ Loaded {} rows", rates_table.row_count());

    // 2. Normalize the report
    println!("\n🧾 Normalizing expense records...");
    let records = normalize_report(&report_table, &options.report_columns)?;
    let dropped = report_table.row_count() - records.len();
    println!("✓ {} expense records ({} rows dropped: no amount)", records.len(), dropped);

    // 3. Build the rate lookup
    println!("\n🗺️  Building rate table...");
    let rates = build_rate_table(&rates_table, &options.rate_columns)?;
    println!("✓ {} rate rules", rates.len());

    // 4. Compare
    println!("\n⚖️  Checking VAT...");
    let report = audit(&records, &rates);

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("{}", report.summary());

    for issue in &report.issues {
        println!("  ⚠️  {}", issue);
    }

    if report.is_clean() {
        println!("✅ No VAT issues found");
    }

    // 5. Optional export
    if let Some(output) = &options.output {
        let is_json = output
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            export_report_json(&report, output)?;
        } else {
            export_issues_csv(&report.issues, output)?;
        }
        println!("\n💾 Wrote {}", output.display());
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
