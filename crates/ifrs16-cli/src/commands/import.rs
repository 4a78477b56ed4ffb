use clap::Args;
use serde_json::{json, Value};
use tracing::info;

use ifrs16_core::import::{self, ImportedTable};
use ifrs16_core::portfolio;

use crate::input;

/// Arguments for a lease register import
#[derive(Args)]
pub struct ImportArgs {
    /// Path to the lease register CSV (first row holds the headers)
    #[arg(long)]
    pub csv: String,

    /// Measure the imported contracts and print the portfolio summary
    #[arg(long)]
    pub measure: bool,
}

pub fn run_import(args: ImportArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let table = read_register(&args.csv)?;
    info!(
        path = %args.csv,
        rows = table.rows.len(),
        rejected = table.rejected.len(),
        "lease register imported"
    );
    let mut warnings = table.warnings();

    if args.measure {
        let mut output = portfolio::summarize_portfolio(&table.into_contracts())?;
        // Import problems come first; they explain most exclusions
        warnings.append(&mut output.warnings);
        output.warnings = warnings;
        return Ok(serde_json::to_value(output)?);
    }

    Ok(json!({
        "results": table.rows.iter().map(|r| &r.params).collect::<Vec<_>>(),
        "unmapped_headers": table.rows.first().map(|r| r.unmapped_headers.clone()).unwrap_or_default(),
        "rejected": table.rejected,
        "warnings": warnings,
    }))
}

fn read_register(path: &str) -> Result<ImportedTable, Box<dyn std::error::Error>> {
    let canonical = input::file::resolve_path(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut records = Vec::new();
    for record in reader.records() {
        let record = record?;
        records.push(record.iter().map(str::to_string).collect::<Vec<String>>());
    }
    Ok(import::map_table(&headers, &records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn register_file(name: &str, contents: &str) -> String {
        let path = std::env::temp_dir().join(format!("ifrs16-{}-{name}", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_measured_import_keeps_row_warnings() {
        let csv = "Contract ID,Commencement Date,Non-cancellable Years,Fixed Payment,IBR\n\
                   A,2025-01-01,2,1000,12\n\
                   B,someday,2,1000,12\n\
                   C,2025-01-01,2,1000,12,extra\n";
        let path = register_file("warnings.csv", csv);
        let value = run_import(ImportArgs { csv: path.clone(), measure: true }).unwrap();
        std::fs::remove_file(&path).ok();

        let warnings: Vec<&str> = value["warnings"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert!(warnings[0].starts_with("Row 2: 'Commencement Date'"));
        assert!(warnings[1].starts_with("Row 3 rejected"));
        // B lacks a usable date and is excluded by the roll-up
        assert!(warnings[2].contains("'B' excluded"));
        assert_eq!(value["result"]["valid_contracts"], 1);
    }
}
