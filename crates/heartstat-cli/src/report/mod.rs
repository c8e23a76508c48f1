pub mod input;

use anyhow::Result;

use heartstat_analysis::config::ReportConfig;
use heartstat_analysis::io::preview_csv;
use heartstat_analysis::pipeline::generate_report;

/// Generate the report and echo it to stdout unless `quiet`.
pub fn run_report(config: &ReportConfig, quiet: bool) -> Result<()> {
    let text = generate_report(config)?;
    if !quiet {
        println!("\n{}", text);
    }
    Ok(())
}

/// Print the leading rows, shape and column names of a CSV file.
pub fn run_inspect(path: &str, rows: usize) -> Result<()> {
    let preview = preview_csv(path, rows)?;
    let mut table = heartstat_analysis::report::TextTable::new(preview.columns.clone());
    for (idx, row) in preview.head.iter().enumerate() {
        table.add_row(idx.to_string(), row.clone());
    }
    println!("{}", table.render());
    println!("Shape: ({}, {})", preview.rows, preview.columns.len());
    println!("{:?}", preview.columns);
    Ok(())
}
