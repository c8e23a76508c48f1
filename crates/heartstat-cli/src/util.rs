use std::path::PathBuf;

use anyhow::Result;

pub fn validate_csv_file(path: &str) -> Result<()> {
    let pb = PathBuf::from(path);

    let ext = pb
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase());
    match ext.as_deref() {
        Some("csv") | Some("data") | Some("txt") => {}
        _ => anyhow::bail!("File must have a .csv, .data or .txt extension: {}", path),
    }

    if !pb.exists() {
        anyhow::bail!("File does not exist: {}", path);
    }

    Ok(())
}
