use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use pfile_classifier::efile::EFileParser;

use super::Config;

/// Parse one E-file and print `{ "scan_timestamp": ..., "record": {...} }`
pub fn run(file: PathBuf, compact: bool, config: Config) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let parser = EFileParser::new(config.parser);
    let parsed = parser
        .parse_file(&file)
        .with_context(|| format!("Failed to parse E-file: {}", file.display()))?;

    info!(
        "{}: {} fields, {} slices, scanned at {}",
        file.display(),
        parsed.record.len(),
        parsed.record.slices().count(),
        parsed.scan_timestamp
    );

    let json = if compact {
        serde_json::to_string(&parsed)?
    } else {
        serde_json::to_string_pretty(&parsed)?
    };
    println!("{}", json);

    Ok(())
}
