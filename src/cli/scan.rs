use anyhow::Result;
use std::path::PathBuf;

use pfile_classifier::acquisition::PairMatcher;

use super::{load_manifest, Config};

/// List acquisitions with an unclassified E-file/P-file pair
pub fn run(manifest: PathBuf, config: Config) -> Result<()> {
    let acquisitions = load_manifest(&manifest)?;
    let summary = PairMatcher::new(config.pairing.policy).scan(&acquisitions);

    println!("Unclassified E-file/P-file Pairs");
    println!("================================");
    println!("Manifest: {}", manifest.display());
    println!();

    for pair in &summary.pairs {
        println!(
            "  {}: {} + {}",
            pair.acquisition_id, pair.pfile_name, pair.efile_name
        );
    }
    for err in &summary.errors {
        eprintln!("  {}", err);
    }

    println!();
    println!(
        "Summary: {} paired, {} without a pair, {} ambiguous",
        summary.pairs.len(),
        summary.unpaired,
        summary.errors.len()
    );

    if !summary.errors.is_empty() {
        std::process::exit(1);
    }

    Ok(())
}
