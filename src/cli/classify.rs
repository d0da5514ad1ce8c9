use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use pfile_classifier::pipeline::{Classifier, DirectorySource};

use super::{load_manifest, Config};

/// Classify every unclassified pair listed in the manifest
pub fn run(
    manifest: PathBuf,
    efile_dir: PathBuf,
    config: Config,
    output: Option<PathBuf>,
) -> Result<()> {
    if !efile_dir.is_dir() {
        anyhow::bail!("E-file directory does not exist: {}", efile_dir.display());
    }

    let acquisitions = load_manifest(&manifest)?;
    info!(
        "Loaded {} acquisitions from {}",
        acquisitions.len(),
        manifest.display()
    );

    let options = config.classifier_options();
    let classifier = Classifier::new(options, config.measurement);
    let source = DirectorySource::new(&efile_dir);
    let report = classifier.run(&acquisitions, &source);

    // Report goes to stderr so stdout stays valid JSON
    #[cfg(feature = "colorized_output")]
    {
        eprintln!("{}", report.format_colored());
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        eprintln!("{}", report);
    }

    let json = serde_json::to_string_pretty(&report)?;
    match output {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write output: {}", path.display()))?;
            info!("Wrote assignments to {}", path.display());
        }
        None => println!("{}", json),
    }

    if report.has_failures() {
        std::process::exit(1);
    }

    Ok(())
}
