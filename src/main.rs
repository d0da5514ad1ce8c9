//! # pfile-classify
//!
//! Command-line front end for the `pfile_classifier` library.
//!
//! ## Usage
//!
//! ```bash
//! # Print the typed record of one E-file
//! pfile-classify parse E05120.7
//!
//! # List acquisitions with an unclassified E-file/P-file pair
//! pfile-classify scan acquisitions.json
//!
//! # Classify them, reading E-files from ./efiles/<acquisition id>/
//! pfile-classify classify acquisitions.json --efile-dir efiles --output assignments.json
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity
    cli::init_logging(cli.verbosity());

    cli::dispatch(cli)
}
