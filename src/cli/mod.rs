use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use pfile_classifier::acquisition::Acquisition;

mod classify;
mod config;
mod parse;
mod scan;

pub use config::Config;

/// pfile-classify - Scanner E-file parser and P-file classifier
#[derive(Parser)]
#[command(name = "pfile-classify")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an E-file and print its typed record as JSON
    Parse {
        /// Input E-file path
        #[arg(value_name = "EFILE")]
        file: PathBuf,

        /// Print compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,

        /// Load parser settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// List acquisitions holding an unclassified E-file/P-file pair
    Scan {
        /// Acquisition manifest (JSON array of acquisitions)
        #[arg(value_name = "MANIFEST")]
        manifest: PathBuf,

        /// Load pairing settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Classify every unclassified pair and emit the assignments as JSON
    Classify {
        /// Acquisition manifest (JSON array of acquisitions)
        #[arg(value_name = "MANIFEST")]
        manifest: PathBuf,

        /// Directory holding downloaded E-files
        #[arg(short = 'd', long, value_name = "DIR")]
        efile_dir: PathBuf,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Write assignments JSON to this file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Parse {
            file,
            compact,
            config,
        } => parse::run(file, compact, Config::load(config.as_deref())?),
        Commands::Scan { manifest, config } => {
            scan::run(manifest, Config::load(config.as_deref())?)
        }
        Commands::Classify {
            manifest,
            efile_dir,
            config,
            output,
        } => classify::run(manifest, efile_dir, Config::load(config.as_deref())?, output),
    }
}

/// Read an acquisition manifest: a JSON array of acquisitions with their files
pub(crate) fn load_manifest(path: &Path) -> Result<Vec<Acquisition>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse manifest: {}", path.display()))
}
