//! CLI commands using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Argos Shield - Upload Gatekeeper
///
/// Checks files against the magic-number signature of their declared type
/// and scans them for embedded scripts, PDF actions and active SVG content.
#[derive(Parser)]
#[command(name = "argos-shield")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Vet untrusted files before accepting them as uploads", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate one or more files
    Check {
        /// Files to validate
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Declared type for every file (jpeg, png, gif, pdf, svg, zip);
        /// defaults to the file extension, then to content detection
        #[arg(short = 't', long = "type")]
        file_type: Option<String>,

        /// Size limit in bytes (default 5 MiB)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        max_size: Option<u64>,

        /// Skip the suspicious-content scan
        #[arg(long)]
        no_content: bool,

        /// PDF rule identifiers to exempt (e.g. Metadata,Annots)
        #[arg(short, long, value_delimiter = ',')]
        whitelist: Vec<String>,

        /// JSON options file; flags given here override it
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print one JSON object per file
        #[arg(long)]
        json: bool,
    },

    /// List supported file types and their signatures
    ListTypes,
}
