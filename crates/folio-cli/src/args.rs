//! Command-line argument definitions for the Folio CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the tag files to import, the output
//! path, the configuration file and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Folio documentation tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Tag files to import, in addition to those in the configuration
    #[arg(help = "Paths to tag files")]
    pub tagfiles: Vec<String>,

    /// Path to the output HTML file
    #[arg(short, long, default_value = "index.html")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
