//! Command-line argument definitions for the relgraph CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, per-run layout overrides and logging verbosity.

use clap::Parser;

/// Command-line arguments for the relgraph layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input forest document (TOML)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Seed for the initial placement, overriding the configuration
    #[arg(long)]
    pub seed: Option<u64>,

    /// Relaxation iteration budget, overriding the configuration
    #[arg(long)]
    pub iterations: Option<usize>,

    /// Draw the residual force on every node
    #[arg(long)]
    pub show_forces: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
