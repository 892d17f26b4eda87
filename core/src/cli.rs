//! Command-line interface for the llama-bridge diagnostic tool.

use clap::Parser;
use std::path::PathBuf;

/// Report on the compute backend and devices visible to the llama.cpp
/// runtime wrapped by this library.
#[derive(Parser, Debug)]
#[command(name = "llama-bridge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format (text, json, pretty).
    #[arg(short, long, default_value = "text")]
    pub format: String,

    /// Path to optional YAML config file; flags override config values.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Skip the per-device table and report backend identity only.
    #[arg(long)]
    pub no_devices: bool,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
