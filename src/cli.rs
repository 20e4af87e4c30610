//! CLI argument parsing for winerank
//!
//! One positional input path. The remaining flags only affect diagnostics on
//! stderr; the report on stdout is always the same.

use clap::Parser;
use std::path::PathBuf;

/// Winerank - rank wine records by rating on the Parker scale
#[derive(Parser, Debug)]
#[command(name = "winerank")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// CSV file of wine records (7 columns, one `Scale: value` rating field)
    pub input: PathBuf,

    /// Log pipeline stages at debug level
    #[arg(long, short)]
    pub verbose: bool,

    /// Log level or filter directives (overrides --verbose)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Emit logs and errors as JSON
    #[arg(long)]
    pub log_json: bool,
}
