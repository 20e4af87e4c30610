//! Winerank - rank wine records by normalized rating
//!
//! Reads a wine CSV, converts every rating to the Parker scale, stamps each
//! record with today's date and prints the records best first.

mod cli;

use std::env;
use std::io;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use cli::Cli;
use winerank_core::clock::SystemClock;
use winerank_core::config::PipelineConfig;
use winerank_core::error::{ExitCode as RankExitCode, RankError};
use winerank_core::{logging, pipeline};

fn main() -> ExitCode {
    let start = Instant::now();

    let argv_log_json = argv_requests_json();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // With --log-json every failure, usage errors included, is reported
            // as a JSON envelope on stderr
            if argv_log_json {
                let rank_error = match err.kind() {
                    clap::error::ErrorKind::DisplayHelp
                    | clap::error::ErrorKind::DisplayVersion => err.exit(),
                    _ => RankError::Usage(err.to_string()),
                };

                eprintln!("{}", rank_error.to_json());
                return ExitCode::from(rank_error.exit_code() as u8);
            }

            // Clap prints its own usage message and exits with code 2
            err.exit();
        }
    };

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::debug!(elapsed = ?start.elapsed(), "parse_args");

    let config = PipelineConfig::default();
    let mut stdout = io::stdout().lock();

    match pipeline::run(&cli.input, &config, &SystemClock, &mut stdout) {
        Ok(summary) => {
            tracing::debug!(
                records_read = summary.records_read,
                records_written = summary.records_written,
                duplicates_collapsed = summary.duplicates_collapsed,
                elapsed = ?start.elapsed(),
                "done"
            );
            ExitCode::from(RankExitCode::Success as u8)
        }
        Err(e) => {
            if cli.log_json {
                eprintln!("{}", e.to_json());
            } else {
                eprintln!("error: {}", e);
            }
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn argv_requests_json() -> bool {
    env::args().skip(1).any(|arg| arg == "--log-json")
}
