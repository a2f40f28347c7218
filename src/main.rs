//! char-ring - Letter Frequencies from a Ring of Processes
//!
//! Entry point for the CLI application. Every process in the ring returns
//! from `RingBuilder::build` into this same `run` and finishes its own step.

use anyhow::{Context, Result};
use char_ring::config::{CliArgs, RingConfig};
use char_ring::content::FileSet;
use char_ring::error::LinkError;
use char_ring::report::{print_header, print_results};
use char_ring::ring::{RingBuilder, RingWorker};
use clap::Parser;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Exit status when the origin printed a histogram from an incomplete round
const EXIT_INCOMPLETE_ROUND: u8 = 2;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            let step = e
                .chain()
                .find_map(|cause| cause.downcast_ref::<LinkError>())
                .map(LinkError::step);
            match step {
                Some(step) => {
                    error!(step, "{:#}", e);
                    eprintln!("Error: could not {}: {:#}", step, e);
                }
                None => {
                    error!("{:#}", e);
                    eprintln!("Error: {:#}", e);
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    // Parse CLI arguments
    let args = CliArgs::parse();

    // Setup logging
    setup_logging(args.verbose)?;

    // Validate and create config
    let config = RingConfig::from_args(args).context("Invalid configuration")?;

    // The file list is built once here and inherited by every rank
    let files = FileSet::scan(&config.dir).context("Failed to list directory")?;

    if config.show_header {
        print_header(files.dir(), config.ring_size, files.len());
    }

    let position = RingBuilder::new(config.ring_size)
        .build()
        .context("Could not build ring")?;

    let worker = RingWorker::new(position, &config);
    let outcome = worker
        .run(&files)
        .with_context(|| format!("Rank {} failed", position.rank))?;

    let incomplete = outcome.is_partial();
    if let Some(global) = outcome.into_global() {
        print_results(&global, position, config.bar_length)
            .context("Failed to print results")?;
    }

    if incomplete {
        eprintln!("Error: aggregation round did not complete, counts above are partial");
        return Ok(ExitCode::from(EXIT_INCOMPLETE_ROUND));
    }
    Ok(ExitCode::SUCCESS)
}

fn setup_logging(verbose: bool) -> Result<()> {
    let default = if verbose {
        "char_ring=debug,warn"
    } else {
        "char_ring=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // Standard output carries ring traffic, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    Ok(())
}
