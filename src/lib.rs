//! PixelDupe - Perceptual Duplicate Image Finder
//!
//! Groups the images in one or two directories by a combined fingerprint: a
//! structural hash (pHash) plus a color distribution hash. Images are
//! duplicates when both halves match exactly. Large directories are
//! fingerprinted on a rayon worker pool.

pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Result};

use cli::{Cli, Commands, HashArgs, OutputFormat, ScanArgs};
use config::Config;
use duplicates::DuplicateFinder;
use error::ExitCode;
use output::{CsvOutput, JsonOutput, TextOutput};
use progress::Progress;
use scanner::Fingerprinter;

/// Run the application for already-parsed arguments.
///
/// # Errors
///
/// Returns an error when the configuration is invalid, a directory cannot
/// be enumerated, or output cannot be written. Skipped files are not errors;
/// they are reported and reflected in the exit code.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    if cli.no_color {
        yansi::disable();
    }

    match cli.command {
        Commands::Scan(ref args) => run_scan(&cli, args),
        Commands::Hash(ref args) => run_hash(args),
    }
}

fn run_scan(cli: &Cli, args: &ScanArgs) -> Result<ExitCode> {
    let config = Config::load(args.config.as_deref())?.with_scan_args(args);
    log::debug!("Effective configuration: {:?}", config);

    let mut finder_config = config.finder_config();
    if config.progress && !cli.quiet && config.output == OutputFormat::Text {
        finder_config = finder_config.with_progress_callback(Arc::new(Progress::new(false)));
    }

    let directories = args.directories();
    let outcome = DuplicateFinder::new(finder_config)
        .find_duplicates(&directories)
        .context("Scan failed")?;

    let exit_code = ExitCode::for_scan(outcome.report.len(), outcome.failures.len());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match config.output {
        OutputFormat::Text => {
            let text = TextOutput::new(&outcome);
            if !logging::skips_are_logged() {
                text.write_skipped(&mut io::stderr().lock())?;
            }
            text.write_to(&mut out)?;
        }
        OutputFormat::Json => {
            JsonOutput::new(&outcome, exit_code).write_to(&mut out, true)?;
        }
        OutputFormat::Csv => {
            CsvOutput::new(&outcome.report, &outcome.failures).write_to(&mut out)?;
        }
    }
    out.flush()?;

    Ok(exit_code)
}

fn run_hash(args: &HashArgs) -> Result<ExitCode> {
    let fingerprinter = Fingerprinter::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut stderr = io::stderr().lock();
    let mut failed = 0usize;

    for path in &args.files {
        match fingerprinter.fingerprint_file(path) {
            Ok(fingerprint) => writeln!(out, "{}  {}", fingerprint, path.display())?,
            Err(failure) => {
                failed += 1;
                output::text::write_failure(&mut stderr, &failure)?;
            }
        }
    }
    out.flush()?;

    Ok(if failed == 0 {
        ExitCode::Success
    } else if failed == args.files.len() {
        ExitCode::GeneralError
    } else {
        ExitCode::PartialSuccess
    })
}
