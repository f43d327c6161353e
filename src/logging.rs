//! Logging infrastructure for PixelDupe.
//!
//! Uses the `log` facade with an `env_logger` backend. The level is chosen by
//! (in priority order):
//!
//! 1. `RUST_LOG` environment variable (if set)
//! 2. CLI flags: `--quiet` (errors only) or `-v`/`-vv` (debug/trace)
//! 3. Default: info
//!
//! CLI-derived levels apply to this crate only; dependencies (decoders,
//! thread pools) are capped at `warn` so `-vv` stays readable.
//!
//! Skipped files are logged at `warn`, or `error` when the failure is
//! unexpected, so they remain visible at the default level. The text report
//! only lists them itself when those lines are filtered out, see
//! [`skips_are_logged`].
//!
//! # Example
//!
//! ```rust,no_run
//! use pixeldupe::logging::init_logging;
//!
//! init_logging(1, false);
//! log::debug!("Debug info here");
//! ```

use env_logger::Builder;
use log::LevelFilter;
use std::env;
use std::io::Write;

/// Initialize the logging subsystem based on CLI verbosity flags.
///
/// Calling this more than once is harmless; later calls are ignored.
///
/// # Arguments
///
/// * `verbose` - Verbosity count from CLI (0=info, 1=debug, 2+=trace)
/// * `quiet` - If true, only show errors (overridden by RUST_LOG)
pub fn init_logging(verbose: u8, quiet: bool) {
    let mut builder = Builder::new();

    let from_env = env::var("RUST_LOG").is_ok();
    if from_env {
        builder.parse_default_env();
    } else {
        builder
            .filter_level(LevelFilter::Warn.min(determine_level(verbose, quiet)))
            .filter_module(env!("CARGO_CRATE_NAME"), determine_level(verbose, quiet));
    }

    builder.format(move |buf, record| {
        let level = record.level();
        let style = buf.default_level_style(level);
        if verbose > 0 {
            writeln!(
                buf,
                "{} {style}{:<5}{style:#} [{}] {}",
                buf.timestamp_millis(),
                level,
                record.module_path().unwrap_or("unknown"),
                record.args()
            )
        } else {
            writeln!(buf, "{style}{:<5}{style:#} {}", level, record.args())
        }
    });

    if builder.try_init().is_ok() {
        log::debug!(
            "Logging initialized at level {} ({})",
            current_level_name(),
            if from_env { "RUST_LOG" } else { "CLI flags" }
        );
    }
}

/// Whether the scanner's per-file `warn` lines are being emitted.
///
/// When they are, skipped files are already on stderr and need not be
/// listed a second time.
pub fn skips_are_logged() -> bool {
    log::log_enabled!(target: SKIP_LOG_TARGET, log::Level::Warn)
}

/// Module that logs skipped files.
const SKIP_LOG_TARGET: &str = concat!(env!("CARGO_CRATE_NAME"), "::duplicates::finder");

/// Determine the log level from CLI flags.
fn determine_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Get the current maximum log level as a string.
pub fn current_level_name() -> &'static str {
    match log::max_level() {
        LevelFilter::Off => "off",
        LevelFilter::Error => "error",
        LevelFilter::Warn => "warn",
        LevelFilter::Info => "info",
        LevelFilter::Debug => "debug",
        LevelFilter::Trace => "trace",
    }
}
