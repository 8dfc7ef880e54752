// ============================================================================
// moviedim-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: env_logger Initialisation
//
// Library code logs through the `log` facade (the detector through its
// FacadeSink). This module installs env_logger as the backend, writing to
// stderr so `detect --json` output on stdout stays machine-readable.
//
// USAGE:
// - default: info
// - --verbose: debug
// - RUST_LOG, when set, overrides both (e.g. RUST_LOG=moviedim::detector=trace)

use std::io::Write;

use log::LevelFilter;

/// Level used when RUST_LOG is not set.
pub fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Installs the global logger. Safe to call more than once; later calls are
/// ignored.
pub fn init(verbose: bool) {
    let result = env_logger::Builder::new()
        .filter_level(default_level(verbose))
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            writeln!(
                buf,
                "{} {style}{:<5}{style:#} [{}] {}",
                buf.timestamp(),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init();

    match result {
        Ok(()) => log::debug!("Logger initialized with level: {}", default_level(verbose)),
        Err(e) => log::debug!("Logger already initialized: {}", e),
    }
}
