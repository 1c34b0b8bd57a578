//! `tracing` subscriber setup for the command-line tool.
//!
//! Log lines go to stderr, or to a trace file when one is given, so stdout only ever
//! carries the summary, the usage string or a preview.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use clap_verbosity_flag::{LogLevel, Verbosity};
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::Subscriber as FmtSubscriber;

/// Install the global subscriber.
///
/// # Errors
///
/// Returns an error if the trace file cannot be created or a subscriber is already set.
pub fn configure_tracing<L: LogLevel>(path: Option<PathBuf>, verbosity: &Verbosity<L>) -> anyhow::Result<()> {
    let level = max_level(verbosity);

    match path {
        Some(path) => {
            let trace_file = File::create(&path)?;
            let file_subscriber = FmtSubscriber::builder()
                .with_writer(Mutex::new(trace_file))
                .with_ansi(false)
                .with_max_level(level)
                .finish();
            tracing::subscriber::set_global_default(file_subscriber)?;
        }
        None => {
            let stderr_subscriber = FmtSubscriber::builder()
                .with_writer(std::io::stderr)
                .with_line_number(false)
                .with_span_events(FmtSpan::NONE)
                .without_time()
                .with_max_level(level)
                .finish();
            tracing::subscriber::set_global_default(stderr_subscriber)?;
        }
    }

    Ok(())
}

/// Most verbose level `verbosity` lets through.
pub fn max_level<L: LogLevel>(verbosity: &Verbosity<L>) -> LevelFilter {
    verbosity.log_level_filter().as_trace()
}
