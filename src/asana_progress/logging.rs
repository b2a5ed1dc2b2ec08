//! Diagnostic logging.
//!
//! User-facing output is rendered by the CLI; this subscriber only carries
//! diagnostics (requests, pages, recoverable failures) to stderr.

use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive, checked before `RUST_LOG`.
pub const LOG_ENV: &str = "ASANA_PROGRESS_LOG";

/// Initialize the global tracing subscriber with stderr output.
///
/// ANSI colors are only used when stderr is a terminal. Subsequent calls are no-ops. `level` applies when neither `ASANA_PROGRESS_LOG`
/// nor `RUST_LOG` is set.
pub fn init_subscriber(level: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .compact();

    let _ = subscriber.try_init();
}
