//! Structured logging using **tracing**.
//!
//! Results go to stdout; every log event goes to stderr so the two never mix.
//! Filtering follows `RUST_LOG` (e.g. `RUST_LOG=citygraph_core=debug`).

use tracing_subscriber::EnvFilter;

/// Initializes the global subscriber with JSON output on stderr.
///
/// Call once at startup. Later calls are ignored.
pub fn init_structured_logging() {
    let _ = tracing_subscriber::fmt()
        .json() // Output logs in JSON format
        .with_ansi(false)
        .with_level(true)
        .with_target(true)
        .with_current_span(true)
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

/// Initializes a human-readable subscriber on stderr at `debug` unless
/// `RUST_LOG` says otherwise. Backs the CLI `--verbose` flag.
pub fn init_verbose_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("citygraph_core=debug"));
    let _ = tracing_subscriber::fmt()
        .compact()
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
