//! Logging configuration for the transport CLI.
//!
//! Log events go to stderr so they never interleave with the menu on
//! stdout. The filter comes from configuration only; `RUST_LOG` is not
//! consulted.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when the configured directive is invalid.
const FALLBACK_FILTER: &str = "warn";

/// Verbosity requested on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Use the configured log level.
    #[default]
    Normal,
    /// Force debug output.
    Verbose,
}

impl Verbosity {
    /// Resolve the filter directive, given the configured one.
    #[must_use]
    pub fn filter(&self, configured: &str) -> String {
        match self {
            Self::Normal => configured.to_string(),
            Self::Verbose => Level::DEBUG.to_string().to_lowercase(),
        }
    }
}

/// Initialize the logging system.
///
/// Called once at startup. An invalid directive falls back to `warn`.
/// Repeated calls are ignored.
pub fn init_logging(directive: &str) {
    let env_filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(FALLBACK_FILTER));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false),
    );

    let _ = subscriber.try_init();
}
