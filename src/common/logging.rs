//! Logging and tracing configuration
//!
//! Logs are controlled by the `RUST_LOG` environment variable.
//! Default level is INFO for this crate, WARN for dependencies.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing for the CLI (stderr logging)
///
/// Logs go to stderr so that `run --json` keeps stdout machine-readable.
pub fn init_cli(verbose: bool) {
    let default = if verbose {
        "fixture_runner=debug,warn"
    } else {
        "fixture_runner=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
