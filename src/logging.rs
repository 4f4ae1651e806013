//! Tracing subscriber setup for the CLI and server.
//!
//! Events go to stderr so `summary` and `show` output on stdout stays
//! clean. `RUST_LOG` wins over the `--verbose` default when set.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn default_filter(verbose: bool) -> &'static str {
    if verbose { "featureboard=debug,info" } else { "info" }
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init_tracing(verbose: bool, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let registry = tracing_subscriber::registry().with(filter);
    let result = if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .compact(),
            )
            .try_init()
    };
    // Already installed (tests, repeated calls): keep the first one.
    let _ = result;
}
