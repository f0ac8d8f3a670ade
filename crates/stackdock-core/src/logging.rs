//! Logging setup built on `tracing-subscriber`.

use tracing_subscriber::EnvFilter;

/// Default filter used by [`init`] when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "stackdock=debug,stackdock_core=info";

/// Install a formatting subscriber.
///
/// Honors `RUST_LOG` and falls back to [`DEFAULT_FILTER`].
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Install a formatting subscriber with an explicit filter directive.
///
/// Calling this more than once is harmless; only the first subscriber wins.
pub fn init_with_filter(directives: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directives))
        .try_init();
}
