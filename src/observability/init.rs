//! Tracing initialization and subscriber setup.
//!
//! Configures the tracing subscriber once at startup. Output goes to stderr
//! so log lines never interleave with rendered search results on stdout.

use crate::Config;
use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber.
///
/// The filter directive comes from, in order of precedence:
/// 1. The `RUST_LOG` environment variable, if set
/// 2. `config.trace_level`
/// 3. The default `"warn"`
///
/// Idempotent: safe to call more than once, only the first call takes effect
/// (later calls fail to install a global subscriber and are ignored;
/// observability is optional).
pub fn init_tracing(config: &Config) {
    let default_level = config.trace_level.as_deref().unwrap_or("warn");
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("specscout={default_level}")));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    tracing::debug!("tracing initialized");
}
