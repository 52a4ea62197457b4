//! Tracing subscriber setup for the binary

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber, writing to stderr
///
/// `RUST_LOG` takes precedence; otherwise `debug` selects the debug level
/// and the default is warnings only. Calling this twice is harmless.
pub fn init(debug: bool) {
    let default_level = if debug { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
