//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};

/// Pick the filter: `RUST_LOG` wins, then `--verbose`, then the config level.
fn filter(config: &LoggingConfig, verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { config.level.as_str() };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    })
}

/// Install the global subscriber. Logs go to stderr so `--json` output on
/// stdout stays parseable.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(config: &LoggingConfig, verbose: bool) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter(config, verbose))
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Human => builder.compact().try_init(),
    };
}
