//! Logging setup for hosts embedding the bridge.

use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::EnvFilter;

use crate::schema::{LogLevel, LoggingConfig};

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

/// Build the `EnvFilter` for a logging config.
///
/// `RUST_LOG` is read first; the configured level and directives are added
/// on top. Directives that fail to parse are skipped.
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    let mut filter =
        EnvFilter::from_default_env().add_directive(LevelFilter::from(config.level).into());
    for raw in &config.directives {
        match raw.parse::<Directive>() {
            Ok(directive) => filter = filter.add_directive(directive),
            Err(e) => eprintln!("ignoring invalid log directive {raw:?}: {e}"),
        }
    }
    filter
}

/// Install the global fmt subscriber.
///
/// Returns `false` if a global subscriber was already installed, which
/// makes repeated calls harmless.
pub fn init(config: &LoggingConfig) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_ansi(config.ansi)
        .try_init()
        .is_ok()
}
