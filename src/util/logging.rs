//! Structured logging setup for setup-dojo
//!
//! Logs are written to stderr so stdout stays free for workflow commands and
//! the printed result.
//!
//! # Example
//!
//! ```no_run
//! use setup_dojo::util::logging;
//!
//! logging::init_from_env();
//!
//! tracing::info!(version = "1.4.0", "Toolchain ready");
//! ```

use crate::config::SetupConfig;
use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Ensures logging is only initialized once
static INIT: Once = Once::new();

/// Configuration for logging initialization
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum log level to display
    pub level: Level,

    /// Use JSON output format
    pub use_json: bool,

    /// Include the module target (e.g., setup_dojo::installer) in logs
    pub include_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: false,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }
}

/// Parses a log level from a string
///
/// Unknown values fall back to `Level::INFO` with a note on stderr.
///
/// ```
/// use setup_dojo::util::logging::parse_level;
/// use tracing::Level;
///
/// assert_eq!(parse_level("debug"), Level::DEBUG);
/// assert_eq!(parse_level("WARN"), Level::WARN);
/// ```
pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}

fn build_filter(level: Level) -> EnvFilter {
    let mut filter = EnvFilter::from_default_env();

    // RUST_LOG takes precedence over the configured level
    if env::var("RUST_LOG").is_err() {
        for directive in [
            format!("setup_dojo={}", level),
            "hyper=warn".to_string(),
            "reqwest=warn".to_string(),
        ] {
            if let Ok(d) = directive.parse() {
                filter = filter.add_directive(d);
            }
        }
    }

    filter
}

/// Initializes the logging system. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = build_filter(config.level);

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_target(config.include_target)
                        .with_writer(std::io::stderr),
                )
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(config.include_target)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    });
}

/// Initializes logging from `SETUP_DOJO_LOG_LEVEL` and `SETUP_DOJO_LOG_JSON`
pub fn init_from_env() {
    init_logging(config_from_env(None));
}

/// Logging configuration from the environment, with an optional level
/// override (e.g. from command line flags)
pub fn config_from_env(level_override: Option<Level>) -> LoggingConfig {
    let use_json = env::var("SETUP_DOJO_LOG_JSON")
        .ok()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or(false);

    LoggingConfig {
        use_json,
        ..config_for(&SetupConfig::default(), level_override)
    }
}

/// Logging configuration at the level of `setup`, unless overridden
pub fn config_for(setup: &SetupConfig, level_override: Option<Level>) -> LoggingConfig {
    LoggingConfig::with_level(level_override.unwrap_or_else(|| parse_level(&setup.log_level)))
}
