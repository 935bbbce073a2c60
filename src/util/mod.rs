//! Utility modules for setup-dojo

pub mod logging;

pub use logging::{init_from_env, init_logging, LoggingConfig};
