//! Configuration management for setup-dojo
//!
//! Settings are loaded from environment variables with sensible defaults and
//! can be overridden by command line flags.
//!
//! # Environment Variables
//!
//! - `SETUP_DOJO_INSTALLER_URL`: dojoup installer location - default: "https://install.dojoengine.org"
//! - `SETUP_DOJO_INSTALLER_FILE`: Where the installer script is saved - default: "dojoup-installer.sh"
//! - `SETUP_DOJO_MISSING_BINARY`: Missing dojoup policy (strict|fallback) - default: "strict"
//! - `SETUP_DOJO_DOWNLOADER`: How the installer is fetched (curl|native) - default: "curl"
//! - `SETUP_DOJO_LOG_LEVEL`: Logging level - default: "info"
//!
//! # Example
//!
//! ```no_run
//! use setup_dojo::SetupConfig;
//!
//! let config = SetupConfig::default();
//! config.validate().expect("Invalid configuration");
//! println!("{}", config);
//! ```

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_INSTALLER_URL: &str = "https://install.dojoengine.org";
pub const DEFAULT_INSTALLER_FILE: &str = "dojoup-installer.sh";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    /// Failed to parse configuration value
    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

/// What to do when the dojoup executable is missing after installation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingBinaryPolicy {
    /// Fail the run as soon as the installer leaves no executable behind
    #[default]
    Strict,
    /// Warn and invoke the bare `dojoup` command through the search path
    FallbackToPath,
}

impl FromStr for MissingBinaryPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(MissingBinaryPolicy::Strict),
            "fallback" | "fallback-to-path" => Ok(MissingBinaryPolicy::FallbackToPath),
            other => Err(ConfigError::ParseError {
                field: "SETUP_DOJO_MISSING_BINARY".to_string(),
                error: format!("unknown policy '{}', expected strict or fallback", other),
            }),
        }
    }
}

impl fmt::Display for MissingBinaryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingBinaryPolicy::Strict => write!(f, "strict"),
            MissingBinaryPolicy::FallbackToPath => write!(f, "fallback"),
        }
    }
}

/// How the installer script is fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InstallerSource {
    /// `curl -L <url> -o <file>`
    #[default]
    Curl,
    /// In-process HTTP download
    Native,
}

impl FromStr for InstallerSource {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "curl" => Ok(InstallerSource::Curl),
            "native" => Ok(InstallerSource::Native),
            other => Err(ConfigError::ParseError {
                field: "SETUP_DOJO_DOWNLOADER".to_string(),
                error: format!("unknown downloader '{}', expected curl or native", other),
            }),
        }
    }
}

impl fmt::Display for InstallerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallerSource::Curl => write!(f, "curl"),
            InstallerSource::Native => write!(f, "native"),
        }
    }
}

/// Main configuration structure for setup-dojo
#[derive(Debug, Clone)]
pub struct SetupConfig {
    /// URL of the dojoup installer script
    pub installer_url: String,

    /// Local file the installer is written to
    pub installer_file: PathBuf,

    pub missing_binary: MissingBinaryPolicy,

    pub downloader: InstallerSource,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for SetupConfig {
    /// Loads `SETUP_DOJO_*` environment variables, falling back to defaults.
    /// Unparseable policy or downloader values fall back to their defaults;
    /// use [`SetupConfig::from_env`] to surface them as errors instead.
    fn default() -> Self {
        Self {
            installer_url: env::var("SETUP_DOJO_INSTALLER_URL")
                .unwrap_or_else(|_| DEFAULT_INSTALLER_URL.to_string()),
            installer_file: env::var("SETUP_DOJO_INSTALLER_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_INSTALLER_FILE)),
            missing_binary: env::var("SETUP_DOJO_MISSING_BINARY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            downloader: env::var("SETUP_DOJO_DOWNLOADER")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            log_level: env::var("SETUP_DOJO_LOG_LEVEL")
                .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
                .to_lowercase(),
        }
    }
}

impl SetupConfig {
    /// Like `Default`, but rejects unparseable enum values
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(v) = env::var("SETUP_DOJO_MISSING_BINARY") {
            config.missing_binary = v.parse()?;
        }
        if let Ok(v) = env::var("SETUP_DOJO_DOWNLOADER") {
            config.downloader = v.parse()?;
        }

        Ok(config)
    }

    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the installer URL is not http(s), the
    /// installer file is empty, or the log level is unknown.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.installer_url.starts_with("https://") || self.installer_url.starts_with("http://"))
        {
            return Err(ConfigError::ValidationFailed(format!(
                "Installer URL must be http(s): {}",
                self.installer_url
            )));
        }

        if self.installer_file.as_os_str().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Installer file path cannot be empty".to_string(),
            ));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }
}

impl fmt::Display for SetupConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "setup-dojo Configuration:")?;
        writeln!(f, "  Installer URL: {}", self.installer_url)?;
        writeln!(f, "  Installer File: {}", self.installer_file.display())?;
        writeln!(f, "  Missing Binary: {}", self.missing_binary)?;
        writeln!(f, "  Downloader: {}", self.downloader)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}
