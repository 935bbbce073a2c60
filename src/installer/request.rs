use crate::host::ActionHost;
use serde::Serialize;
use std::fmt;

/// Name of the CI input carrying the requested version
pub const VERSION_INPUT: &str = "version";

/// Toolchain version to install
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolchainVersion {
    /// Let dojoup pick its default (latest) release
    Latest,
    Specific(String),
}

impl ToolchainVersion {
    /// Blank or missing input means latest. Surrounding whitespace is
    /// trimmed, as the runner does for `INPUT_*` values.
    pub fn from_input(input: Option<&str>) -> Self {
        match input.map(str::trim) {
            Some(v) if !v.is_empty() => ToolchainVersion::Specific(v.to_string()),
            _ => ToolchainVersion::Latest,
        }
    }

    /// Arguments for `dojoup install`
    pub fn install_args(&self) -> Vec<String> {
        match self {
            ToolchainVersion::Latest => vec!["install".to_string()],
            ToolchainVersion::Specific(v) => vec!["install".to_string(), v.clone()],
        }
    }
}

impl fmt::Display for ToolchainVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolchainVersion::Latest => write!(f, "latest"),
            ToolchainVersion::Specific(v) => write!(f, "{}", v),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRequest {
    pub version: ToolchainVersion,
}

impl InstallRequest {
    pub fn new(version: ToolchainVersion) -> Self {
        Self { version }
    }

    pub fn latest() -> Self {
        Self::new(ToolchainVersion::Latest)
    }

    /// An explicit override wins over the host's `version` input
    pub fn resolve(explicit: Option<&str>, host: &dyn ActionHost) -> Self {
        let input = match explicit.map(str::trim).filter(|v| !v.is_empty()) {
            Some(v) => Some(v.to_string()),
            None => host.input(VERSION_INPUT),
        };
        Self::new(ToolchainVersion::from_input(input.as_deref()))
    }
}

/// Outcome reported back to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallResult {
    /// Resolved version or one of the sentinels `unknown` / `error`
    pub version: String,
}
