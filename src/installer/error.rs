use crate::config::ConfigError;
use crate::process::ProcessError;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal setup failures. Process failures display the underlying process
/// error text unchanged.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    DownloadFailed(ProcessError),

    #[error("Failed to download installer from {url}: {reason}")]
    NativeDownloadFailed { url: String, reason: String },

    #[error(transparent)]
    InstallerFailed(ProcessError),

    #[error("dojoup binary not found at {}", .0.display())]
    BinaryNotFound(PathBuf),

    #[error(transparent)]
    ToolchainInstallFailed(ProcessError),

    #[error("Could not determine the home directory")]
    HomeDirNotFound,

    #[error("Failed to set output '{name}': {reason}")]
    Output { name: String, reason: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
