//! FileSystem trait definition

use anyhow::Result;
use std::path::Path;

/// Type of file system entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    File,
    Directory,
}

/// Abstraction over the handful of file system operations the installer needs
pub trait FileSystem: Send + Sync {
    /// Check if path is a regular file
    fn is_file(&self, path: &Path) -> bool;

    /// Add execute permission bits to a file
    fn set_executable(&self, path: &Path) -> Result<()>;

    /// Write bytes to a file, creating parent directories as needed
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;
}

