//! Conventional on-disk layout of a dojoup installation

use super::SetupError;
use std::fmt;
use std::path::{Path, PathBuf};

const DOJO_DIR: &str = ".dojo";
const MANAGER_DIR: &str = "dojoup";
const MANAGER_BINARY: &str = "dojoup";
const BIN_DIR: &str = "bin";

/// Paths under `<home>/.dojo`, all derived from a single home directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DojoLayout {
    home: PathBuf,
}

impl DojoLayout {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    pub fn from_home_dir() -> Result<Self, SetupError> {
        dirs::home_dir()
            .map(Self::new)
            .ok_or(SetupError::HomeDirNotFound)
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn root(&self) -> PathBuf {
        self.home.join(DOJO_DIR)
    }

    /// `<home>/.dojo/dojoup`
    pub fn manager_dir(&self) -> PathBuf {
        self.root().join(MANAGER_DIR)
    }

    /// `<home>/.dojo/dojoup/dojoup`
    pub fn manager_location(&self) -> ManagerLocation {
        ManagerLocation(self.manager_dir().join(MANAGER_BINARY))
    }

    /// `<home>/.dojo/bin`
    pub fn bin_dir(&self) -> PathBuf {
        self.root().join(BIN_DIR)
    }
}

/// Absolute path of the dojoup executable. Not checked for existence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerLocation(PathBuf);

impl ManagerLocation {
    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for ManagerLocation {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for ManagerLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}
