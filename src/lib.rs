//! setup-dojo - installs the Dojo toolchain inside a CI job
//!
//! The crate downloads and runs the dojoup installer, asks dojoup to install
//! a toolchain release, puts both on the search path for later steps, and
//! reports the installed version back to the CI host.
//!
//! # Core Concepts
//!
//! - **dojoup**: the Dojo toolchain manager, installed under `~/.dojo/dojoup`
//! - **Toolchain**: the Dojo binaries dojoup installs into `~/.dojo/bin`
//! - **Host**: the CI runner; inputs, outputs, search path updates and
//!   failure reports go through [`host::ActionHost`]
//!
//! # Example Usage
//!
//! ```no_run
//! use setup_dojo::fs::RealFileSystem;
//! use setup_dojo::host::GithubActionsHost;
//! use setup_dojo::process::SystemCommandRunner;
//! use setup_dojo::{DojoLayout, DojoSetup, InstallRequest, SetupConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SetupConfig::from_env()?;
//! let host = GithubActionsHost::from_env();
//! let runner = SystemCommandRunner::new();
//! let fs = RealFileSystem::new();
//!
//! let setup = DojoSetup::new(&runner, &fs, &host, &host, &config, DojoLayout::from_home_dir()?);
//! let result = setup.run_and_report(&InstallRequest::resolve(None, &host))?;
//! println!("Installed Dojo {}", result.version);
//! # Ok(())
//! # }
//! ```
//!
//! # Project Structure
//!
//! - [`installer`]: the setup pipeline and version detection
//! - [`host`]: CI host integration (GitHub Actions workflow commands)
//! - [`process`]: external command execution
//! - [`fs`]: filesystem access

pub mod cli;
pub mod config;
pub mod fs;
pub mod host;
pub mod installer;
pub mod process;
pub mod util;

pub use config::{ConfigError, InstallerSource, MissingBinaryPolicy, SetupConfig};
pub use installer::{
    extract_version, DojoLayout, DojoSetup, InstallRequest, InstallResult, SetupError,
    ToolchainVersion, ERROR_VERSION, UNKNOWN_VERSION,
};
pub use util::{init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
