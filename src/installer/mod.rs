//! dojoup and Dojo toolchain installation
//!
//! The run is a straight line: [`ManagerFetcher`] downloads and executes the
//! installer, [`ToolchainInstaller`] runs `dojoup install`, and
//! [`VersionResolver`] reads the installed version back from `dojoup show`.
//! [`DojoSetup`] ties the stages together and reports to the CI host.
//!
//! ```no_run
//! use setup_dojo::fs::RealFileSystem;
//! use setup_dojo::host::GithubActionsHost;
//! use setup_dojo::installer::{DojoLayout, DojoSetup, InstallRequest};
//! use setup_dojo::process::SystemCommandRunner;
//! use setup_dojo::SetupConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let runner = SystemCommandRunner::new();
//! let fs = RealFileSystem::new();
//! let host = GithubActionsHost::from_env();
//! let config = SetupConfig::default();
//!
//! let setup = DojoSetup::new(&runner, &fs, &host, &host, &config, DojoLayout::from_home_dir()?);
//! let result = setup.run_and_report(&InstallRequest::resolve(None, &host))?;
//! println!("Installed Dojo {}", result.version);
//! # Ok(())
//! # }
//! ```

mod error;
pub mod fetcher;
mod layout;
pub mod pipeline;
mod request;
pub mod toolchain;
pub mod version;

pub use error::SetupError;
pub use fetcher::ManagerFetcher;
pub use layout::{DojoLayout, ManagerLocation};
pub use pipeline::{DojoSetup, VERSION_OUTPUT};
pub use request::{InstallRequest, InstallResult, ToolchainVersion, VERSION_INPUT};
pub use toolchain::{ToolchainInstaller, FALLBACK_COMMAND};
pub use version::{
    extract_version, VersionCheck, VersionResolver, ERROR_VERSION, UNKNOWN_VERSION,
};
