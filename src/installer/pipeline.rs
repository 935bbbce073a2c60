//! End-to-end setup run
//!
//! Fetch dojoup, install the toolchain, resolve the version. Each stage runs
//! inside a log group on the host, and the first fatal error ends the run.

use super::fetcher::ManagerFetcher;
use super::toolchain::{manager_program, ToolchainInstaller};
use super::version::{VersionCheck, VersionResolver};
use super::{DojoLayout, InstallRequest, InstallResult, SetupError};
use crate::config::SetupConfig;
use crate::fs::FileSystem;
use crate::host::{ActionHost, PathRegistrar};
use crate::process::CommandRunner;
use std::path::PathBuf;
use tracing::{error, info};

/// Name of the output carrying the resolved version
pub const VERSION_OUTPUT: &str = "version";

/// Capabilities and settings for one setup run
pub struct DojoSetup<'a> {
    runner: &'a dyn CommandRunner,
    fs: &'a dyn FileSystem,
    host: &'a dyn ActionHost,
    paths: &'a dyn PathRegistrar,
    config: &'a SetupConfig,
    layout: DojoLayout,
}

impl<'a> DojoSetup<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        fs: &'a dyn FileSystem,
        host: &'a dyn ActionHost,
        paths: &'a dyn PathRegistrar,
        config: &'a SetupConfig,
        layout: DojoLayout,
    ) -> Self {
        Self {
            runner,
            fs,
            host,
            paths,
            config,
            layout,
        }
    }

    pub fn layout(&self) -> &DojoLayout {
        &self.layout
    }

    /// Install dojoup and the requested toolchain
    pub fn run(&self, request: &InstallRequest) -> Result<InstallResult, SetupError> {
        let manager = self.grouped("Installing dojoup", || {
            ManagerFetcher::new(
                self.runner,
                self.fs,
                self.host,
                self.paths,
                self.config,
                &self.layout,
            )
            .install_manager()
        })?;

        let version = self.grouped("Installing Dojo toolchain", || {
            ToolchainInstaller::new(
                self.runner,
                self.fs,
                self.host,
                self.paths,
                &self.layout,
                self.config.missing_binary,
            )
            .install_toolchain(&manager, &request.version)
        })?;

        info!("Dojo toolchain set up successfully");
        Ok(InstallResult { version })
    }

    /// [`run`](Self::run), then publish the version output or report failure
    /// to the host
    pub fn run_and_report(&self, request: &InstallRequest) -> Result<InstallResult, SetupError> {
        let outcome = self.run(request).and_then(|result| {
            self.host
                .set_output(VERSION_OUTPUT, &result.version)
                .map_err(|e| SetupError::Output {
                    name: VERSION_OUTPUT.to_string(),
                    reason: format!("{:#}", e),
                })?;
            Ok(result)
        });

        if let Err(e) = &outcome {
            error!(error = %e, "Dojo setup failed");
            self.host.set_failed(&e.to_string());
        }
        outcome
    }

    /// Version of the currently installed toolchain, or a sentinel
    pub fn installed_version(&self) -> String {
        self.resolver().resolve(&self.program())
    }

    /// Compare the installed version with `expected`
    pub fn verify(&self, expected: &str) -> VersionCheck {
        self.resolver().verify(&self.program(), expected)
    }

    fn program(&self) -> PathBuf {
        manager_program(
            self.fs,
            self.host,
            self.config.missing_binary,
            &self.layout.manager_location(),
        )
    }

    fn resolver(&self) -> VersionResolver<'a> {
        VersionResolver::new(self.runner).with_host(self.host)
    }

    fn grouped<T>(&self, name: &str, stage: impl FnOnce() -> T) -> T {
        self.host.start_group(name);
        let out = stage();
        self.host.end_group();
        out
    }
}
