use super::version::VersionResolver;
use super::{DojoLayout, ManagerLocation, SetupError, ToolchainVersion};
use crate::config::MissingBinaryPolicy;
use crate::fs::FileSystem;
use crate::host::{ActionHost, PathRegistrar};
use crate::process::{CommandRunner, Invocation};
use std::path::PathBuf;
use tracing::{info, warn};

/// Bare command name used when the manager path does not exist
pub const FALLBACK_COMMAND: &str = "dojoup";

/// Program to run for dojoup under the given policy
///
/// With [`MissingBinaryPolicy::FallbackToPath`] a missing manager path is
/// replaced by the bare command name and resolved through the search path.
pub fn manager_program(
    fs: &dyn FileSystem,
    host: &dyn ActionHost,
    policy: MissingBinaryPolicy,
    manager: &ManagerLocation,
) -> PathBuf {
    if policy == MissingBinaryPolicy::FallbackToPath && !fs.is_file(manager.as_path()) {
        warn!(
            path = %manager,
            "dojoup not found at expected path, falling back to '{}' on PATH",
            FALLBACK_COMMAND
        );
        host.warning(&format!(
            "dojoup not found at {}, falling back to '{}' on PATH",
            manager, FALLBACK_COMMAND
        ));
        return PathBuf::from(FALLBACK_COMMAND);
    }
    manager.as_path().to_path_buf()
}

/// Runs `dojoup install` and reports the resulting version
pub struct ToolchainInstaller<'a> {
    runner: &'a dyn CommandRunner,
    fs: &'a dyn FileSystem,
    host: &'a dyn ActionHost,
    paths: &'a dyn PathRegistrar,
    layout: &'a DojoLayout,
    policy: MissingBinaryPolicy,
}

impl<'a> ToolchainInstaller<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        fs: &'a dyn FileSystem,
        host: &'a dyn ActionHost,
        paths: &'a dyn PathRegistrar,
        layout: &'a DojoLayout,
        policy: MissingBinaryPolicy,
    ) -> Self {
        Self {
            runner,
            fs,
            host,
            paths,
            layout,
            policy,
        }
    }

    /// Install the toolchain and return the detected version
    ///
    /// A failing `install` is returned unchanged and not retried. Version
    /// detection never fails; see [`VersionResolver::resolve`].
    pub fn install_toolchain(
        &self,
        manager: &ManagerLocation,
        version: &ToolchainVersion,
    ) -> Result<String, SetupError> {
        match version {
            ToolchainVersion::Latest => info!("Installing latest Dojo toolchain"),
            ToolchainVersion::Specific(v) => info!("Installing Dojo toolchain version: {}", v),
        }

        let program = manager_program(self.fs, self.host, self.policy, manager);
        self.runner
            .run(&Invocation::for_path(&program).args(version.install_args()))
            .map_err(SetupError::ToolchainInstallFailed)?;

        self.paths.register(&self.layout.bin_dir());

        Ok(VersionResolver::new(self.runner)
            .with_host(self.host)
            .resolve(&program))
    }
}
