//! dojoup installation

use super::{DojoLayout, ManagerLocation, SetupError};
use crate::config::{InstallerSource, MissingBinaryPolicy, SetupConfig};
use crate::fs::FileSystem;
use crate::host::{ActionHost, PathRegistrar};
use crate::process::{CommandRunner, Invocation};
use reqwest::StatusCode;
use tracing::{debug, info, warn};

/// Downloads and runs the dojoup installer script
pub struct ManagerFetcher<'a> {
    runner: &'a dyn CommandRunner,
    fs: &'a dyn FileSystem,
    host: &'a dyn ActionHost,
    paths: &'a dyn PathRegistrar,
    config: &'a SetupConfig,
    layout: &'a DojoLayout,
}

impl<'a> ManagerFetcher<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        fs: &'a dyn FileSystem,
        host: &'a dyn ActionHost,
        paths: &'a dyn PathRegistrar,
        config: &'a SetupConfig,
        layout: &'a DojoLayout,
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

    /// Install dojoup and register its directory on the search path
    ///
    /// # Errors
    ///
    /// Fails when the download or the installer exits non-zero, and under the
    /// strict policy when no executable exists afterwards.
    pub fn install_manager(&self) -> Result<ManagerLocation, SetupError> {
        info!("Installing dojoup...");

        self.download()?;
        self.mark_executable();

        let script = self.config.installer_file.to_string_lossy();
        self.runner
            .run(&Invocation::new("bash").arg(script))
            .map_err(SetupError::InstallerFailed)?;

        self.paths.register(&self.layout.manager_dir());

        let location = self.layout.manager_location();
        if !self.fs.is_file(location.as_path()) {
            match self.config.missing_binary {
                MissingBinaryPolicy::Strict => {
                    return Err(SetupError::BinaryNotFound(location.as_path().to_path_buf()))
                }
                MissingBinaryPolicy::FallbackToPath => {
                    warn!(path = %location, "dojoup binary not found after installation");
                    self.host
                        .warning(&format!("dojoup binary not found at {}", location));
                }
            }
        }

        debug!(path = %location, "dojoup installed");
        Ok(location)
    }

    fn download(&self) -> Result<(), SetupError> {
        let url = &self.config.installer_url;
        let target = &self.config.installer_file;

        match self.config.downloader {
            InstallerSource::Curl => {
                let output_file = target.to_string_lossy();
                let invocation =
                    Invocation::new("curl").args(["-L", url.as_str(), "-o", &*output_file]);
                self.runner
                    .run(&invocation)
                    .map_err(SetupError::DownloadFailed)?;
            }
            InstallerSource::Native => {
                let bytes = fetch_installer(url)?;
                self.fs
                    .write(target, &bytes)
                    .map_err(|e| SetupError::NativeDownloadFailed {
                        url: url.clone(),
                        reason: format!("{:#}", e),
                    })?;
            }
        }

        debug!(url = %url, file = %target.display(), "Installer downloaded");
        Ok(())
    }

    /// `bash <file>` does not need the bit, so failures are only logged
    fn mark_executable(&self) {
        if let Err(e) = self.fs.set_executable(&self.config.installer_file) {
            warn!(error = %e, "Could not mark installer as executable");
        }
    }
}

fn fetch_installer(url: &str) -> Result<Vec<u8>, SetupError> {
    let failed = |reason: String| SetupError::NativeDownloadFailed {
        url: url.to_string(),
        reason,
    };

    let response = reqwest::blocking::get(url).map_err(|e| failed(e.to_string()))?;
    let status = response.status();
    let bytes = response.bytes().map_err(|e| failed(e.to_string()))?;

    installer_body(status, bytes.to_vec()).map_err(failed)
}

/// Only a successful, non-empty response is treated as an installer script
fn installer_body(status: StatusCode, body: Vec<u8>) -> Result<Vec<u8>, String> {
    if !status.is_success() {
        return Err(format!("HTTP {}", status));
    }
    if body.is_empty() {
        return Err("empty response body".to_string());
    }
    Ok(body)
}
