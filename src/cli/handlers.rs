use super::commands::{InstallArgs, OutputFormatArg, ShowArgs, VerifyArgs};
use super::output::OutputFormatter;
use crate::config::{ConfigError, InstallerSource, MissingBinaryPolicy, SetupConfig};
use crate::fs::RealFileSystem;
use crate::host::{ActionHost, GithubActionsHost};
use crate::installer::{DojoLayout, DojoSetup, InstallRequest, InstallResult};
use crate::process::SystemCommandRunner;
use tracing::{debug, error, info};

/// Environment config with command-line overrides applied on top
fn build_config(args: Option<&InstallArgs>) -> Result<SetupConfig, ConfigError> {
    let mut config = SetupConfig::from_env()?;

    if let Some(args) = args {
        if let Some(url) = &args.installer_url {
            debug!("Installer URL overridden to: {}", url);
            config.installer_url = url.clone();
        }
        if args.native_download {
            config.downloader = InstallerSource::Native;
        }
        if args.fallback_to_path {
            config.missing_binary = MissingBinaryPolicy::FallbackToPath;
        } else if args.strict {
            config.missing_binary = MissingBinaryPolicy::Strict;
        }
    }

    config.validate()?;
    debug!("{}", config);
    Ok(config)
}

fn report_config_error(e: &ConfigError) {
    error!("Configuration error: {}", e);
    eprintln!("\nPlease check your SETUP_DOJO_* environment variables and command-line arguments.");
}

fn print_result(result: &InstallResult, format: OutputFormatArg) -> i32 {
    match OutputFormatter::new(format.into()).format(result) {
        Ok(out) => {
            print!("{}", out);
            0
        }
        Err(e) => {
            error!("Failed to format output: {:#}", e);
            1
        }
    }
}

pub fn handle_install(args: &InstallArgs) -> i32 {
    let host = GithubActionsHost::from_env();
    let config = match build_config(Some(args)) {
        Ok(config) => config,
        Err(e) => {
            report_config_error(&e);
            host.set_failed(&e.to_string());
            return 1;
        }
    };

    let layout = match DojoLayout::from_home_dir() {
        Ok(layout) => layout,
        Err(e) => {
            error!("{}", e);
            host.set_failed(&e.to_string());
            return 1;
        }
    };
    debug!("Dojo root: {}", layout.root().display());

    let runner = SystemCommandRunner::new();
    let fs = RealFileSystem::new();
    let setup = DojoSetup::new(&runner, &fs, &host, &host, &config, layout);
    let request = InstallRequest::resolve(args.dojo_version.as_deref(), &host);

    match setup.run_and_report(&request) {
        Ok(result) => print_result(&result, args.format),
        // already reported through the host
        Err(_) => 1,
    }
}

pub fn handle_show(args: &ShowArgs) -> i32 {
    let config = match build_config(None) {
        Ok(config) => config,
        Err(e) => {
            report_config_error(&e);
            return 1;
        }
    };
    let layout = match DojoLayout::from_home_dir() {
        Ok(layout) => layout,
        Err(e) => {
            error!("{}", e);
            return 1;
        }
    };

    let runner = SystemCommandRunner::new();
    let fs = RealFileSystem::new();
    let host = GithubActionsHost::from_env();
    let setup = DojoSetup::new(&runner, &fs, &host, &host, &config, layout);

    let result = InstallResult {
        version: setup.installed_version(),
    };
    print_result(&result, args.format)
}

pub fn handle_verify(args: &VerifyArgs) -> i32 {
    let config = match build_config(None) {
        Ok(config) => config,
        Err(e) => {
            report_config_error(&e);
            return 1;
        }
    };
    let layout = match DojoLayout::from_home_dir() {
        Ok(layout) => layout,
        Err(e) => {
            error!("{}", e);
            return 1;
        }
    };

    let runner = SystemCommandRunner::new();
    let fs = RealFileSystem::new();
    let host = GithubActionsHost::from_env();
    let setup = DojoSetup::new(&runner, &fs, &host, &host, &config, layout);

    let check = setup.verify(&args.expected);
    if check.matches() {
        info!("Installed version {} matches", check.installed);
        println!("\u{2713} Dojo toolchain {}", check.installed);
        0
    } else {
        error!(
            "Installed version {} does not match expected {}",
            check.installed, check.expected
        );
        println!(
            "\u{2717} Dojo toolchain {} (expected {})",
            check.installed, check.expected
        );
        1
    }
}
