//! Library-level setup runs against scripted commands and an in-memory
//! filesystem

use setup_dojo::config::{InstallerSource, MissingBinaryPolicy, SetupConfig};
use setup_dojo::fs::MockFileSystem;
use setup_dojo::host::RecordingHost;
use setup_dojo::installer::VERSION_OUTPUT;
use setup_dojo::process::{ProcessError, ScriptedCommandRunner};
use setup_dojo::{DojoLayout, DojoSetup, InstallRequest, SetupError, ToolchainVersion};
use std::path::PathBuf;

const HOME: &str = "/home/runner";
const MANAGER: &str = "/home/runner/.dojo/dojoup/dojoup";

fn config(policy: MissingBinaryPolicy) -> SetupConfig {
    SetupConfig {
        installer_url: "https://install.dojoengine.org".to_string(),
        installer_file: PathBuf::from("dojoup-installer.sh"),
        missing_binary: policy,
        downloader: InstallerSource::Curl,
        log_level: "info".to_string(),
    }
}

fn installed_fs() -> MockFileSystem {
    let fs = MockFileSystem::new();
    fs.add_file("dojoup-installer.sh", "#!/usr/bin/env bash\n");
    fs.add_file(MANAGER, "");
    fs
}

#[test]
fn test_latest_install_publishes_detected_version() {
    let runner = ScriptedCommandRunner::new();
    runner.push_stdout(MANAGER, "");
    runner.push_stdout(MANAGER, "dojoup 0.1.0\nversion: 1.4.0\n");
    let fs = installed_fs();
    let host = RecordingHost::new();
    let config = config(MissingBinaryPolicy::Strict);

    let setup = DojoSetup::new(&runner, &fs, &host, &host, &config, DojoLayout::new(HOME));
    let request = InstallRequest::resolve(None, &host);
    let result = setup.run_and_report(&request).unwrap();

    assert_eq!(result.version, "1.4.0");
    assert_eq!(host.output(VERSION_OUTPUT), Some("1.4.0".to_string()));
    assert!(host.failures().is_empty());

    assert!(runner.was_invoked_with(
        "curl",
        &[
            "-L",
            "https://install.dojoengine.org",
            "-o",
            "dojoup-installer.sh"
        ]
    ));
    assert!(runner.was_invoked_with("bash", &["dojoup-installer.sh"]));
    assert!(runner.was_invoked_with(MANAGER, &["install"]));
    assert!(runner.was_invoked_with(MANAGER, &["show"]));

    let programs: Vec<String> = runner
        .invocations()
        .into_iter()
        .map(|inv| inv.program)
        .collect();
    assert_eq!(programs, vec!["curl", "bash", MANAGER, MANAGER]);

    assert_eq!(
        host.registered_paths(),
        vec![
            PathBuf::from("/home/runner/.dojo/dojoup"),
            PathBuf::from("/home/runner/.dojo/bin"),
        ]
    );
}

#[test]
fn test_version_input_is_forwarded_and_falls_back_to_bare_version() {
    let runner = ScriptedCommandRunner::new();
    runner.push_stdout(MANAGER, "");
    runner.push_stdout(MANAGER, "Dojo toolchain 0.5.0 installed");
    let fs = installed_fs();
    let host = RecordingHost::new().with_input("version", "0.5.0");
    let config = config(MissingBinaryPolicy::Strict);

    let setup = DojoSetup::new(&runner, &fs, &host, &host, &config, DojoLayout::new(HOME));
    let request = InstallRequest::resolve(None, &host);
    assert_eq!(
        request.version,
        ToolchainVersion::Specific("0.5.0".to_string())
    );

    let result = setup.run_and_report(&request).unwrap();

    assert!(runner.was_invoked_with(MANAGER, &["install", "0.5.0"]));
    assert_eq!(result.version, "0.5.0");
    assert_eq!(host.output(VERSION_OUTPUT), Some("0.5.0".to_string()));
}

#[test]
fn test_download_failure_stops_before_install() {
    let runner = ScriptedCommandRunner::new();
    runner.push_failure("curl", ProcessError::other("curl failed"));
    let fs = installed_fs();
    let host = RecordingHost::new();
    let config = config(MissingBinaryPolicy::Strict);

    let setup = DojoSetup::new(&runner, &fs, &host, &host, &config, DojoLayout::new(HOME));
    assert!(setup.run_and_report(&InstallRequest::latest()).is_err());

    assert_eq!(host.failures(), vec!["curl failed".to_string()]);
    assert!(host.outputs().is_empty());
    assert!(host.registered_paths().is_empty());
    assert!(runner.invocations_of("bash").is_empty());
    assert!(runner.invocations_of(MANAGER).is_empty());
}

#[test]
fn test_failed_show_reports_error_sentinel() {
    let runner = ScriptedCommandRunner::new();
    runner.push_stdout(MANAGER, "");
    runner.push_failure(
        MANAGER,
        ProcessError::NonZeroExit {
            program: MANAGER.to_string(),
            code: 2,
        },
    );
    let fs = installed_fs();
    let host = RecordingHost::new();
    let config = config(MissingBinaryPolicy::Strict);

    let setup = DojoSetup::new(&runner, &fs, &host, &host, &config, DojoLayout::new(HOME));
    let result = setup.run_and_report(&InstallRequest::latest()).unwrap();

    assert_eq!(result.version, "error");
    assert_eq!(host.output(VERSION_OUTPUT), Some("error".to_string()));
    assert!(host.failures().is_empty());
}

#[test]
fn test_unrecognized_show_output_reports_unknown() {
    let runner = ScriptedCommandRunner::new();
    runner.push_stdout(MANAGER, "");
    runner.push_stdout(MANAGER, "no toolchain selected");
    let fs = installed_fs();
    let host = RecordingHost::new();
    let config = config(MissingBinaryPolicy::Strict);

    let setup = DojoSetup::new(&runner, &fs, &host, &host, &config, DojoLayout::new(HOME));
    let result = setup.run_and_report(&InstallRequest::latest()).unwrap();

    assert_eq!(result.version, "unknown");
}

#[test]
fn test_missing_binary_under_fallback_policy_uses_search_path() {
    let runner = ScriptedCommandRunner::new();
    runner.push_stdout("dojoup", "");
    runner.push_stdout("dojoup", "version: 1.4.0");
    let fs = MockFileSystem::new();
    let host = RecordingHost::new();
    let config = config(MissingBinaryPolicy::FallbackToPath);

    let setup = DojoSetup::new(&runner, &fs, &host, &host, &config, DojoLayout::new(HOME));
    let result = setup.run_and_report(&InstallRequest::latest()).unwrap();

    assert_eq!(result.version, "1.4.0");
    assert!(runner.was_invoked_with("dojoup", &["install"]));
    assert!(runner.invocations_of(MANAGER).is_empty());
    assert_eq!(
        host.warnings(),
        vec![
            format!("dojoup binary not found at {}", MANAGER),
            format!("dojoup not found at {}, falling back to 'dojoup' on PATH", MANAGER),
        ]
    );
    assert!(host.failures().is_empty());
}

#[test]
fn test_native_download_failure_is_reported_without_running_commands() {
    let runner = ScriptedCommandRunner::new();
    let fs = installed_fs();
    let host = RecordingHost::new();
    let config = SetupConfig {
        installer_url: "http://127.0.0.1:1/install".to_string(),
        downloader: InstallerSource::Native,
        ..config(MissingBinaryPolicy::Strict)
    };

    let setup = DojoSetup::new(&runner, &fs, &host, &host, &config, DojoLayout::new(HOME));
    let err = setup.run_and_report(&InstallRequest::latest()).unwrap_err();

    assert!(matches!(err, SetupError::NativeDownloadFailed { .. }));
    assert_eq!(host.failures(), vec![err.to_string()]);
    assert!(host.failures()[0]
        .starts_with("Failed to download installer from http://127.0.0.1:1/install"));
    assert!(runner.invocations().is_empty());
    assert!(host.registered_paths().is_empty());
}

#[test]
fn test_repeated_runs_repeat_every_step() {
    let runner = ScriptedCommandRunner::new();
    let fs = installed_fs();
    let host = RecordingHost::new();
    let config = config(MissingBinaryPolicy::Strict);

    let setup = DojoSetup::new(&runner, &fs, &host, &host, &config, DojoLayout::new(HOME));
    setup.run_and_report(&InstallRequest::latest()).unwrap();
    setup.run_and_report(&InstallRequest::latest()).unwrap();

    assert_eq!(runner.invocations_of("curl").len(), 2);
    assert_eq!(runner.invocations_of("bash").len(), 2);
    assert_eq!(host.registered_paths().len(), 4);
    assert_eq!(
        host.outputs(),
        vec![
            (VERSION_OUTPUT.to_string(), "unknown".to_string()),
            (VERSION_OUTPUT.to_string(), "unknown".to_string()),
        ]
    );
}
