//! Installed version detection
//!
//! `dojoup show` prints free-form text. The version is pulled out by an
//! ordered chain of extractors; when none matches, or when `show` itself
//! fails, a sentinel string is returned instead of an error. The toolchain is
//! already installed at this point, so a detection problem must not fail the
//! run.

use crate::host::ActionHost;
use crate::process::{CommandRunner, Invocation};
use regex::Regex;
use std::path::Path;
use tracing::{debug, warn};

/// Output had no recognizable version
pub const UNKNOWN_VERSION: &str = "unknown";

/// The `show` invocation failed
pub const ERROR_VERSION: &str = "error";

pub type Extractor = fn(&str) -> Option<String>;

/// Applied in order, first match wins
pub const EXTRACTORS: &[Extractor] = &[marker_version, semver_shaped];

/// Token following a literal `version:` marker and whitespace
pub fn marker_version(text: &str) -> Option<String> {
    let re = Regex::new(r"version:\s+(\S+)").expect("valid regex");
    re.captures(text)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
}

/// First `<digits>.<digits>.<digits>` substring
pub fn semver_shaped(text: &str) -> Option<String> {
    let re = Regex::new(r"\d+\.\d+\.\d+").expect("valid regex");
    re.find(text).map(|m| m.as_str().to_string())
}

/// Run the extractor chain over captured output
pub fn extract_version(text: &str) -> String {
    if text.trim().is_empty() {
        return UNKNOWN_VERSION.to_string();
    }

    EXTRACTORS
        .iter()
        .find_map(|extract| extract(text))
        .unwrap_or_else(|| UNKNOWN_VERSION.to_string())
}

/// Outcome of comparing the installed version with an expected one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionCheck {
    pub installed: String,
    pub expected: String,
}

impl VersionCheck {
    /// Exact string comparison, no normalization
    pub fn matches(&self) -> bool {
        self.installed == self.expected
    }
}

pub struct VersionResolver<'a> {
    runner: &'a dyn CommandRunner,
    host: Option<&'a dyn ActionHost>,
}

impl<'a> VersionResolver<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner, host: None }
    }

    /// Forward `show` diagnostics to the host as warnings
    pub fn with_host(mut self, host: &'a dyn ActionHost) -> Self {
        self.host = Some(host);
        self
    }

    /// Version reported by `<manager> show`. Never fails.
    pub fn resolve(&self, manager: &Path) -> String {
        let invocation = Invocation::for_path(manager).arg("show").captured();

        let output = match self.runner.run(&invocation) {
            Ok(output) => output,
            Err(e) => {
                warn!(command = %invocation, error = %e, "Failed to query installed version");
                return ERROR_VERSION.to_string();
            }
        };

        for line in output.stderr.lines().filter(|l| !l.trim().is_empty()) {
            warn!(target: "setup_dojo::dojoup", "{}", line);
            if let Some(host) = self.host {
                host.warning(line);
            }
        }

        let version = extract_version(&output.stdout);
        if version == UNKNOWN_VERSION {
            warn!(stdout = %output.stdout.trim(), "Could not detect a version in dojoup output");
        } else {
            debug!(version = %version, "Detected installed version");
        }
        version
    }

    pub fn verify(&self, manager: &Path, expected: &str) -> VersionCheck {
        VersionCheck {
            installed: self.resolve(manager),
            expected: expected.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::RecordingHost;
    use crate::process::{CommandOutput, ProcessError, ScriptedCommandRunner};
    use yare::parameterized;

    const MANAGER: &str = "/home/user/.dojo/dojoup/dojoup";

    #[test]
    fn test_marker_version() {
        assert_eq!(marker_version("version: 1.4.0\n"), Some("1.4.0".to_string()));
        assert_eq!(
            marker_version("sozo\nversion:   v1.0.0-alpha.5 (abc123)"),
            Some("v1.0.0-alpha.5".to_string())
        );
        assert_eq!(marker_version("version:1.4.0"), None);
        assert_eq!(marker_version("2.3.1"), None);
    }

    #[test]
    fn test_semver_shaped() {
        assert_eq!(semver_shaped("katana 2.3.1"), Some("2.3.1".to_string()));
        assert_eq!(
            semver_shaped("sozo 1.2.3 / torii 4.5.6"),
            Some("1.2.3".to_string())
        );
        assert_eq!(semver_shaped("1.2"), None);
    }

    #[parameterized(
        marker = { "version: 1.4.0\n", "1.4.0" },
        marker_wins_over_bare = { "toolchain 9.9.9\nversion: 1.4.0", "1.4.0" },
        bare_fallback = { "installed dojo 2.3.1 (stable)", "2.3.1" },
        bare_only = { "0.5.0", "0.5.0" },
        empty = { "", "unknown" },
        whitespace = { "  \n\t", "unknown" },
        unmatched = { "no toolchain installed", "unknown" },
    )]
    fn test_extract_version(text: &str, expected: &str) {
        assert_eq!(extract_version(text), expected);
    }

    #[test]
    fn test_resolve_invokes_show_with_capture() {
        let runner = ScriptedCommandRunner::new();
        runner.push_stdout(MANAGER, "version: 1.4.0\n");

        let version = VersionResolver::new(&runner).resolve(Path::new(MANAGER));

        assert_eq!(version, "1.4.0");
        let calls = runner.invocations_of(MANAGER);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].args, vec!["show"]);
        assert!(calls[0].capture);
    }

    #[test]
    fn test_resolve_returns_error_sentinel_on_failure() {
        let runner = ScriptedCommandRunner::new();
        runner.push_failure(
            MANAGER,
            ProcessError::NonZeroExit {
                program: MANAGER.to_string(),
                code: 1,
            },
        );

        let version = VersionResolver::new(&runner).resolve(Path::new(MANAGER));
        assert_eq!(version, ERROR_VERSION);
    }

    #[test]
    fn test_resolve_returns_unknown_for_empty_output() {
        let runner = ScriptedCommandRunner::new();

        let version = VersionResolver::new(&runner).resolve(Path::new(MANAGER));
        assert_eq!(version, UNKNOWN_VERSION);
    }

    #[test]
    fn test_resolve_ignores_stderr_for_extraction() {
        let runner = ScriptedCommandRunner::new();
        runner.push_result(
            MANAGER,
            Ok(CommandOutput::with_stdout("nothing here").with_stderr("version: 9.9.9")),
        );

        let version = VersionResolver::new(&runner).resolve(Path::new(MANAGER));
        assert_eq!(version, UNKNOWN_VERSION);
    }

    #[test]
    fn test_verify_exact_match() {
        let runner = ScriptedCommandRunner::new();
        runner.push_stdout(MANAGER, "0.5.0");
        runner.push_stdout(MANAGER, "0.5.0");

        let resolver = VersionResolver::new(&runner);
        assert!(resolver.verify(Path::new(MANAGER), "0.5.0").matches());

        let check = resolver.verify(Path::new(MANAGER), "v0.5.0");
        assert!(!check.matches());
        assert_eq!(check.installed, "0.5.0");
    }

    #[test]
    fn test_stderr_lines_become_host_warnings() {
        let runner = ScriptedCommandRunner::new();
        runner.push_result(
            MANAGER,
            Ok(CommandOutput::with_stdout("version: 1.4.0")
                .with_stderr("toolchain is outdated\n\n")),
        );
        let host = RecordingHost::new();

        let version = VersionResolver::new(&runner)
            .with_host(&host)
            .resolve(Path::new(MANAGER));

        assert_eq!(version, "1.4.0");
        assert_eq!(host.warnings(), vec!["toolchain is outdated"]);
    }
}
