use super::{ActionHost, PathRegistrar};
use anyhow::{bail, Context, Result};
use std::env;
use std::ffi::OsString;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const OUTPUT_FILE_VAR: &str = "GITHUB_OUTPUT";
const PATH_FILE_VAR: &str = "GITHUB_PATH";

/// GitHub Actions runner integration
///
/// Outputs and path entries go to the files named by `GITHUB_OUTPUT` and
/// `GITHUB_PATH`. Without those files the legacy workflow commands are
/// printed instead.
#[derive(Debug, Clone, Default)]
pub struct GithubActionsHost {
    output_file: Option<PathBuf>,
    path_file: Option<PathBuf>,
}

impl GithubActionsHost {
    pub fn from_env() -> Self {
        Self {
            output_file: non_empty_var(OUTPUT_FILE_VAR).map(PathBuf::from),
            path_file: non_empty_var(PATH_FILE_VAR).map(PathBuf::from),
        }
    }

    pub fn with_files(output_file: Option<PathBuf>, path_file: Option<PathBuf>) -> Self {
        Self {
            output_file,
            path_file,
        }
    }

    /// Environment variable carrying a named input (`INPUT_<NAME>`)
    pub fn input_var(name: &str) -> String {
        format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
    }

    fn issue_command(command: &str, properties: &[(&str, &str)], message: &str) {
        println!("{}", command_line(command, properties, message));
    }

    fn append_line(file: &Path, message: &str) -> Result<()> {
        let mut handle = OpenOptions::new()
            .create(true)
            .append(true)
            .open(file)
            .with_context(|| format!("Failed to open {}", file.display()))?;
        writeln!(handle, "{}", message)
            .with_context(|| format!("Failed to append to {}", file.display()))
    }

    fn prepend_to_process_path(dir: &Path) {
        let existing: Vec<PathBuf> = env::var_os("PATH")
            .map(|p| env::split_paths(&p).collect())
            .unwrap_or_default();

        let entries = std::iter::once(dir.to_path_buf()).chain(existing);
        match env::join_paths(entries) {
            Ok(joined) => env::set_var("PATH", joined),
            Err(e) => warn!(path = %dir.display(), error = %e, "Cannot add directory to PATH"),
        }
    }
}

/// Workflow command line, e.g. `::warning::message`
pub(crate) fn command_line(command: &str, properties: &[(&str, &str)], message: &str) -> String {
    let mut line = format!("::{}", command);
    if !properties.is_empty() {
        let props: Vec<String> = properties
            .iter()
            .map(|(k, v)| format!("{}={}", k, escape_property(v)))
            .collect();
        line.push(' ');
        line.push_str(&props.join(","));
    }
    line.push_str("::");
    line.push_str(&escape_data(message));
    line
}

/// Heredoc block understood by the runner's file commands
pub(crate) fn key_value_block(name: &str, value: &str, delimiter: &str) -> Result<String> {
    if name.contains(delimiter) {
        bail!("Unexpected input: name should not contain the delimiter \"{delimiter}\"");
    }
    if value.contains(delimiter) {
        bail!("Unexpected input: value should not contain the delimiter \"{delimiter}\"");
    }
    Ok(format!("{name}<<{delimiter}\n{value}\n{delimiter}"))
}

/// Escape a workflow command message
pub fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escape a workflow command property value
pub fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}

fn non_empty_var(name: &str) -> Option<OsString> {
    env::var_os(name).filter(|v| !v.is_empty())
}

impl ActionHost for GithubActionsHost {
    fn input(&self, name: &str) -> Option<String> {
        env::var(Self::input_var(name))
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn set_output(&self, name: &str, value: &str) -> Result<()> {
        match &self.output_file {
            Some(file) => {
                let delimiter = format!("ghadelimiter_{}", uuid::Uuid::new_v4());
                let block = key_value_block(name, value, &delimiter)?;
                Self::append_line(file, &block)
            }
            None => {
                println!();
                Self::issue_command("set-output", &[("name", name)], value);
                Ok(())
            }
        }
    }

    fn set_failed(&self, message: &str) {
        Self::issue_command("error", &[], message);
    }

    fn start_group(&self, name: &str) {
        Self::issue_command("group", &[], name);
    }

    fn end_group(&self) {
        Self::issue_command("endgroup", &[], "");
    }

    fn warning(&self, message: &str) {
        Self::issue_command("warning", &[], message);
    }
}

impl PathRegistrar for GithubActionsHost {
    fn register(&self, dir: &Path) {
        let entry = dir.to_string_lossy();
        debug!(path = %entry, "Registering search path entry");

        match &self.path_file {
            Some(file) => {
                if let Err(e) = Self::append_line(file, &entry) {
                    warn!(error = %e, "Failed to persist PATH entry for later steps");
                }
            }
            None => Self::issue_command("add-path", &[], &entry),
        }

        Self::prepend_to_process_path(dir);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_input_var_name() {
        assert_eq!(GithubActionsHost::input_var("version"), "INPUT_VERSION");
        assert_eq!(
            GithubActionsHost::input_var("dojo version"),
            "INPUT_DOJO_VERSION"
        );
    }

    #[test]
    fn test_escape_data() {
        assert_eq!(escape_data("50% done\r\nnext"), "50%25 done%0D%0Anext");
        assert_eq!(escape_data("plain"), "plain");
    }

    #[test]
    fn test_warning_command_is_escaped() {
        assert_eq!(
            command_line("warning", &[], "dojoup not found\nusing PATH"),
            "::warning::dojoup not found%0Ausing PATH"
        );
        assert_eq!(
            command_line("set-output", &[("name", "a:b")], "1.4.0"),
            "::set-output name=a%3Ab::1.4.0"
        );
    }

    #[test]
    fn test_escape_property() {
        assert_eq!(escape_property("a:b,c"), "a%3Ab%2Cc");
    }

    #[test]
    fn test_key_value_block() {
        let block = key_value_block("version", "1.4.0", "ghadelimiter_x").unwrap();
        assert_eq!(block, "version<<ghadelimiter_x\n1.4.0\nghadelimiter_x");
    }

    #[test]
    fn test_key_value_block_rejects_delimiter_in_value() {
        assert!(key_value_block("version", "a ghadelimiter_x b", "ghadelimiter_x").is_err());
        assert!(key_value_block("ghadelimiter_x", "1.0.0", "ghadelimiter_x").is_err());
    }

    #[test]
    fn test_set_output_appends_heredoc() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("output");
        let host = GithubActionsHost::with_files(Some(output.clone()), None);

        host.set_output("version", "1.4.0").unwrap();
        host.set_output("other", "x").unwrap();

        let content = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("version<<ghadelimiter_"));
        assert_eq!(lines[1], "1.4.0");
        assert_eq!(lines[2], &lines[0]["version<<".len()..]);
        assert!(lines[3].starts_with("other<<ghadelimiter_"));
    }

    #[test]
    #[serial]
    fn test_register_writes_path_file_and_prepends_process_path() {
        let temp = TempDir::new().unwrap();
        let path_file = temp.path().join("path");
        let host = GithubActionsHost::with_files(None, Some(path_file.clone()));
        let dir = temp.path().join(".dojo").join("bin");

        let original = env::var_os("PATH");
        host.register(&dir);
        host.register(&dir);

        let content = fs::read_to_string(&path_file).unwrap();
        let expected = format!("{}\n", dir.display());
        assert_eq!(content, expected.repeat(2));

        let current = env::var_os("PATH").unwrap();
        let first = env::split_paths(&current).next().unwrap();
        assert_eq!(first, dir);

        match original {
            Some(p) => env::set_var("PATH", p),
            None => env::remove_var("PATH"),
        }
    }

    #[test]
    #[serial]
    fn test_input_reads_trimmed_env() {
        env::set_var("INPUT_VERSION", "  0.5.0 ");
        let host = GithubActionsHost::default();
        assert_eq!(host.input("version"), Some("0.5.0".to_string()));

        env::set_var("INPUT_VERSION", "   ");
        assert_eq!(host.input("version"), None);

        env::remove_var("INPUT_VERSION");
        assert_eq!(host.input("version"), None);
    }

    #[test]
    #[serial]
    fn test_from_env_ignores_empty_file_vars() {
        env::set_var(OUTPUT_FILE_VAR, "");
        env::remove_var(PATH_FILE_VAR);

        let host = GithubActionsHost::from_env();
        assert!(host.output_file.is_none());
        assert!(host.path_file.is_none());

        env::remove_var(OUTPUT_FILE_VAR);
    }
}
