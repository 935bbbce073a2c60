//! Output formatting for install results

use anyhow::{Context, Result};

use crate::installer::{InstallResult, ERROR_VERSION, UNKNOWN_VERSION};

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    Yaml,
    /// Human-readable formatted text
    Human,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self, result: &InstallResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(result)
                .context("Failed to serialize install result to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(result).context("Failed to serialize install result to YAML")
            }
            OutputFormat::Human => Ok(self.format_human(result)),
        }
    }

    fn format_human(&self, result: &InstallResult) -> String {
        match result.version.as_str() {
            UNKNOWN_VERSION => {
                "\u{26A0} Dojo toolchain installed (version could not be detected)\n".to_string()
            }
            ERROR_VERSION => {
                "\u{26A0} Dojo toolchain installed (`dojoup show` failed)\n".to_string()
            }
            version => format!("\u{2713} Dojo toolchain {}\n", version),
        }
    }
}
