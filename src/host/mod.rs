//! CI host capabilities
//!
//! The runner exposes inputs, outputs, failure reporting, log grouping and
//! search-path mutation. [`ActionHost`] and [`PathRegistrar`] are the narrow
//! seams the installer talks to; [`GithubActionsHost`] implements them on top
//! of the GitHub Actions file and workflow-command protocol, and
//! [`RecordingHost`] keeps everything in memory for tests.

mod github;
mod recording;

pub use github::{escape_data, escape_property, GithubActionsHost};
pub use recording::RecordingHost;

use anyhow::Result;
use std::path::Path;

/// Inputs, outputs and status reporting of the surrounding CI job
pub trait ActionHost: Send + Sync {
    /// Value of a named input, `None` when unset or blank
    fn input(&self, name: &str) -> Option<String>;

    /// Publish a named output for downstream steps
    fn set_output(&self, name: &str, value: &str) -> Result<()>;

    /// Report the run as failed with a human-readable message
    fn set_failed(&self, message: &str);

    /// Surface a non-fatal problem as a job annotation
    fn warning(&self, message: &str);

    fn start_group(&self, name: &str);

    fn end_group(&self);
}

/// Appends directories to the executable search path
///
/// Registration is additive and never deduplicated. Registering the same
/// directory twice leaves a harmless duplicate entry.
pub trait PathRegistrar: Send + Sync {
    fn register(&self, dir: &Path);
}
