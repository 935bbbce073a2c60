//! Subprocess capability
//!
//! Every external program the installer touches (`curl`, `bash`, `dojoup`) is
//! reached through [`CommandRunner`], so the orchestration logic can be driven
//! by [`ScriptedCommandRunner`] in tests instead of a real shell.

mod error;
mod runner;
mod scripted;
mod system;

pub use error::ProcessError;
pub use runner::{CommandOutput, CommandRunner, Invocation};
pub use scripted::ScriptedCommandRunner;
pub use system::SystemCommandRunner;
