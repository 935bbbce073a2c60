pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, Commands, InstallArgs, OutputFormatArg, ShowArgs, VerifyArgs};
pub use output::{OutputFormat, OutputFormatter};
