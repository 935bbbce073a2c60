use super::{CommandOutput, CommandRunner, Invocation, ProcessError};
use std::process::{Command, ExitStatus};
use tracing::debug;

/// Spawns real processes with `std::process::Command`
///
/// Uncaptured invocations inherit stdio, so installer progress shows up in the
/// job log as it happens.
#[derive(Debug, Default)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self
    }

    fn check_status(program: &str, status: ExitStatus) -> Result<i32, ProcessError> {
        match status.code() {
            Some(0) => Ok(0),
            Some(code) => Err(ProcessError::NonZeroExit {
                program: program.to_string(),
                code,
            }),
            None => Err(ProcessError::Terminated {
                program: program.to_string(),
            }),
        }
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput, ProcessError> {
        debug!(command = %invocation, capture = invocation.capture, "Running process");

        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args);

        let spawn_error = |source: std::io::Error| ProcessError::Spawn {
            program: invocation.program.clone(),
            source,
        };

        if invocation.capture {
            let output = command.output().map_err(spawn_error)?;
            let exit_code = Self::check_status(&invocation.program, output.status)?;
            Ok(CommandOutput {
                exit_code,
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        } else {
            let status = command.status().map_err(spawn_error)?;
            let exit_code = Self::check_status(&invocation.program, status)?;
            Ok(CommandOutput {
                exit_code,
                ..CommandOutput::default()
            })
        }
    }
}
