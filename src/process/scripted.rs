use super::{CommandOutput, CommandRunner, Invocation, ProcessError};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Test double that records every invocation and replays queued outcomes
///
/// Outcomes are queued per program. A program with an empty queue succeeds
/// with no output.
pub struct ScriptedCommandRunner {
    invocations: Mutex<Vec<Invocation>>,
    outcomes: Mutex<HashMap<String, VecDeque<Result<CommandOutput, ProcessError>>>>,
}

impl ScriptedCommandRunner {
    pub fn new() -> Self {
        Self {
            invocations: Mutex::new(Vec::new()),
            outcomes: Mutex::new(HashMap::new()),
        }
    }

    pub fn push_result(
        &self,
        program: impl Into<String>,
        result: Result<CommandOutput, ProcessError>,
    ) {
        self.outcomes
            .lock()
            .unwrap()
            .entry(program.into())
            .or_default()
            .push_back(result);
    }

    pub fn push_stdout(&self, program: impl Into<String>, stdout: impl Into<String>) {
        self.push_result(program, Ok(CommandOutput::with_stdout(stdout)));
    }

    pub fn push_failure(&self, program: impl Into<String>, error: ProcessError) {
        self.push_result(program, Err(error));
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().unwrap().clone()
    }

    pub fn invocations_of(&self, program: &str) -> Vec<Invocation> {
        self.invocations
            .lock()
            .unwrap()
            .iter()
            .filter(|inv| inv.program == program)
            .cloned()
            .collect()
    }

    pub fn was_invoked_with(&self, program: &str, args: &[&str]) -> bool {
        self.invocations_of(program)
            .iter()
            .any(|inv| inv.args.iter().map(String::as_str).eq(args.iter().copied()))
    }
}

impl Default for ScriptedCommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for ScriptedCommandRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput, ProcessError> {
        self.invocations.lock().unwrap().push(invocation.clone());

        self.outcomes
            .lock()
            .unwrap()
            .get_mut(&invocation.program)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Ok(CommandOutput::success()))
    }
}
