use super::{ActionHost, PathRegistrar};
use anyhow::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug, Default)]
struct Recorded {
    outputs: Vec<(String, String)>,
    paths: Vec<PathBuf>,
    failures: Vec<String>,
    warnings: Vec<String>,
    groups: Vec<String>,
    open_groups: usize,
}

/// In-memory host that records every interaction
#[derive(Debug, Default)]
pub struct RecordingHost {
    inputs: HashMap<String, String>,
    recorded: Mutex<Recorded>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(mut self, name: &str, value: &str) -> Self {
        self.inputs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn outputs(&self) -> Vec<(String, String)> {
        self.recorded.lock().unwrap().outputs.clone()
    }

    pub fn output(&self, name: &str) -> Option<String> {
        self.recorded
            .lock()
            .unwrap()
            .outputs
            .iter()
            .rev()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }

    pub fn registered_paths(&self) -> Vec<PathBuf> {
        self.recorded.lock().unwrap().paths.clone()
    }

    pub fn failures(&self) -> Vec<String> {
        self.recorded.lock().unwrap().failures.clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.recorded.lock().unwrap().warnings.clone()
    }

    pub fn groups(&self) -> Vec<String> {
        self.recorded.lock().unwrap().groups.clone()
    }

    pub fn open_groups(&self) -> usize {
        self.recorded.lock().unwrap().open_groups
    }
}

impl ActionHost for RecordingHost {
    fn input(&self, name: &str) -> Option<String> {
        self.inputs
            .get(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn set_output(&self, name: &str, value: &str) -> Result<()> {
        self.recorded
            .lock()
            .unwrap()
            .outputs
            .push((name.to_string(), value.to_string()));
        Ok(())
    }

    fn set_failed(&self, message: &str) {
        self.recorded
            .lock()
            .unwrap()
            .failures
            .push(message.to_string());
    }

    fn warning(&self, message: &str) {
        self.recorded
            .lock()
            .unwrap()
            .warnings
            .push(message.to_string());
    }

    fn start_group(&self, name: &str) {
        let mut recorded = self.recorded.lock().unwrap();
        recorded.groups.push(name.to_string());
        recorded.open_groups += 1;
    }

    fn end_group(&self) {
        let mut recorded = self.recorded.lock().unwrap();
        recorded.open_groups = recorded.open_groups.saturating_sub(1);
    }
}

impl PathRegistrar for RecordingHost {
    fn register(&self, dir: &Path) {
        self.recorded.lock().unwrap().paths.push(dir.to_path_buf());
    }
}
