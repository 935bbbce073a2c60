use std::io;
use thiserror::Error;

/// Failure of a single external process invocation
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Unable to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("The process '{program}' failed with exit code {code}")]
    NonZeroExit { program: String, code: i32 },

    #[error("The process '{program}' was terminated by a signal")]
    Terminated { program: String },

    #[error("{0}")]
    Other(String),
}

impl ProcessError {
    pub fn other(message: impl Into<String>) -> Self {
        ProcessError::Other(message.into())
    }
}
