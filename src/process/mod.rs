use std::io;

pub mod executor;
pub mod resolve;
pub mod signal;

pub use executor::ProcessExecutor;
pub use resolve::{resolve, Resolution};
pub use signal::InterruptFlag;

pub const COMMAND_NOT_FOUND_STATUS: i32 = 127;
pub const PERMISSION_DENIED_STATUS: i32 = 126;
pub const SPAWN_FAILURE_STATUS: i32 = 1;
/// Added to the signal number when a child is killed by a signal.
pub const SIGNAL_STATUS_BASE: i32 = 128;

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("{0}: not found")]
    CommandNotFound(String),
    #[error("{0}: Permission denied")]
    PermissionDenied(String),
    #[error("{command}: {source}")]
    SpawnFailure { command: String, source: io::Error },
    #[error("signal error: {0}")]
    SignalError(io::Error),
}

impl ProcessError {
    pub fn status(&self) -> i32 {
        match self {
            ProcessError::CommandNotFound(_) => COMMAND_NOT_FOUND_STATUS,
            ProcessError::PermissionDenied(_) => PERMISSION_DENIED_STATUS,
            ProcessError::SpawnFailure { .. } | ProcessError::SignalError(_) => {
                SPAWN_FAILURE_STATUS
            }
        }
    }
}
