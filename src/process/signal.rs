use std::io;
use std::os::unix::process::CommandExt;
use std::process::Command;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use signal_hook::consts::SIGINT;

use super::ProcessError;

/// Set when the shell receives `SIGINT`.
///
/// Registering the flag replaces the default disposition, so an interrupt
/// no longer terminates the shell itself. The handler is installed with
/// `SA_RESTART`, so blocking reads resume after it runs. The foreground
/// child gets the same signal from the terminal; the shell only clears the
/// flag once the child is reaped.
#[derive(Debug, Clone, Default)]
pub struct InterruptFlag(Arc<AtomicBool>);

impl InterruptFlag {
    pub fn register() -> Result<Self, ProcessError> {
        let flag = Self::default();
        signal_hook::flag::register(SIGINT, Arc::clone(&flag.0))
            .map_err(ProcessError::SignalError)?;
        Ok(flag)
    }

    /// Clear the flag and report whether an interrupt arrived since the last call.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::Relaxed)
    }
}

/// Restore default `SIGINT` and `SIGQUIT` handling in the child before `exec`.
pub fn reset_in_child(command: &mut Command) {
    // SAFETY: only async-signal-safe calls run between fork and exec.
    unsafe {
        command.pre_exec(|| {
            if libc::signal(libc::SIGINT, libc::SIG_DFL) == libc::SIG_ERR
                || libc::signal(libc::SIGQUIT, libc::SIG_DFL) == libc::SIG_ERR
            {
                return Err(io::Error::last_os_error());
            }
            Ok(())
        });
    }
}
