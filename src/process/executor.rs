use std::io;
use std::os::unix::process::{CommandExt, ExitStatusExt};
use std::process::{Command, ExitStatus, Stdio};

use super::resolve::{resolve, Resolution};
use super::signal::{self, InterruptFlag};
use super::{ProcessError, SIGNAL_STATUS_BASE};
use crate::core::env::EnvVarManager;

/// Runs external commands in the foreground, one at a time.
#[derive(Debug, Clone, Default)]
pub struct ProcessExecutor {
    interrupted: Option<InterruptFlag>,
}

impl ProcessExecutor {
    pub fn new(interrupted: InterruptFlag) -> Self {
        Self {
            interrupted: Some(interrupted),
        }
    }

    /// Resolve `argv[0]`, spawn it with `env` as its whole environment and
    /// wait for it. Returns the status the shell records.
    pub fn execute(&self, argv: &[String], env: &EnvVarManager) -> Result<i32, ProcessError> {
        let Some(name) = argv.first() else {
            return Ok(0);
        };

        let path = match resolve(name, env.get("PATH")) {
            Resolution::Executable(path) => path,
            Resolution::NotExecutable(path) => {
                tracing::debug!(command = %name, path = %path.display(), "not executable");
                return Err(ProcessError::PermissionDenied(name.clone()));
            }
            Resolution::NotFound => {
                tracing::debug!(command = %name, "not found");
                return Err(ProcessError::CommandNotFound(name.clone()));
            }
        };

        let mut command = Command::new(&path);
        command
            .arg0(name)
            .args(&argv[1..])
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .env_clear()
            .envs(env.iter());
        signal::reset_in_child(&mut command);

        let mut child = command.spawn().map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ProcessError::CommandNotFound(name.clone()),
            io::ErrorKind::PermissionDenied => ProcessError::PermissionDenied(name.clone()),
            _ => ProcessError::SpawnFailure {
                command: name.clone(),
                source: e,
            },
        })?;
        tracing::debug!(command = %name, pid = child.id(), "spawned");

        let status = child.wait().map_err(|e| ProcessError::SpawnFailure {
            command: name.clone(),
            source: e,
        })?;

        // The interrupt was meant for the child.
        if self.interrupted.as_ref().is_some_and(InterruptFlag::take) {
            tracing::trace!(command = %name, "interrupt delivered to child");
        }

        let code = exit_code(status);
        tracing::debug!(command = %name, status = code, "exited");
        Ok(code)
    }
}

fn exit_code(status: ExitStatus) -> i32 {
    match (status.code(), status.signal()) {
        (Some(code), _) => code,
        (None, Some(signal)) => SIGNAL_STATUS_BASE + signal,
        (None, None) => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn env_with_path(path: &str) -> EnvVarManager {
        [("PATH", path)].into_iter().collect()
    }

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn script(dir: &TempDir, name: &str, body: &str) {
        let path = dir.path().join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[test]
    fn test_exit_status_is_returned() {
        let dir = TempDir::new().unwrap();
        script(&dir, "fails", "exit 3");
        let env = env_with_path(&dir.path().display().to_string());
        let executor = ProcessExecutor::default();
        assert_eq!(executor.execute(&argv(&["fails"]), &env).unwrap(), 3);
    }

    #[test]
    fn test_signal_status() {
        let dir = TempDir::new().unwrap();
        script(&dir, "killed", "kill -TERM $$");
        let env = env_with_path(&format!("{}:/bin:/usr/bin", dir.path().display()));
        let executor = ProcessExecutor::default();
        assert_eq!(
            executor.execute(&argv(&["killed"]), &env).unwrap(),
            SIGNAL_STATUS_BASE + libc::SIGTERM
        );
    }

    #[test]
    fn test_child_sees_only_session_environment() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out");
        script(
            &dir,
            "dump",
            &format!("echo \"$ONLY_HERE:$HOME\" > {}", out.display()),
        );
        let mut env = env_with_path(&dir.path().display().to_string());
        env.set("ONLY_HERE", "yes").unwrap();

        let executor = ProcessExecutor::default();
        assert_eq!(executor.execute(&argv(&["dump"]), &env).unwrap(), 0);
        assert_eq!(fs::read_to_string(out).unwrap(), "yes:\n");
    }

    #[test]
    fn test_not_found_and_permission_denied() {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("data");
        fs::write(&data, "text").unwrap();
        let env = env_with_path(&dir.path().display().to_string());
        let executor = ProcessExecutor::default();

        let err = executor.execute(&argv(&["nope"]), &env).unwrap_err();
        assert!(matches!(err, ProcessError::CommandNotFound(_)));
        assert_eq!(err.status(), 127);
        assert_eq!(err.to_string(), "nope: not found");

        let err = executor.execute(&argv(&["data"]), &env).unwrap_err();
        assert!(matches!(err, ProcessError::PermissionDenied(_)));
        assert_eq!(err.status(), 126);
    }

    #[test]
    fn test_empty_argv_is_noop() {
        let executor = ProcessExecutor::default();
        assert_eq!(executor.execute(&[], &EnvVarManager::new()).unwrap(), 0);
    }
}
