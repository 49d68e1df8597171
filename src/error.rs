use crate::core::commands::CommandError;
use crate::core::config::ConfigError;
use crate::process::ProcessError;
use crate::shell::syntax::{SyntaxError, SYNTAX_ERROR_STATUS};

/// Exit status used for command-line misuse and builtin usage errors.
pub const USAGE_ERROR_STATUS: i32 = 2;

/// Exit status for a script that cannot be opened, matching an unresolvable command.
pub const SCRIPT_OPEN_STATUS: i32 = 127;

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Home directory not found")]
    HomeDirNotFound,
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error("{command}: {source}")]
    Builtin {
        command: String,
        source: CommandError,
    },
    #[error(transparent)]
    Process(#[from] ProcessError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    FlagError(String),
    #[error("Can't open {0}")]
    ScriptOpen(String),
}

impl ShellError {
    /// Status recorded in the session when this error ends a command or line.
    pub fn status(&self) -> i32 {
        match self {
            ShellError::Syntax(_) => SYNTAX_ERROR_STATUS,
            ShellError::Builtin { source, .. } => source.status(),
            ShellError::Process(e) => e.status(),
            ShellError::FlagError(_) => USAGE_ERROR_STATUS,
            ShellError::ScriptOpen(_) => SCRIPT_OPEN_STATUS,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_error_names_the_command() {
        let err = ShellError::Builtin {
            command: "exit".to_string(),
            source: CommandError::InvalidArguments("Illegal number: abc".to_string()),
        };
        assert_eq!(err.to_string(), "exit: Illegal number: abc");
        assert_eq!(err.status(), USAGE_ERROR_STATUS);
    }

    #[test]
    fn test_process_error_status_passthrough() {
        let err: ShellError = ProcessError::CommandNotFound("nope".to_string()).into();
        assert_eq!(err.to_string(), "nope: not found");
        assert_eq!(err.status(), 127);
    }

    #[test]
    fn test_script_open_status() {
        let err = ShellError::ScriptOpen("missing.sh".to_string());
        assert_eq!(err.to_string(), "Can't open missing.sh");
        assert_eq!(err.status(), SCRIPT_OPEN_STATUS);
    }
}
