use std::io::Write;

mod cd;
mod env;
mod exit;
mod help;

pub use cd::CdCommand;
pub use env::{EnvCommand, SetEnvCommand, UnsetEnvCommand};
pub use exit::ExitCommand;
pub use help::HelpCommand;

use crate::core::env::EnvError;
use crate::error::USAGE_ERROR_STATUS;
use crate::shell::Session;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    ExecutionError(String),
    #[error("{0}")]
    EnvError(#[from] EnvError),
    #[error("{0}")]
    IoError(#[from] std::io::Error),
}

impl CommandError {
    pub fn status(&self) -> i32 {
        match self {
            CommandError::IoError(_) => 1,
            _ => USAGE_ERROR_STATUS,
        }
    }
}

/// A command run inside the shell process.
///
/// Output goes to `out`; the returned value becomes the last exit status.
pub trait Command {
    fn execute(
        &self,
        session: &mut Session,
        args: &[String],
        out: &mut dyn Write,
    ) -> Result<i32, CommandError>;
}

#[derive(Debug, Clone, Copy)]
pub enum CommandType {
    Cd(CdCommand),
    Exit(ExitCommand),
    Env(EnvCommand),
    SetEnv(SetEnvCommand),
    UnsetEnv(UnsetEnvCommand),
    Help(HelpCommand),
}

impl CommandType {
    pub const NAMES: [&'static str; 6] = ["cd", "env", "exit", "help", "setenv", "unsetenv"];

    pub fn lookup(name: &str) -> Option<Self> {
        let command = match name {
            "cd" => CommandType::Cd(CdCommand::new()),
            "exit" => CommandType::Exit(ExitCommand),
            "env" => CommandType::Env(EnvCommand),
            "setenv" => CommandType::SetEnv(SetEnvCommand),
            "unsetenv" => CommandType::UnsetEnv(UnsetEnvCommand),
            "help" => CommandType::Help(HelpCommand),
            _ => return None,
        };
        Some(command)
    }

    pub fn name(&self) -> &'static str {
        match self {
            CommandType::Cd(_) => "cd",
            CommandType::Exit(_) => "exit",
            CommandType::Env(_) => "env",
            CommandType::SetEnv(_) => "setenv",
            CommandType::UnsetEnv(_) => "unsetenv",
            CommandType::Help(_) => "help",
        }
    }
}

impl Command for CommandType {
    fn execute(
        &self,
        session: &mut Session,
        args: &[String],
        out: &mut dyn Write,
    ) -> Result<i32, CommandError> {
        tracing::debug!(builtin = self.name(), ?args, "dispatch");
        match self {
            CommandType::Cd(cmd) => cmd.execute(session, args, out),
            CommandType::Exit(cmd) => cmd.execute(session, args, out),
            CommandType::Env(cmd) => cmd.execute(session, args, out),
            CommandType::SetEnv(cmd) => cmd.execute(session, args, out),
            CommandType::UnsetEnv(cmd) => cmd.execute(session, args, out),
            CommandType::Help(cmd) => cmd.execute(session, args, out),
        }
    }
}
