use std::env;
use std::io::Write;
use std::path::PathBuf;

use super::{Command, CommandError};
use crate::path::PathExpander;
use crate::shell::Session;

#[derive(Debug, Clone, Copy, Default)]
pub struct CdCommand {
    path_expander: PathExpander,
}

impl CdCommand {
    pub fn new() -> Self {
        Self {
            path_expander: PathExpander::new(),
        }
    }

    fn target(&self, session: &Session, arg: Option<&str>) -> Result<PathBuf, CommandError> {
        let home = session.env().get("HOME");
        match arg {
            None | Some("~") | Some("--") => self
                .path_expander
                .home_dir(home)
                .map_err(|e| CommandError::ExecutionError(e.to_string())),
            Some("-") => match session.env().get("OLDPWD") {
                Some(previous) => Ok(PathBuf::from(previous)),
                None => Ok(env::current_dir()?),
            },
            Some(path) => self
                .path_expander
                .expand(path, home)
                .map_err(|e| CommandError::ExecutionError(e.to_string())),
        }
    }
}

impl Command for CdCommand {
    fn execute(
        &self,
        session: &mut Session,
        args: &[String],
        out: &mut dyn Write,
    ) -> Result<i32, CommandError> {
        if args.len() > 1 {
            return Err(CommandError::InvalidArguments(
                "too many arguments".to_string(),
            ));
        }
        let arg = args.first().map(String::as_str);
        let target = self.target(session, arg)?;

        let previous = match session.env().get("PWD") {
            Some(pwd) => PathBuf::from(pwd),
            None => env::current_dir()?,
        };

        env::set_current_dir(&target).map_err(|_| {
            CommandError::ExecutionError(format!(
                "can't cd to {}",
                arg.map_or_else(|| target.display().to_string(), str::to_string)
            ))
        })?;
        let current = env::current_dir()?;
        tracing::debug!(from = %previous.display(), to = %current.display(), "changed directory");

        let env = session.env_mut();
        env.set("OLDPWD", &previous.to_string_lossy())?;
        env.set("PWD", &current.to_string_lossy())?;

        if arg == Some("-") {
            writeln!(out, "{}", current.display())?;
        }
        Ok(0)
    }
}
