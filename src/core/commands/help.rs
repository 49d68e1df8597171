use std::io::Write;

use super::{Command, CommandError};
use crate::shell::Session;

#[derive(Debug, Clone, Copy, Default)]
pub struct HelpCommand;

const GENERAL: &str = "\
These shell commands are defined internally. Type `help NAME` to find out
more about the command NAME.

  cd [DIRECTORY]
  env
  exit [STATUS]
  help [COMMAND]
  setenv VARIABLE VALUE
  unsetenv VARIABLE
";

fn topic(name: &str) -> Option<&'static str> {
    let text = match name {
        "cd" => {
            "cd: cd [DIRECTORY]\n    Change the current directory to DIRECTORY.\n    \
             Without an argument, or with `~` or `--`, change to $HOME.\n    \
             `cd -` changes to $OLDPWD and prints it.\n    \
             PWD and OLDPWD are updated on success.\n"
        }
        "exit" => {
            "exit: exit [STATUS]\n    Exit the shell with STATUS modulo 256.\n    \
             Without STATUS, the status of the last command is used.\n"
        }
        "env" => "env: env\n    Print every environment variable as NAME=VALUE.\n",
        "setenv" => {
            "setenv: setenv VARIABLE VALUE\n    \
             Set VARIABLE to VALUE, adding it if it does not exist.\n"
        }
        "unsetenv" => "unsetenv: unsetenv VARIABLE\n    Remove VARIABLE from the environment.\n",
        "help" => {
            "help: help [COMMAND]\n    Display information about builtin commands.\n    \
             With COMMAND, describe that command only.\n"
        }
        _ => return None,
    };
    Some(text)
}

impl Command for HelpCommand {
    fn execute(
        &self,
        _session: &mut Session,
        args: &[String],
        out: &mut dyn Write,
    ) -> Result<i32, CommandError> {
        if args.is_empty() {
            out.write_all(GENERAL.as_bytes())?;
            return Ok(0);
        }

        for name in args {
            let text = topic(name).ok_or_else(|| {
                CommandError::InvalidArguments(format!("no help topics match `{name}'"))
            })?;
            out.write_all(text.as_bytes())?;
        }
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::CommandType;
    use crate::core::env::EnvVarManager;

    fn run(args: &[&str]) -> (Result<i32, CommandError>, String) {
        let mut session = Session::new(vec!["hsh".to_string()], EnvVarManager::new());
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        let mut out = Vec::new();
        let result = HelpCommand.execute(&mut session, &args, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_general_help_lists_every_builtin() {
        let (result, text) = run(&[]);
        assert_eq!(result.unwrap(), 0);
        for name in CommandType::NAMES {
            assert!(text.contains(&format!("  {name}")), "missing {name}");
        }
    }

    #[test]
    fn test_every_builtin_has_a_topic() {
        for name in CommandType::NAMES {
            let (result, text) = run(&[name]);
            assert_eq!(result.unwrap(), 0);
            assert!(text.starts_with(&format!("{name}: ")));
        }
    }

    #[test]
    fn test_unknown_topic() {
        let (result, _) = run(&["ls"]);
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "no help topics match `ls'");
        assert_eq!(err.status(), 2);
    }
}
