use std::io::Write;

use super::{Command, CommandError};
use crate::shell::Session;

/// `env`: print the session environment, one `NAME=VALUE` per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCommand;

/// `setenv NAME VALUE`
#[derive(Debug, Clone, Copy, Default)]
pub struct SetEnvCommand;

/// `unsetenv NAME`
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsetEnvCommand;

impl Command for EnvCommand {
    fn execute(
        &self,
        session: &mut Session,
        args: &[String],
        out: &mut dyn Write,
    ) -> Result<i32, CommandError> {
        if !args.is_empty() {
            return Err(CommandError::InvalidArguments("usage: env".to_string()));
        }
        for (name, value) in session.env().iter() {
            writeln!(out, "{name}={value}")?;
        }
        Ok(0)
    }
}

impl Command for SetEnvCommand {
    fn execute(
        &self,
        session: &mut Session,
        args: &[String],
        _out: &mut dyn Write,
    ) -> Result<i32, CommandError> {
        let [name, value] = args else {
            return Err(CommandError::InvalidArguments(
                "usage: setenv VARIABLE VALUE".to_string(),
            ));
        };
        session.env_mut().set(name, value)?;
        Ok(0)
    }
}

impl Command for UnsetEnvCommand {
    fn execute(
        &self,
        session: &mut Session,
        args: &[String],
        _out: &mut dyn Write,
    ) -> Result<i32, CommandError> {
        let [name] = args else {
            return Err(CommandError::InvalidArguments(
                "usage: unsetenv VARIABLE".to_string(),
            ));
        };
        session.env_mut().remove(name)?;
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::env::EnvVarManager;

    fn session() -> Session {
        let env = [("HOME", "/home/test"), ("PATH", "/bin")]
            .into_iter()
            .collect::<EnvVarManager>();
        Session::new(vec!["hsh".to_string()], env)
    }

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_env_lists_in_order() {
        let mut session = session();
        let mut out = Vec::new();
        assert_eq!(EnvCommand.execute(&mut session, &[], &mut out).unwrap(), 0);
        assert_eq!(String::from_utf8(out).unwrap(), "HOME=/home/test\nPATH=/bin\n");
    }

    #[test]
    fn test_env_rejects_arguments() {
        let mut session = session();
        let mut out = Vec::new();
        let err = EnvCommand
            .execute(&mut session, &args(&["-i"]), &mut out)
            .unwrap_err();
        assert_eq!(err.status(), 2);
        assert!(out.is_empty());
    }

    #[test]
    fn test_setenv_then_unsetenv() {
        let mut session = session();
        let mut out = Vec::new();

        SetEnvCommand
            .execute(&mut session, &args(&["GREETING", "hello"]), &mut out)
            .unwrap();
        assert_eq!(session.env().get("GREETING"), Some("hello"));

        SetEnvCommand
            .execute(&mut session, &args(&["GREETING", "bye"]), &mut out)
            .unwrap();
        assert_eq!(session.env().get("GREETING"), Some("bye"));
        assert_eq!(session.env().len(), 3);

        UnsetEnvCommand
            .execute(&mut session, &args(&["GREETING"]), &mut out)
            .unwrap();
        assert_eq!(session.env().get("GREETING"), None);
        assert!(out.is_empty());
    }

    #[test]
    fn test_setenv_usage_errors() {
        let mut session = session();
        let mut out = Vec::new();
        for bad in [args(&[]), args(&["ONLY"]), args(&["A", "B", "C"])] {
            let err = SetEnvCommand
                .execute(&mut session, &bad, &mut out)
                .unwrap_err();
            assert_eq!(err.to_string(), "usage: setenv VARIABLE VALUE");
        }
        assert!(SetEnvCommand
            .execute(&mut session, &args(&["A=B", "x"]), &mut out)
            .is_err());
        assert_eq!(session.env().len(), 2);
    }

    #[test]
    fn test_unsetenv_missing_variable() {
        let mut session = session();
        let mut out = Vec::new();
        let err = UnsetEnvCommand
            .execute(&mut session, &args(&["NOPE"]), &mut out)
            .unwrap_err();
        assert_eq!(err.to_string(), "NOPE: not set");
        assert_eq!(err.status(), 2);

        assert!(UnsetEnvCommand.execute(&mut session, &[], &mut out).is_err());
    }
}
