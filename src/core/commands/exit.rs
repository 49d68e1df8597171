use std::io::Write;

use super::{Command, CommandError};
use crate::shell::Session;

#[derive(Debug, Clone, Copy, Default)]
pub struct ExitCommand;

impl Command for ExitCommand {
    fn execute(
        &self,
        session: &mut Session,
        args: &[String],
        _out: &mut dyn Write,
    ) -> Result<i32, CommandError> {
        let code = match args.first() {
            None => session.status(),
            Some(arg) => parse_status(arg)?,
        };
        session.request_exit(code);
        Ok(code)
    }
}

/// Exit codes are non-negative decimal numbers that fit in an `i32`,
/// truncated to the low byte the way `exit(3)` does.
fn parse_status(arg: &str) -> Result<i32, CommandError> {
    let illegal = || CommandError::InvalidArguments(format!("Illegal number: {arg}"));
    if arg.is_empty() || !arg.bytes().all(|b| b.is_ascii_digit()) {
        return Err(illegal());
    }
    let value: i32 = arg.parse().map_err(|_| illegal())?;
    Ok(value % 256)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::env::EnvVarManager;
    use rstest::rstest;

    fn session() -> Session {
        Session::new(vec!["hsh".to_string()], EnvVarManager::new())
    }

    #[test]
    fn test_exit_without_argument_uses_last_status() {
        let mut session = session();
        session.set_status(7);
        let mut out = Vec::new();
        assert_eq!(ExitCommand.execute(&mut session, &[], &mut out).unwrap(), 7);
        assert_eq!(session.exit_request(), Some(7));
    }

    #[rstest]
    #[case("0", 0)]
    #[case("42", 42)]
    #[case("256", 0)]
    #[case("300", 44)]
    #[case("2147483647", 255)]
    fn test_exit_code_is_truncated(#[case] arg: &str, #[case] expected: i32) {
        let mut session = session();
        let mut out = Vec::new();
        let args = vec![arg.to_string(), "ignored".to_string()];
        assert_eq!(
            ExitCommand.execute(&mut session, &args, &mut out).unwrap(),
            expected
        );
        assert_eq!(session.exit_request(), Some(expected));
    }

    #[rstest]
    #[case("abc")]
    #[case("-1")]
    #[case("+1")]
    #[case("1x")]
    #[case("2147483648")]
    fn test_illegal_numbers(#[case] arg: &str) {
        let mut session = session();
        let mut out = Vec::new();
        let err = ExitCommand
            .execute(&mut session, &[arg.to_string()], &mut out)
            .unwrap_err();
        assert_eq!(err.to_string(), format!("Illegal number: {arg}"));
        assert_eq!(err.status(), 2);
        assert_eq!(session.exit_request(), None);
    }
}
