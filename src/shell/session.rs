use std::io::{self, Write};
use std::ops::ControlFlow;

use super::expand::{substitute, VariableLookup};
use super::pipeline::{strip_comment, Pipeline};
use super::syntax::{self, SYNTAX_ERROR_STATUS};
use super::tokenizer::tokenize;
use crate::core::commands::{Command, CommandType};
use crate::core::env::EnvVarManager;
use crate::error::ShellError;
use crate::highlight::SyntaxHighlighter;
use crate::process::ProcessExecutor;

/// State that lives for one shell invocation.
pub struct Session {
    args: Vec<String>,
    input: String,
    argv: Vec<String>,
    status: i32,
    counter: usize,
    env: EnvVarManager,
    pid: String,
    exit_request: Option<i32>,
    executor: ProcessExecutor,
    highlighter: Option<SyntaxHighlighter>,
}

impl Session {
    pub fn new(args: Vec<String>, env: EnvVarManager) -> Self {
        Self {
            args,
            input: String::new(),
            argv: Vec::new(),
            status: 0,
            counter: 0,
            env,
            pid: std::process::id().to_string(),
            exit_request: None,
            executor: ProcessExecutor::default(),
            highlighter: None,
        }
    }

    pub fn with_executor(mut self, executor: ProcessExecutor) -> Self {
        self.executor = executor;
        self
    }

    /// Colour error reports.
    pub fn with_highlighter(mut self, highlighter: SyntaxHighlighter) -> Self {
        self.highlighter = Some(highlighter);
        self
    }

    /// Name used as the prefix of every error message.
    pub fn shell_name(&self) -> &str {
        self.args.first().map_or("hsh", String::as_str)
    }

    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    pub fn status(&self) -> i32 {
        self.status
    }

    pub fn set_status(&mut self, status: i32) {
        self.status = status;
    }

    /// Number of raw lines read so far.
    pub fn counter(&self) -> usize {
        self.counter
    }

    pub fn env(&self) -> &EnvVarManager {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut EnvVarManager {
        &mut self.env
    }

    pub fn exit_request(&self) -> Option<i32> {
        self.exit_request
    }

    pub fn request_exit(&mut self, code: i32) {
        self.exit_request = Some(code);
    }

    /// Run one raw input line.
    ///
    /// Breaks with the exit code once `exit` runs; the rest of the line is
    /// skipped. Builtin output is written to `out`.
    pub fn run_line(&mut self, raw: &str, out: &mut dyn Write) -> ControlFlow<i32> {
        self.counter += 1;
        self.input = raw.trim_end_matches(['\n', '\r']).to_string();

        let line = strip_comment(raw);
        if let Err(e) = syntax::validate(line) {
            self.status = SYNTAX_ERROR_STATUS;
            self.report(&ShellError::from(e));
            return ControlFlow::Continue(());
        }

        let pipeline = Pipeline::split(line);
        tracing::trace!(
            line = %self.input,
            commands = pipeline.commands().len(),
            "split line"
        );

        let mut run_next = true;
        for (command, operator) in pipeline.iter() {
            if run_next {
                self.execute_command(command, out);
                if let Some(code) = self.exit_request {
                    return ControlFlow::Break(code);
                }
            } else {
                tracing::trace!(command, "skipped");
            }
            run_next = operator.map_or(true, |op| op.allows(self.status));
        }

        ControlFlow::Continue(())
    }

    fn execute_command(&mut self, command: &str, out: &mut dyn Write) {
        let expanded = substitute(command, &*self).into_owned();
        self.argv = tokenize(&expanded);
        let Some(name) = self.argv.first() else {
            return;
        };

        let result = match CommandType::lookup(name) {
            Some(builtin) => {
                let args = self.argv[1..].to_vec();
                builtin
                    .execute(self, &args, out)
                    .map_err(|source| ShellError::Builtin {
                        command: builtin.name().to_string(),
                        source,
                    })
            }
            None => self
                .executor
                .execute(&self.argv, &self.env)
                .map_err(ShellError::from),
        };

        match result {
            Ok(status) => self.status = status,
            Err(e) => {
                self.status = e.status();
                self.report(&e);
            }
        }

        if let Err(e) = out.flush() {
            tracing::warn!(error = %e, "failed to flush output");
        }
    }

    /// Print `<shell>: <counter>: <message>` to standard error.
    pub fn report(&self, error: &ShellError) {
        let message = format!("{}: {}: {}", self.shell_name(), self.counter, error);
        let message = match &self.highlighter {
            Some(highlighter) => highlighter.highlight_error(&message),
            None => message,
        };
        let _ = writeln!(io::stderr().lock(), "{message}");
    }
}

impl VariableLookup for Session {
    fn last_status(&self) -> i32 {
        self.status
    }

    fn process_id(&self) -> &str {
        &self.pid
    }

    fn variable(&self, name: &str) -> Option<&str> {
        self.env.get(name)
    }
}
