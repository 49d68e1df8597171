use std::io::{self, IsTerminal, Write};
use std::ops::ControlFlow;
use std::path::Path;

pub mod expand;
pub mod pipeline;
mod session;
pub mod syntax;
pub mod tokenizer;

pub use session::Session;

use crate::{
    core::{
        config::{ConfigLoader, ConfigPaths},
        env::EnvVarManager,
    },
    error::ShellError,
    flags::Flags,
    highlight::SyntaxHighlighter,
    input::{LineReader, ReadOutcome, ShellCompleter},
    process::{InterruptFlag, ProcessExecutor},
};

const PROMPT: &str = "$ ";

pub struct Shell {
    session: Session,
    reader: LineReader,
    interrupted: InterruptFlag,
    config: Option<ConfigPaths>,
    quiet: bool,
}

impl Shell {
    /// Set up a shell for `args` (the full invocation, program name first).
    ///
    /// Without a script operand the shell is interactive when stdin is a
    /// terminal and reads stdin silently otherwise.
    pub fn new(args: Vec<String>, flags: &Flags) -> Result<Self, ShellError> {
        let interrupted = InterruptFlag::register()?;
        let quiet = flags.is_set("quiet");
        let mut session = Session::new(args, EnvVarManager::from_process())
            .with_executor(ProcessExecutor::new(interrupted.clone()));

        let (reader, config) = match flags.positionals() {
            [] if io::stdin().is_terminal() => {
                let highlighter = SyntaxHighlighter::new();
                session = session.with_highlighter(highlighter);

                let rc_override = flags.get_value("config").map(String::as_str);
                let config = match ConfigPaths::new(rc_override) {
                    Ok(paths) => Some(paths),
                    Err(e) => {
                        if !quiet {
                            tracing::warn!(error = %e, "no rc file or history");
                        }
                        None
                    }
                };

                let completer = ShellCompleter::new(session.env().get("PATH"), highlighter);
                let history = config.as_ref().map(|paths| paths.history_path.clone());
                (LineReader::interactive(completer, history)?, config)
            }
            [] => (LineReader::stdin(), None),
            [script] => (LineReader::script(Path::new(script))?, None),
            _ => {
                return Err(ShellError::FlagError(
                    "too many arguments".to_string(),
                ))
            }
        };
        tracing::debug!(interactive = reader.is_interactive(), "shell ready");

        Ok(Shell {
            session,
            reader,
            interrupted,
            config,
            quiet,
        })
    }

    /// Read and run lines until `exit` or end of input; returns the exit code.
    pub fn run(&mut self) -> Result<i32, ShellError> {
        let mut stdout = io::stdout();

        if let Some(paths) = &self.config {
            let loaded = ConfigLoader::new(paths).load(&mut self.session, &mut stdout);
            match loaded {
                Ok(ControlFlow::Break(code)) => return Ok(self.finish(code)),
                Ok(ControlFlow::Continue(())) => {}
                Err(e) => self.session.report(&ShellError::from(e)),
            }
            self.reader.sync_search_path(self.session.env().get("PATH"));
        }

        let interactive = self.reader.is_interactive();
        let prompt = if interactive { PROMPT } else { "" };

        loop {
            match self.reader.read_line(prompt) {
                Ok(ReadOutcome::Line(line)) => {
                    let flow = self.session.run_line(&line, &mut stdout);
                    self.interrupted.take();
                    self.reader.sync_search_path(self.session.env().get("PATH"));
                    if let ControlFlow::Break(code) = flow {
                        return Ok(self.finish(code));
                    }
                }
                Ok(ReadOutcome::Interrupted) => {
                    self.interrupted.take();
                }
                Ok(ReadOutcome::Eof) => {
                    if interactive {
                        let _ = writeln!(stdout);
                    }
                    break;
                }
                Err(e) => {
                    if !self.quiet {
                        tracing::warn!(error = %e, "failed to read input");
                    }
                    break;
                }
            }
        }

        let status = self.session.status();
        Ok(self.finish(status))
    }

    fn finish(&mut self, code: i32) -> i32 {
        if let Err(e) = self.reader.save_history() {
            if !self.quiet {
                tracing::warn!(error = %e, "could not save history");
            }
        }
        tracing::debug!(code, "exiting");
        code
    }
}
