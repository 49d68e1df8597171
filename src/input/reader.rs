use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use rustyline::{config::Configurer, error::ReadlineError, history::FileHistory, Editor};

use super::ShellCompleter;
use crate::error::ShellError;

#[derive(Debug, PartialEq, Eq)]
pub enum ReadOutcome {
    Line(String),
    /// Ctrl-C at the prompt.
    Interrupted,
    Eof,
}

/// Where the shell's input lines come from.
pub enum LineReader {
    Interactive {
        editor: Editor<ShellCompleter, FileHistory>,
        history_path: Option<PathBuf>,
    },
    /// Script files and non-terminal stdin; no prompt, no editing.
    Stream(Box<dyn BufRead>),
}

impl LineReader {
    pub fn interactive(
        completer: ShellCompleter,
        history_path: Option<PathBuf>,
    ) -> Result<Self, ShellError> {
        let mut editor = Editor::<ShellCompleter, FileHistory>::new()?;
        editor.set_helper(Some(completer));
        editor.set_auto_add_history(true);

        if let Some(path) = history_path.as_deref().filter(|p| p.exists()) {
            if let Err(e) = editor.load_history(path) {
                tracing::warn!(path = %path.display(), error = %e, "could not load history");
            }
        }

        Ok(LineReader::Interactive {
            editor,
            history_path,
        })
    }

    pub fn script(path: &Path) -> Result<Self, ShellError> {
        let file = File::open(path).map_err(|e| {
            tracing::debug!(path = %path.display(), error = %e, "cannot open script");
            ShellError::ScriptOpen(path.display().to_string())
        })?;
        Ok(LineReader::Stream(Box::new(BufReader::new(file))))
    }

    pub fn stdin() -> Self {
        LineReader::Stream(Box::new(io::stdin().lock()))
    }

    pub fn from_reader(reader: impl BufRead + 'static) -> Self {
        LineReader::Stream(Box::new(reader))
    }

    pub fn is_interactive(&self) -> bool {
        matches!(self, LineReader::Interactive { .. })
    }

    pub fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome, ShellError> {
        match self {
            LineReader::Interactive { editor, .. } => match editor.readline(prompt) {
                Ok(line) => Ok(ReadOutcome::Line(line)),
                Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
                Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
                Err(e) => Err(e.into()),
            },
            LineReader::Stream(reader) => {
                let mut buf = Vec::new();
                match reader.read_until(b'\n', &mut buf) {
                    Ok(0) => Ok(ReadOutcome::Eof),
                    Ok(_) => Ok(ReadOutcome::Line(
                        String::from_utf8_lossy(&buf).into_owned(),
                    )),
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => {
                        Ok(ReadOutcome::Interrupted)
                    }
                    Err(e) => Err(e.into()),
                }
            }
        }
    }

    /// Keep command completion in step with the session `PATH`.
    pub fn sync_search_path(&mut self, search_path: Option<&str>) {
        if let LineReader::Interactive { editor, .. } = self {
            if let Some(helper) = editor.helper_mut() {
                helper.sync_search_path(search_path);
            }
        }
    }

    pub fn save_history(&mut self) -> Result<(), ShellError> {
        if let LineReader::Interactive {
            editor,
            history_path: Some(path),
        } = self
        {
            editor.save_history(path.as_path())?;
        }
        Ok(())
    }
}
