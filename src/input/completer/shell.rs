use std::borrow::Cow;

use super::{command::CommandCompleter, path::PathCompleter};
use crate::highlight::SyntaxHighlighter;
use crate::shell::syntax::is_operator;
use crate::shell::tokenizer::is_delimiter;

use rustyline::{
    completion::{Completer, Pair},
    highlight::{CmdKind, Highlighter},
    hint::Hinter,
    validate::Validator,
    Context, Helper,
};

/// The `rustyline` helper for interactive sessions.
#[derive(Debug, Clone)]
pub struct ShellCompleter {
    command_completer: CommandCompleter,
    path_completer: PathCompleter,
    highlighter: SyntaxHighlighter,
    search_path: Option<String>,
}

impl ShellCompleter {
    pub fn new(search_path: Option<&str>, highlighter: SyntaxHighlighter) -> Self {
        ShellCompleter {
            command_completer: CommandCompleter::new(search_path),
            path_completer: PathCompleter::new(),
            highlighter,
            search_path: search_path.map(str::to_owned),
        }
    }

    /// Rescan command names when `search_path` differs from the one the
    /// current list was built from. Returns whether a rescan happened.
    pub fn sync_search_path(&mut self, search_path: Option<&str>) -> bool {
        if self.search_path.as_deref() == search_path {
            return false;
        }
        tracing::debug!(path = ?search_path, "search path changed, refreshing commands");
        self.command_completer.refresh_commands(search_path);
        self.search_path = search_path.map(str::to_owned);
        true
    }

    fn candidates(&self, line: &str, pos: usize) -> (usize, Vec<Pair>) {
        let before = &line[..pos];
        let start = before
            .rfind(|c: char| is_delimiter(c) || is_operator(c))
            .map_or(0, |index| index + 1);
        let word = &before[start..];

        let command_position = before[..start]
            .trim_end_matches(is_delimiter)
            .chars()
            .last()
            .map_or(true, is_operator);

        let matches = if command_position && !word.contains('/') {
            self.command_completer.complete_command(word)
        } else {
            self.path_completer.complete_path(word)
        };
        (start, matches)
    }
}

impl Helper for ShellCompleter {}

impl Highlighter for ShellCompleter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Owned(self.highlighter.highlight_line(line))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }
}

impl Hinter for ShellCompleter {
    type Hint = String;
}

impl Validator for ShellCompleter {}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(self.candidates(line, pos))
    }
}
