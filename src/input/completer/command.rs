use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use rustyline::completion::Pair;

use crate::core::commands::CommandType;

/// Command-name candidates: builtins plus executables on `PATH`.
#[derive(Debug, Clone, Default)]
pub struct CommandCompleter {
    commands: BTreeSet<String>,
}

impl CommandCompleter {
    pub fn new(search_path: Option<&str>) -> Self {
        let mut completer = Self::default();
        completer.refresh_commands(search_path);
        completer
    }

    pub fn refresh_commands(&mut self, search_path: Option<&str>) {
        self.commands.clear();
        self.commands
            .extend(CommandType::NAMES.iter().map(|name| name.to_string()));
        if let Some(search_path) = search_path {
            self.add_path_commands(search_path);
        }
    }

    fn add_path_commands(&mut self, search_path: &str) {
        for dir in search_path.split(':').filter(|dir| !dir.is_empty()) {
            let Ok(entries) = fs::read_dir(Path::new(dir)) else {
                continue;
            };
            for entry in entries.filter_map(Result::ok) {
                let is_file = entry
                    .file_type()
                    .map(|t| t.is_file() || t.is_symlink())
                    .unwrap_or(false);
                if let (true, Some(name)) = (is_file, entry.file_name().to_str()) {
                    self.commands.insert(name.to_string());
                }
            }
        }
    }

    pub fn complete_command(&self, prefix: &str) -> Vec<Pair> {
        self.commands
            .iter()
            .filter(|cmd| cmd.starts_with(prefix))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: format!("{cmd} "),
            })
            .collect()
    }
}
