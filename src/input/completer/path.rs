use std::fs;
use std::path::{Path, PathBuf};

use rustyline::completion::Pair;

/// File and directory name candidates for argument positions.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathCompleter;

impl PathCompleter {
    pub fn new() -> Self {
        Self
    }

    pub fn complete_path(&self, incomplete: &str) -> Vec<Pair> {
        let (dir, prefix) = split_input(incomplete);
        let Ok(entries) = fs::read_dir(&dir) else {
            return Vec::new();
        };

        // Text the user typed before the final component.
        let typed_dir = &incomplete[..incomplete.len() - prefix.len()];

        let mut matches: Vec<Pair> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_string();
                if !name.starts_with(prefix) || (name.starts_with('.') && !prefix.starts_with('.')) {
                    return None;
                }
                let is_dir = entry.path().is_dir();
                let candidate = format!("{typed_dir}{name}");
                Some(if is_dir {
                    Pair {
                        display: format!("{name}/"),
                        replacement: format!("{candidate}/"),
                    }
                } else {
                    Pair {
                        display: name,
                        replacement: format!("{candidate} "),
                    }
                })
            })
            .collect();

        matches.sort_by(|a, b| a.display.cmp(&b.display));
        matches
    }
}

/// Directory to list and the file-name prefix to match in it.
fn split_input(incomplete: &str) -> (PathBuf, &str) {
    match incomplete.rfind('/') {
        Some(0) => (PathBuf::from("/"), &incomplete[1..]),
        Some(index) => (
            Path::new(&incomplete[..index]).to_path_buf(),
            &incomplete[index + 1..],
        ),
        None => (PathBuf::from("."), incomplete),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_split_input() {
        assert_eq!(split_input("src/ma"), (PathBuf::from("src"), "ma"));
        assert_eq!(split_input("/et"), (PathBuf::from("/"), "et"));
        assert_eq!(split_input("file"), (PathBuf::from("."), "file"));
        assert_eq!(split_input("dir/"), (PathBuf::from("dir"), ""));
    }

    #[test]
    fn test_completes_files_and_directories() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join(".hidden"), "").unwrap();

        let base = format!("{}/", dir.path().display());
        let pairs = PathCompleter::new().complete_path(&format!("{base}n"));
        let replacements: Vec<&str> = pairs.iter().map(|p| p.replacement.as_str()).collect();
        assert_eq!(
            replacements,
            vec![format!("{base}nested/"), format!("{base}notes.txt ")]
        );

        let all = PathCompleter::new().complete_path(&base);
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_missing_directory_has_no_candidates() {
        assert!(PathCompleter::new()
            .complete_path("/nonexistent-hsh/x")
            .is_empty());
    }
}
