use crate::error::ShellError;
use std::path::{Path, PathBuf};

/// Tilde expansion for directory arguments.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathExpander;

impl PathExpander {
    pub fn new() -> Self {
        Self
    }

    /// Expand a leading `~` or `~/` against `home`.
    ///
    /// `home` is the session's `$HOME`; when it is unset the user's home
    /// directory from the system is used.
    pub fn expand(&self, path: &str, home: Option<&str>) -> Result<PathBuf, ShellError> {
        if path == "~" {
            return self.home_dir(home);
        }
        match path.strip_prefix("~/") {
            Some(rest) => {
                let mut home_path = self.home_dir(home)?;
                for part in rest.split('/').filter(|part| !part.is_empty()) {
                    home_path.push(part);
                }
                Ok(home_path)
            }
            // "~user" is left alone
            None => Ok(Path::new(path).to_path_buf()),
        }
    }

    pub fn home_dir(&self, home: Option<&str>) -> Result<PathBuf, ShellError> {
        match home {
            Some(home) if !home.is_empty() => Ok(PathBuf::from(home)),
            _ => dirs::home_dir().ok_or(ShellError::HomeDirNotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("~", "/home/test")]
    #[case("~/", "/home/test")]
    #[case("~/src//hsh", "/home/test/src/hsh")]
    #[case("~other/x", "~other/x")]
    #[case("/tmp", "/tmp")]
    #[case("relative/dir", "relative/dir")]
    fn test_expand(#[case] input: &str, #[case] expected: &str) {
        let expanded = PathExpander::new().expand(input, Some("/home/test")).unwrap();
        assert_eq!(expanded, PathBuf::from(expected));
    }

    #[test]
    fn test_falls_back_to_system_home() {
        let expander = PathExpander::new();
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expander.home_dir(None).unwrap(), home);
            assert_eq!(expander.home_dir(Some("")).unwrap(), home);
        }
    }
}
