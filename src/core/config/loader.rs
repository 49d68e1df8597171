use std::fs;
use std::io::Write;
use std::ops::ControlFlow;

use super::{ConfigError, ConfigPaths};
use crate::shell::Session;

/// Sources the rc file through the normal line pipeline.
pub struct ConfigLoader<'a> {
    paths: &'a ConfigPaths,
}

impl<'a> ConfigLoader<'a> {
    pub fn new(paths: &'a ConfigPaths) -> Self {
        Self { paths }
    }

    /// Run every line of the rc file in `session`.
    ///
    /// A missing default rc file is not an error. Breaks if a line runs
    /// `exit`.
    pub fn load(
        &self,
        session: &mut Session,
        out: &mut dyn Write,
    ) -> Result<ControlFlow<i32>, ConfigError> {
        let path = &self.paths.rc_path;
        if !path.exists() {
            if self.paths.rc_required {
                return Err(ConfigError::ConfigFileNotFound(path.display().to_string()));
            }
            tracing::trace!(path = %path.display(), "no rc file");
            return Ok(ControlFlow::Continue(()));
        }

        tracing::debug!(path = %path.display(), "sourcing rc file");
        let content = fs::read_to_string(path)?;
        for line in content.lines() {
            if let ControlFlow::Break(code) = session.run_line(line, out) {
                return Ok(ControlFlow::Break(code));
            }
        }
        Ok(ControlFlow::Continue(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::env::EnvVarManager;
    use std::path::Path;
    use tempfile::TempDir;

    fn session() -> Session {
        Session::new(vec!["hsh".to_string()], EnvVarManager::new())
    }

    #[test]
    fn test_rc_lines_run_in_session() {
        let home = TempDir::new().unwrap();
        fs::write(
            home.path().join(".hshrc"),
            "# startup\nsetenv EDITOR vi\nsetenv GREETING hi ; env\n",
        )
        .unwrap();

        let paths = ConfigPaths::with_home(home.path(), None);
        let mut session = session();
        let mut out = Vec::new();
        let flow = ConfigLoader::new(&paths).load(&mut session, &mut out).unwrap();

        assert_eq!(flow, ControlFlow::Continue(()));
        assert_eq!(session.env().get("EDITOR"), Some("vi"));
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "EDITOR=vi\nGREETING=hi\n"
        );
        assert_eq!(session.counter(), 3);
    }

    #[test]
    fn test_exit_in_rc_breaks() {
        let home = TempDir::new().unwrap();
        fs::write(home.path().join(".hshrc"), "exit 4\nsetenv LATE 1\n").unwrap();

        let paths = ConfigPaths::with_home(home.path(), None);
        let mut session = session();
        let mut out = Vec::new();
        let flow = ConfigLoader::new(&paths).load(&mut session, &mut out).unwrap();

        assert_eq!(flow, ControlFlow::Break(4));
        assert_eq!(session.env().get("LATE"), None);
    }

    #[test]
    fn test_missing_rc_file() {
        let home = TempDir::new().unwrap();
        let mut session = session();
        let mut out = Vec::new();

        let paths = ConfigPaths::with_home(home.path(), None);
        assert_eq!(
            ConfigLoader::new(&paths).load(&mut session, &mut out).unwrap(),
            ControlFlow::Continue(())
        );

        let paths = ConfigPaths::with_home(Path::new("/"), Some("/nonexistent/hshrc"));
        let err = ConfigLoader::new(&paths)
            .load(&mut session, &mut out)
            .unwrap_err();
        assert!(matches!(err, ConfigError::ConfigFileNotFound(_)));
    }
}
