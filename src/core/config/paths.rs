use super::ConfigError;
use std::path::{Path, PathBuf};

const RC_FILE: &str = ".hshrc";
const HISTORY_FILE: &str = ".hsh_history";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    pub rc_path: PathBuf,
    pub history_path: PathBuf,
    /// Set when the rc file was named explicitly and so must exist.
    pub rc_required: bool,
}

impl ConfigPaths {
    pub fn new(rc_override: Option<&str>) -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;
        Ok(Self::with_home(&home, rc_override))
    }

    pub fn with_home(home: &Path, rc_override: Option<&str>) -> Self {
        ConfigPaths {
            rc_path: rc_override.map_or_else(|| home.join(RC_FILE), PathBuf::from),
            history_path: home.join(HISTORY_FILE),
            rc_required: rc_override.is_some(),
        }
    }
}
