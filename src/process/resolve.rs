use std::ffi::CString;
use std::fs;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

/// Outcome of looking a command name up on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Executable(PathBuf),
    /// A candidate exists but cannot be executed.
    NotExecutable(PathBuf),
    NotFound,
}

/// Resolve `name` the way `execve` callers conventionally do.
///
/// A name containing `/` is taken as a path. Otherwise every entry of
/// `search_path` is tried in order; an empty entry stands for the current
/// directory. The first executable regular file wins, and if none is
/// executable the first existing candidate is reported as not executable.
pub fn resolve(name: &str, search_path: Option<&str>) -> Resolution {
    if name.is_empty() {
        return Resolution::NotFound;
    }

    if name.contains('/') {
        return classify(Path::new(name));
    }

    let Some(search_path) = search_path else {
        return Resolution::NotFound;
    };

    let mut first_denied = None;
    for dir in search_path.split(':') {
        let candidate = if dir.is_empty() {
            Path::new(".").join(name)
        } else {
            Path::new(dir).join(name)
        };

        // Directories on the search path are not commands.
        if candidate.is_dir() {
            continue;
        }

        match classify(&candidate) {
            Resolution::Executable(path) => {
                tracing::trace!(path = %path.display(), "resolved");
                return Resolution::Executable(path);
            }
            Resolution::NotExecutable(path) if first_denied.is_none() => {
                first_denied = Some(path);
            }
            _ => {}
        }
    }

    first_denied.map_or(Resolution::NotFound, Resolution::NotExecutable)
}

fn classify(path: &Path) -> Resolution {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() && is_executable(path) => {
            Resolution::Executable(path.to_path_buf())
        }
        Ok(_) => Resolution::NotExecutable(path.to_path_buf()),
        Err(_) => Resolution::NotFound,
    }
}

fn is_executable(path: &Path) -> bool {
    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    // SAFETY: `c_path` is a valid NUL-terminated string for the duration of the call.
    unsafe { libc::access(c_path.as_ptr(), libc::X_OK) == 0 }
}
